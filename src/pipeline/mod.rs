//! Dictionary generation pipeline
//!
//! Orchestrates the three stages of a run:
//! 1. **Introspect** a geospatial source (or **Load** an existing document)
//! 2. **Serialize** the dictionary document to YAML (introspection runs only)
//! 3. **Render** the document through a template, unless disabled
//!
//! # Example
//!
//! ```rust,ignore
//! use geo_data_dictionary::pipeline::{DictionaryConfig, DictionaryPipeline, PipelineInput};
//!
//! let config = DictionaryConfig::new()
//!     .with_template_dir("./_templates")
//!     .with_output_dir("./docs");
//!
//! let pipeline = DictionaryPipeline::new(config)?;
//! let report = pipeline.run(&PipelineInput::Source("parcels.shp".into()))?;
//!
//! for path in report.artifacts() {
//!     println!("{} created.", path.display());
//! }
//! ```
//!
//! Runs are single-threaded and stop at the first error. Files written before
//! the failure are left in place; a rendered document is only written once
//! rendering has succeeded.

mod config;
mod error;
mod executor;

pub use config::{
    DEFAULT_CATEGORY_DESCRIPTOR, DEFAULT_ITEM_DESCRIPTOR, DEFAULT_RENDER_OUTPUT_NAME,
    DEFAULT_TEMPLATE_DIR, DEFAULT_TEMPLATE_NAME, DictionaryConfig, PipelineInput, PipelineStage,
};
pub use error::{PipelineError, PipelineResult};
pub use executor::{
    DOCUMENT_EXTENSION, DictionaryPipeline, PipelineReport, RENDERED_EXTENSION, StageOutput,
};

/// Run a pipeline with the given configuration
///
/// This is a convenience function for simple pipeline execution.
pub fn run_pipeline(config: DictionaryConfig, input: &PipelineInput) -> PipelineResult<PipelineReport> {
    let pipeline = DictionaryPipeline::new(config)?;
    pipeline.run(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_pipeline_missing_document() {
        let temp = TempDir::new().unwrap();
        let config = DictionaryConfig::new().with_output_dir(temp.path());
        let input = PipelineInput::Document(temp.path().join("absent.yml"));

        let result = run_pipeline(config, &input);
        assert!(matches!(result, Err(PipelineError::IoErrorWithPath { .. })));
    }
}
