//! Pipeline executor for generating and rendering data dictionaries

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use super::config::{DictionaryConfig, PipelineInput, PipelineStage};
use super::error::{PipelineError, PipelineResult};
use crate::models::{Category, ColumnSpec, DataDictionary, DatasetEntry, Item};
use crate::render::TemplateRenderer;
use crate::source::{self, SourceSchema};

/// Extension of the intermediate document
pub const DOCUMENT_EXTENSION: &str = "yml";
/// Extension of the rendered document
pub const RENDERED_EXTENSION: &str = "rst";

/// Outcome of a single stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput {
    pub stage: PipelineStage,
    pub skipped: bool,
    /// File written by the stage, if any
    pub artifact: Option<PathBuf>,
    pub duration_ms: u64,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub stages: Vec<StageOutput>,
    pub document: DataDictionary,
}

impl PipelineReport {
    /// Files written during the run, in order
    pub fn artifacts(&self) -> impl Iterator<Item = &Path> {
        self.stages.iter().filter_map(|s| s.artifact.as_deref())
    }

    pub fn document_path(&self) -> Option<&Path> {
        self.artifact_of(PipelineStage::Serialize)
    }

    pub fn rendered_path(&self) -> Option<&Path> {
        self.artifact_of(PipelineStage::Render)
    }

    fn artifact_of(&self, stage: PipelineStage) -> Option<&Path> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .and_then(|s| s.artifact.as_deref())
    }
}

/// Runs the introspect / load, serialize and render stages
pub struct DictionaryPipeline {
    config: DictionaryConfig,
}

impl DictionaryPipeline {
    /// Create a new pipeline
    pub fn new(config: DictionaryConfig) -> PipelineResult<Self> {
        config.validate().map_err(PipelineError::ConfigError)?;
        Ok(Self { config })
    }

    /// Run the pipeline for the given input
    pub fn run(&self, input: &PipelineInput) -> PipelineResult<PipelineReport> {
        info!(input = %input.path().display(), "Starting pipeline");
        match input {
            PipelineInput::Source(path) => {
                let _span = info_span!("pipeline_run", mode = "generate").entered();
                let start = Instant::now();
                let schema = source::open(path)?;
                let introspect = StageOutput {
                    stage: PipelineStage::Introspect,
                    skipped: false,
                    artifact: None,
                    duration_ms: elapsed_ms(start),
                };
                self.generate(schema, introspect)
            }
            PipelineInput::Document(path) => {
                let _span = info_span!("pipeline_run", mode = "render_only").entered();
                self.render_only(path)
            }
        }
    }

    /// Generate from an already opened source schema
    pub fn run_with_schema(&self, schema: SourceSchema) -> PipelineResult<PipelineReport> {
        let _span = info_span!("pipeline_run", mode = "generate").entered();
        let introspect = StageOutput {
            stage: PipelineStage::Introspect,
            skipped: false,
            artifact: None,
            duration_ms: 0,
        };
        self.generate(schema, introspect)
    }

    /// Build the dataset for a source schema.
    ///
    /// Columns follow the source's field order, with the configured
    /// nullability and placeholder description, and orders 1..n.
    pub fn build_dataset(&self, schema: &SourceSchema) -> DatasetEntry {
        let mut dataset = DatasetEntry::new(&schema.name);
        for (index, (name, data_type)) in schema.properties.iter().enumerate() {
            dataset.add_column(
                ColumnSpec::new(name, data_type)
                    .with_allows_nulls(self.config.introspected_allows_nulls)
                    .with_description(&self.config.column_description)
                    .with_order(index as u32 + 1),
            );
        }
        dataset
    }

    /// Wrap a dataset in a single-category, single-item document
    pub fn build_document(&self, source_name: &str, dataset: &DatasetEntry) -> DataDictionary {
        DataDictionary::new(
            &self.config.category_descriptor,
            &self.config.item_descriptor,
        )
        .with_category(Category {
            name: source_name.to_string(),
            description: self.config.category_description.clone(),
            contains: vec![Item::from_dataset(dataset, &self.config.item_description)],
        })
    }

    /// Write the document as `<output_dir>/<name>.yml`
    pub fn write_document(&self, document: &DataDictionary, name: &str) -> PipelineResult<PathBuf> {
        let path = self.output_path(name, DOCUMENT_EXTENSION);
        self.create_parent(&path)?;
        let file = File::create(&path)
            .map_err(|e| PipelineError::io_with_path(&path, "failed to create document", e))?;
        let mut writer = BufWriter::new(file);
        document
            .to_writer(&mut writer)
            .map_err(|e| PipelineError::yaml(&path, e))?;
        writer
            .flush()
            .map_err(|e| PipelineError::io_with_path(&path, "failed to write document", e))?;
        info!(
            path = %path.display(),
            columns = document.column_count(),
            "Wrote dictionary document"
        );
        Ok(path)
    }

    /// Load a document written by [`write_document`](Self::write_document) or by hand
    pub fn load_document(path: impl AsRef<Path>) -> PipelineResult<DataDictionary> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PipelineError::io_with_path(path, "failed to read document", e))?;
        DataDictionary::from_reader(BufReader::new(file)).map_err(|e| PipelineError::yaml(path, e))
    }

    /// Render the document to `<output_dir>/<name>.rst`.
    ///
    /// The output file is only created once rendering has succeeded.
    pub fn render_document(&self, document: &DataDictionary, name: &str) -> PipelineResult<PathBuf> {
        let mut renderer = TemplateRenderer::new(&self.config.template_dir);
        renderer.load_template(&self.config.template_name)?;
        let text = renderer.render(&self.config.template_name, document)?;

        let path = self.output_path(name, RENDERED_EXTENSION);
        self.write_artifact(&path, &text)?;
        info!(
            path = %path.display(),
            template = %self.config.template_name,
            "Rendered dictionary"
        );
        Ok(path)
    }

    fn generate(
        &self,
        schema: SourceSchema,
        introspect: StageOutput,
    ) -> PipelineResult<PipelineReport> {
        let mut stages = vec![introspect];

        let dataset = self.build_dataset(&schema);
        let document = self.build_document(&schema.name, &dataset);
        if let Ok(yaml) = document.to_yaml_string() {
            debug!("Built dictionary document:\n{yaml}");
        }

        let start = Instant::now();
        let document_path = self.write_document(&document, &schema.name)?;
        stages.push(StageOutput {
            stage: PipelineStage::Serialize,
            skipped: false,
            artifact: Some(document_path),
            duration_ms: elapsed_ms(start),
        });

        if self.config.render {
            let start = Instant::now();
            let rendered = self.render_document(&document, &schema.name)?;
            stages.push(StageOutput {
                stage: PipelineStage::Render,
                skipped: false,
                artifact: Some(rendered),
                duration_ms: elapsed_ms(start),
            });
        } else {
            debug!(stage = PipelineStage::Render.name(), "Skipping stage");
            stages.push(StageOutput {
                stage: PipelineStage::Render,
                skipped: true,
                artifact: None,
                duration_ms: 0,
            });
        }

        Ok(PipelineReport { stages, document })
    }

    fn render_only(&self, path: &Path) -> PipelineResult<PipelineReport> {
        if !self.config.render {
            warn!("Render stage cannot be disabled when rendering an existing document");
        }

        let start = Instant::now();
        let document = Self::load_document(path)?;
        let load = StageOutput {
            stage: PipelineStage::Load,
            skipped: false,
            artifact: None,
            duration_ms: elapsed_ms(start),
        };

        let start = Instant::now();
        let rendered = self.render_document(&document, &self.config.render_output_name)?;
        let render = StageOutput {
            stage: PipelineStage::Render,
            skipped: false,
            artifact: Some(rendered),
            duration_ms: elapsed_ms(start),
        };

        Ok(PipelineReport {
            stages: vec![load, render],
            document,
        })
    }

    fn output_path(&self, name: &str, extension: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.{}", sanitize_filename(name), extension))
    }

    fn create_parent(&self, path: &Path) -> PipelineResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                PipelineError::io_with_path(parent, "failed to create output directory", e)
            })?;
        }
        Ok(())
    }

    fn write_artifact(&self, path: &Path, content: &str) -> PipelineResult<()> {
        self.create_parent(path)?;
        std::fs::write(path, content)
            .map_err(|e| PipelineError::io_with_path(path, "failed to write file", e))
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Sanitize a filename by removing invalid characters
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
