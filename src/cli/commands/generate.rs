//! Generate command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::{format_report, format_stage_summary};
use crate::pipeline::{DictionaryConfig, DictionaryPipeline, PipelineInput, PipelineReport};

/// Arguments for a dictionary run
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Geospatial source to introspect
    pub file: Option<PathBuf>,
    /// Existing dictionary document to render
    pub rst_only: Option<PathBuf>,
    /// Skip the render stage after introspection
    pub no_rst: bool,
    /// Template directory override
    pub template_dir: Option<PathBuf>,
    /// Template name override
    pub template: Option<String>,
    /// Output directory override
    pub output_dir: Option<PathBuf>,
    /// TOML configuration file
    pub config_file: Option<PathBuf>,
    /// Print a stage summary
    pub verbose: bool,
}

/// Build the effective configuration: file values first, then flags
pub fn resolve_config(args: &GenerateArgs) -> Result<DictionaryConfig, CliError> {
    let mut config = match &args.config_file {
        Some(path) => DictionaryConfig::from_toml_file(path)
            .map_err(|e| CliError::ConfigLoad(path.clone(), e.to_string()))?,
        None => DictionaryConfig::default(),
    };

    if let Some(dir) = &args.template_dir {
        config = config.with_template_dir(dir);
    }
    if let Some(name) = &args.template {
        config = config.with_template_name(name);
    }
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    if args.no_rst {
        config = config.with_render(false);
    }
    Ok(config)
}

/// Handle a dictionary run
pub fn handle_generate(args: &GenerateArgs) -> Result<PipelineReport, CliError> {
    // Input is checked before any file is touched
    let input = PipelineInput::from_options(args.file.clone(), args.rst_only.clone())?;
    let config = resolve_config(args)?;

    let pipeline = DictionaryPipeline::new(config)?;
    let report = pipeline.run(&input)?;

    for line in format_report(&report) {
        println!("{}", line);
    }
    if args.verbose {
        eprint!("{}", format_stage_summary(&report));
    }

    Ok(report)
}
