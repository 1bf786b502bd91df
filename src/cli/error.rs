//! CLI error type

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::PipelineError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load config {}: {}", .0.display(), .1)]
    ConfigLoad(PathBuf, String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    /// Process exit code: 2 for usage errors, 1 for everything else
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Pipeline(e) if e.is_usage_error() => 2,
            _ => 1,
        }
    }
}
