//! Error types for pipeline operations
//!
//! Every error aborts the run. Source and template errors are carried
//! unchanged from the reader and renderer.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::render::RenderError;
use crate::source::SourceError;

/// Errors that can occur during a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Pipeline configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Neither a source nor a document was supplied
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// Source could not be opened or read
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Template missing or failed to render
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Document could not be written or parsed
    #[error("YAML error with {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO error with path context
    #[error("IO error with {}: {message}", .path.display())]
    IoErrorWithPath {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Create an IO error with path context
    pub fn io_with_path(
        path: impl AsRef<Path>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::IoErrorWithPath {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            source,
        }
    }

    pub fn yaml(path: impl AsRef<Path>, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether the error was raised before any I/O took place
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::ConfigError(_) | Self::MissingInput(_))
    }
}
