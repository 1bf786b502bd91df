//! Geospatial schema sources
//!
//! A source supplies two things: a name and an ordered mapping from field name
//! to a compact type string (`str:80`, `float:24.15`, `int:10`, `date`).
//! Readers only look at schema information, never at feature data.
//!
//! Supported formats:
//! - Shapefile / dBase (`.shp`, `.dbf`) via the attribute table header
//! - GeoJSON (`.geojson`, `.json`)

pub mod dbf;
pub mod geojson;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use dbf::DbfReader;
pub use geojson::GeoJsonReader;

/// Error type for source access
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported source format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("IO error with {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed source {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

impl SourceError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound(path.to_path_buf())
        } else {
            SourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn malformed(path: &Path, message: impl Into<String>) -> Self {
        SourceError::Malformed {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Schema of an opened source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSchema {
    /// Source (layer) name
    pub name: String,
    /// Field name to type string, in the source's native field order
    pub properties: Vec<(String, String)>,
}

impl SourceSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        self.properties.push((name.into(), data_type.into()));
        self
    }
}

/// Trait for schema readers
pub trait SchemaReader {
    /// Short format name used in log output
    fn format_name(&self) -> &'static str;

    /// Whether this reader handles the given path
    fn supports(&self, path: &Path) -> bool;

    /// Read the schema of the source at `path`
    fn read_schema(&self, path: &Path) -> Result<SourceSchema, SourceError>;
}

pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Open a source and read its schema, picking the reader by file extension.
pub fn open(path: impl AsRef<Path>) -> Result<SourceSchema, SourceError> {
    let path = path.as_ref();
    let readers: [&dyn SchemaReader; 2] = [&DbfReader, &GeoJsonReader];

    let reader = readers
        .into_iter()
        .find(|r| r.supports(path))
        .ok_or_else(|| SourceError::UnsupportedFormat(path.to_path_buf()))?;

    debug!(path = %path.display(), format = reader.format_name(), "Opening source");
    let schema = reader.read_schema(path)?;
    info!(
        source = %schema.name,
        fields = schema.properties.len(),
        "Read source schema"
    );
    Ok(schema)
}
