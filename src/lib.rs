//! Geo Data Dictionary - data dictionaries from geospatial schemas
//!
//! Provides:
//! - Schema readers for geospatial sources (shapefile/dBase, GeoJSON)
//! - Type-string decomposition (`str:80`, `float:24.15`, ...)
//! - The dataset / column model and the intermediate YAML document
//! - Template rendering of that document to reStructuredText
//! - A pipeline tying the stages together

pub mod cli;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use models::{
    AllowsNulls, Category, ColumnEntry, ColumnRecord, ColumnSpec, DataDictionary, DatasetEntry,
    Item, TypeDescriptor, TypeQualifier,
};
pub use pipeline::{
    DictionaryConfig, DictionaryPipeline, PipelineError, PipelineInput, PipelineReport,
    PipelineResult, PipelineStage, run_pipeline,
};
pub use render::{RenderError, TemplateRenderer};
pub use source::{SchemaReader, SourceError, SourceSchema};
