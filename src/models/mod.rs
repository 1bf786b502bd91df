//! Models module for the data dictionary
//!
//! Defines the transient entity graph built from a source schema
//! (`DatasetEntry` -> `ColumnEntry`), the type-string decomposer, and the
//! durable intermediate document written to YAML.

pub mod column;
pub mod dataset;
pub mod document;
pub mod type_spec;

pub use column::{AllowsNulls, ColumnEntry, ColumnSpec};
pub use dataset::DatasetEntry;
pub use document::{Category, ColumnRecord, DataDictionary, Item};
pub use type_spec::{TypeDescriptor, TypeQualifier};
