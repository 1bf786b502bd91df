//! Dataset model for the data dictionary

use super::column::{ColumnEntry, ColumnSpec};

/// One table or feature class and its columns in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetEntry {
    pub name: String,
    pub columns: Vec<ColumnEntry>,
}

impl DatasetEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column built from `spec`.
    ///
    /// Names and orders are not checked for uniqueness.
    pub fn add_column(&mut self, spec: ColumnSpec) -> &ColumnEntry {
        self.columns.push(ColumnEntry::from(spec));
        &self.columns[self.columns.len() - 1]
    }
}
