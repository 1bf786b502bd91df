//! Intermediate dictionary document
//!
//! The YAML file written between introspection and rendering. Its shape is
//! `categories -> contains (items) -> contains (column records)`, with two
//! labels naming what a category and an item are. Field order in these structs
//! is the key order in the written file.

use super::column::{AllowsNulls, ColumnEntry};
use super::dataset::DatasetEntry;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::{Read, Write};

/// Root of the intermediate document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDictionary {
    pub category_descriptor: String,
    pub item_descriptor: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A grouping of items, e.g. one geospatial source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contains: Vec<Item>,
}

/// A described table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contains: Vec<ColumnRecord>,
}

/// A column as persisted in the document
///
/// `length`, `precision` and `scale` are empty strings when unset. Hand-edited
/// files may carry them as numbers, which are read back as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub name: String,
    pub data_type: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub length: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub precision: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub scale: String,
    #[serde(default)]
    pub allows_nulls: AllowsNulls,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_order"
    )]
    pub order: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Real(f64),
    Flag(bool),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Integer(i)) => i.to_string(),
        Some(Scalar::Real(f)) => f.to_string(),
        Some(Scalar::Flag(b)) => b.to_string(),
    })
}

/// Reads `order` from an integer, a numeric string, or an empty value
fn optional_order<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid order: {s:?}"))),
        Some(Scalar::Integer(i)) => u32::try_from(i)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid order: {i}"))),
        Some(Scalar::Real(f)) => Err(D::Error::custom(format!("invalid order: {f}"))),
        Some(Scalar::Flag(b)) => Err(D::Error::custom(format!("invalid order: {b}"))),
    }
}

impl From<&ColumnEntry> for ColumnRecord {
    fn from(column: &ColumnEntry) -> Self {
        Self {
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            length: column.length().to_string(),
            precision: column.precision().to_string(),
            scale: column.scale().to_string(),
            allows_nulls: column.allows_nulls,
            description: column.description.clone(),
            order: column.order,
        }
    }
}

impl Item {
    pub fn from_dataset(dataset: &DatasetEntry, description: impl Into<String>) -> Self {
        Self {
            name: dataset.name.clone(),
            description: description.into(),
            contains: dataset.columns.iter().map(ColumnRecord::from).collect(),
        }
    }
}

impl DataDictionary {
    pub fn new(category_descriptor: impl Into<String>, item_descriptor: impl Into<String>) -> Self {
        Self {
            category_descriptor: category_descriptor.into(),
            item_descriptor: item_descriptor.into(),
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// All items across all categories, in document order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.categories.iter().flat_map(|c| c.contains.iter())
    }

    pub fn column_count(&self) -> usize {
        self.items().map(|i| i.contains.len()).sum()
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), serde_yaml::Error> {
        serde_yaml::to_writer(writer, self)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
