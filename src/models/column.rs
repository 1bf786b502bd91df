//! Column model for the data dictionary

use super::type_spec::{TypeDescriptor, TypeQualifier};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nullability flag as written in the dictionary
///
/// `Y` allows nulls. Both `N` and `F` mark a column that does not; `F` is what
/// the introspection pipeline writes for freshly discovered columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AllowsNulls {
    #[default]
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
    #[serde(rename = "F")]
    False,
}

impl AllowsNulls {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
            Self::False => "F",
        }
    }
}

impl fmt::Display for AllowsNulls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AllowsNulls {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "Y" => Ok(Self::Yes),
            "N" => Ok(Self::No),
            "F" => Ok(Self::False),
            _ => Err(format!("Unknown allows_nulls value: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for AllowsNulls {
    /// Accepts the flag in either case, as hand-edited documents do
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// One field of a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub name: String,
    pub data_type: String,
    pub qualifier: TypeQualifier,
    pub allows_nulls: AllowsNulls,
    pub description: String,
    /// Display order (1-based) when assigned
    pub order: Option<u32>,
}

impl ColumnEntry {
    pub fn length(&self) -> &str {
        self.qualifier.length()
    }

    pub fn precision(&self) -> &str {
        self.qualifier.precision()
    }

    pub fn scale(&self) -> &str {
        self.qualifier.scale()
    }
}

impl From<ColumnSpec> for ColumnEntry {
    /// Build a column from its spec.
    ///
    /// A type string with a `:` or `.` marker is decomposed, and the decomposed
    /// qualifier replaces whatever qualifier the spec carried explicitly.
    fn from(spec: ColumnSpec) -> Self {
        let (data_type, qualifier) = if TypeDescriptor::has_markers(&spec.data_type) {
            let parsed = TypeDescriptor::parse(&spec.data_type);
            (parsed.data_type, parsed.qualifier)
        } else {
            (spec.data_type, spec.qualifier)
        };

        Self {
            name: spec.name,
            data_type,
            qualifier,
            allows_nulls: spec.allows_nulls,
            description: spec.description,
            order: spec.order,
        }
    }
}

/// Parameters for [`DatasetEntry::add_column`](super::DatasetEntry::add_column)
///
/// # Example
///
/// ```rust
/// use geo_data_dictionary::models::{AllowsNulls, ColumnSpec};
///
/// let spec = ColumnSpec::new("area", "float")
///     .with_precision_scale("24", "15")
///     .with_allows_nulls(AllowsNulls::No)
///     .with_order(3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: String,
    pub qualifier: TypeQualifier,
    pub allows_nulls: AllowsNulls,
    pub description: String,
    pub order: Option<u32>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            qualifier: TypeQualifier::None,
            allows_nulls: AllowsNulls::default(),
            description: String::new(),
            order: None,
        }
    }

    /// Set an explicit length. Replaces any precision/scale.
    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.qualifier = TypeQualifier::Length(length.into());
        self
    }

    /// Set explicit precision and scale. Replaces any length.
    pub fn with_precision_scale(
        mut self,
        precision: impl Into<String>,
        scale: impl Into<String>,
    ) -> Self {
        self.qualifier = TypeQualifier::PrecisionScale {
            precision: precision.into(),
            scale: scale.into(),
        };
        self
    }

    pub fn with_allows_nulls(mut self, allows_nulls: AllowsNulls) -> Self {
        self.allows_nulls = allows_nulls;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_construction_defaults() {
        let column = ColumnEntry::from(ColumnSpec::new("id", "int"));
        assert_eq!(column.name, "id");
        assert_eq!(column.data_type, "int");
        assert_eq!(column.allows_nulls, AllowsNulls::Yes);
        assert_eq!(column.description, "");
        assert_eq!(column.order, None);
        assert_eq!((column.length(), column.precision(), column.scale()), ("", "", ""));
    }

    #[test]
    fn test_explicit_qualifier_kept_without_markers() {
        let column = ColumnEntry::from(ColumnSpec::new("code", "str").with_length("12"));
        assert_eq!(column.data_type, "str");
        assert_eq!(column.length(), "12");
    }

    #[test]
    fn test_decomposition_wins_over_explicit_qualifier() {
        let column = ColumnEntry::from(
            ColumnSpec::new("area", "float:24.15").with_length("99"),
        );
        assert_eq!(column.data_type, "float");
        assert_eq!(column.length(), "");
        assert_eq!(column.precision(), "24");
        assert_eq!(column.scale(), "15");
    }

    #[test]
    fn test_last_qualifier_builder_wins() {
        let spec = ColumnSpec::new("x", "float")
            .with_length("5")
            .with_precision_scale("10", "2");
        let column = ColumnEntry::from(spec);
        assert_eq!(column.length(), "");
        assert_eq!(column.precision(), "10");
    }

    #[test]
    fn test_allows_nulls_parse() {
        assert_eq!("y".parse::<AllowsNulls>().unwrap(), AllowsNulls::Yes);
        assert_eq!("N".parse::<AllowsNulls>().unwrap(), AllowsNulls::No);
        assert_eq!("F".parse::<AllowsNulls>().unwrap(), AllowsNulls::False);
        assert!("maybe".parse::<AllowsNulls>().is_err());
    }

    #[test]
    fn test_allows_nulls_yaml_ignores_case() {
        let flags: Vec<AllowsNulls> = serde_yaml::from_str("[y, n, f, ' Y ']").unwrap();
        assert_eq!(
            flags,
            vec![AllowsNulls::Yes, AllowsNulls::No, AllowsNulls::False, AllowsNulls::Yes]
        );
        assert!(serde_yaml::from_str::<AllowsNulls>("maybe").is_err());
        assert_eq!(serde_yaml::to_string(&AllowsNulls::False).unwrap().trim(), "F");
    }
}
