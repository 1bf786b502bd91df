//! GeoJSON schema reader
//!
//! GeoJSON has no declared schema, so field types are inferred from the
//! `properties` of every feature. Keys keep the order in which they are first
//! seen. A field seen as both integer and real becomes `float`; any other mix,
//! nested values and all-null fields become `str`.

use super::{SchemaReader, SourceError, SourceSchema, file_stem, has_extension};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Unknown,
    Integer,
    Real,
    Boolean,
    Text,
}

impl FieldKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Unknown,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Real,
            _ => Self::Text,
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (Self::Unknown, b) => b,
            (a, Self::Unknown) => a,
            (Self::Integer, Self::Real) | (Self::Real, Self::Integer) => Self::Real,
            _ => Self::Text,
        }
    }

    fn type_string(self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Real => "float",
            Self::Boolean => "bool",
            Self::Unknown | Self::Text => "str",
        }
    }
}

/// Infer the ordered field mapping from a parsed GeoJSON document
pub fn infer_properties(document: &Value) -> Result<Vec<(String, String)>, String> {
    let features: Vec<&Value> = match document.get("type").and_then(|t| t.as_str()) {
        Some("FeatureCollection") => document
            .get("features")
            .and_then(|f| f.as_array())
            .ok_or_else(|| "FeatureCollection without a features array".to_string())?
            .iter()
            .collect(),
        Some("Feature") => vec![document],
        Some(other) => return Err(format!("unsupported GeoJSON type '{}'", other)),
        None => return Err("missing GeoJSON 'type' member".to_string()),
    };

    let mut fields: Vec<(String, FieldKind)> = Vec::new();
    for feature in features {
        let Some(properties) = feature.get("properties").and_then(|p| p.as_object()) else {
            continue;
        };
        for (key, value) in properties {
            let kind = FieldKind::of(value);
            match fields.iter_mut().find(|(name, _)| name == key) {
                Some((_, existing)) => *existing = existing.merge(kind),
                None => fields.push((key.clone(), kind)),
            }
        }
    }

    Ok(fields
        .into_iter()
        .map(|(name, kind)| (name, kind.type_string().to_string()))
        .collect())
}

/// Reader for `.geojson` and `.json` sources
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoJsonReader;

impl SchemaReader for GeoJsonReader {
    fn format_name(&self) -> &'static str {
        "GeoJSON"
    }

    fn supports(&self, path: &Path) -> bool {
        has_extension(path, &["geojson", "json"])
    }

    fn read_schema(&self, path: &Path) -> Result<SourceSchema, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::io(path, e))?;
        let document: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SourceError::malformed(path, format!("invalid JSON: {}", e)))?;

        let properties =
            infer_properties(&document).map_err(|m| SourceError::malformed(path, m))?;
        let name = document
            .get("name")
            .and_then(|n| n.as_str())
            .map(|n| n.to_string())
            .unwrap_or_else(|| file_stem(path));

        Ok(SourceSchema { name, properties })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn types(document: Value) -> Vec<(String, String)> {
        infer_properties(&document).unwrap()
    }

    #[test]
    fn test_first_seen_order_and_basic_types() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null,
                 "properties": {"zeta": 1, "alpha": "a", "open": true}},
                {"type": "Feature", "geometry": null,
                 "properties": {"zeta": 2, "alpha": "b", "height": 2.5}}
            ]
        });
        assert_eq!(
            types(doc),
            vec![
                ("zeta".to_string(), "int".to_string()),
                ("alpha".to_string(), "str".to_string()),
                ("open".to_string(), "bool".to_string()),
                ("height".to_string(), "float".to_string()),
            ]
        );
    }

    #[test]
    fn test_integer_widens_to_float() {
        let doc = json!({"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"v": 1}},
            {"type": "Feature", "properties": {"v": 1.5}}
        ]});
        assert_eq!(types(doc)[0].1, "float");
    }

    #[test]
    fn test_null_and_conflicts_become_str() {
        let doc = json!({"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"n": null, "mixed": 1, "nested": {"a": 1}}},
            {"type": "Feature", "properties": {"n": null, "mixed": "one", "nested": [1]}}
        ]});
        let t = types(doc);
        assert_eq!(t[0].1, "str");
        assert_eq!(t[1].1, "str");
        assert_eq!(t[2].1, "str");
    }

    #[test]
    fn test_null_does_not_override_known_type() {
        let doc = json!({"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"v": null}},
            {"type": "Feature", "properties": {"v": 3}}
        ]});
        assert_eq!(types(doc)[0].1, "int");
    }

    #[test]
    fn test_single_feature_and_invalid_type() {
        let doc = json!({"type": "Feature", "properties": {"id": 7}});
        assert_eq!(types(doc), vec![("id".to_string(), "int".to_string())]);

        assert!(infer_properties(&json!({"type": "Point", "coordinates": [0, 0]})).is_err());
        assert!(infer_properties(&json!({"features": []})).is_err());
    }
}
