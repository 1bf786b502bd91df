//! Type-string decomposition
//!
//! Geospatial readers report field types as compact strings such as `str:80`,
//! `float:24.15` or `date`. [`TypeDescriptor::parse`] splits those into a base
//! type plus an optional qualifier.
//!
//! Precedence (first match wins):
//! 1. `<base>:<precision>.<scale>` - a `:` qualifier that contains a `.`
//! 2. `<base>:<length>` - a `:` qualifier without a `.`
//! 3. `<base>` - everything else
//!
//! Only the first `:` and the first `.` after it act as separators. Any later
//! separator is kept as literal text of the segment it appears in, so
//! `a:b:c.d` yields base `a`, precision `b:c` and scale `d`.

use std::fmt;

/// Character separating the base type from its qualifier
pub const QUALIFIER_MARKER: char = ':';
/// Character separating precision from scale inside a qualifier
pub const SCALE_MARKER: char = '.';

/// Size qualifier attached to a base type
///
/// A type carries a length, a precision/scale pair, or nothing. Never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TypeQualifier {
    #[default]
    None,
    Length(String),
    PrecisionScale { precision: String, scale: String },
}

impl TypeQualifier {
    pub fn length(&self) -> &str {
        match self {
            Self::Length(length) => length,
            _ => "",
        }
    }

    pub fn precision(&self) -> &str {
        match self {
            Self::PrecisionScale { precision, .. } => precision,
            _ => "",
        }
    }

    pub fn scale(&self) -> &str {
        match self {
            Self::PrecisionScale { scale, .. } => scale,
            _ => "",
        }
    }
}

/// Normalized type: base type plus qualifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub data_type: String,
    pub qualifier: TypeQualifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Base,
    Qualifier,
    Scale,
}

impl TypeDescriptor {
    /// Decompose a compact type string. Never fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geo_data_dictionary::models::TypeDescriptor;
    ///
    /// let ty = TypeDescriptor::parse("float:10.2");
    /// assert_eq!(ty.data_type, "float");
    /// assert_eq!(ty.precision(), "10");
    /// assert_eq!(ty.scale(), "2");
    /// assert_eq!(ty.length(), "");
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut state = ScanState::Base;
        let mut base = String::new();
        let mut qualifier = String::new();
        let mut scale = String::new();

        for ch in input.chars() {
            match (state, ch) {
                (ScanState::Base, QUALIFIER_MARKER) => state = ScanState::Qualifier,
                (ScanState::Base, _) => base.push(ch),
                (ScanState::Qualifier, SCALE_MARKER) => state = ScanState::Scale,
                (ScanState::Qualifier, _) => qualifier.push(ch),
                (ScanState::Scale, _) => scale.push(ch),
            }
        }

        let qualifier = match state {
            ScanState::Base => TypeQualifier::None,
            ScanState::Qualifier if qualifier.is_empty() => TypeQualifier::None,
            ScanState::Qualifier => TypeQualifier::Length(qualifier),
            ScanState::Scale => TypeQualifier::PrecisionScale {
                precision: qualifier,
                scale,
            },
        };

        Self {
            data_type: base,
            qualifier,
        }
    }

    /// Whether a raw type string carries a qualifier marker
    pub fn has_markers(input: &str) -> bool {
        input.contains(QUALIFIER_MARKER) || input.contains(SCALE_MARKER)
    }

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

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            TypeQualifier::None => write!(f, "{}", self.data_type),
            TypeQualifier::Length(length) => {
                write!(f, "{}{}{}", self.data_type, QUALIFIER_MARKER, length)
            }
            TypeQualifier::PrecisionScale { precision, scale } => write!(
                f,
                "{}{}{}{}{}",
                self.data_type, QUALIFIER_MARKER, precision, SCALE_MARKER, scale
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(ty: &TypeDescriptor) -> (&str, &str, &str, &str) {
        (&ty.data_type, ty.length(), ty.precision(), ty.scale())
    }

    #[test]
    fn test_precision_and_scale() {
        let ty = TypeDescriptor::parse("float:10.2");
        assert_eq!(parts(&ty), ("float", "", "10", "2"));
    }

    #[test]
    fn test_length_only() {
        let ty = TypeDescriptor::parse("str:80");
        assert_eq!(parts(&ty), ("str", "80", "", ""));
    }

    #[test]
    fn test_plain_type() {
        let ty = TypeDescriptor::parse("int");
        assert_eq!(parts(&ty), ("int", "", "", ""));
        assert_eq!(ty.qualifier, TypeQualifier::None);
    }

    #[test]
    fn test_unknown_base_type_accepted() {
        let ty = TypeDescriptor::parse("geometry_thing:7");
        assert_eq!(parts(&ty), ("geometry_thing", "7", "", ""));
    }

    #[test]
    fn test_extra_separators_split_on_first_occurrence() {
        let ty = TypeDescriptor::parse("a:b:c.d");
        assert_eq!(parts(&ty), ("a", "", "b:c", "d"));

        let ty = TypeDescriptor::parse("float:10.2.5");
        assert_eq!(parts(&ty), ("float", "", "10", "2.5"));
    }

    #[test]
    fn test_dot_without_qualifier_stays_in_base() {
        let ty = TypeDescriptor::parse("a.b");
        assert_eq!(parts(&ty), ("a.b", "", "", ""));

        let ty = TypeDescriptor::parse("a.b:5");
        assert_eq!(parts(&ty), ("a.b", "5", "", ""));
    }

    #[test]
    fn test_empty_qualifier_is_none() {
        let ty = TypeDescriptor::parse("str:");
        assert_eq!(parts(&ty), ("str", "", "", ""));
        assert_eq!(ty.qualifier, TypeQualifier::None);
    }

    #[test]
    fn test_empty_precision_kept() {
        let ty = TypeDescriptor::parse("float:.2");
        assert_eq!(parts(&ty), ("float", "", "", "2"));
        assert!(matches!(ty.qualifier, TypeQualifier::PrecisionScale { .. }));
    }

    #[test]
    fn test_display_reassembles_type_string() {
        for input in ["float:10.2", "str:80", "int", "date"] {
            assert_eq!(TypeDescriptor::parse(input).to_string(), input);
        }
    }

    #[test]
    fn test_has_markers() {
        assert!(TypeDescriptor::has_markers("str:10"));
        assert!(TypeDescriptor::has_markers("a.b"));
        assert!(!TypeDescriptor::has_markers("int"));
    }
}
