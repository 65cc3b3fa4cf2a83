//! Field type resolution
//!
//! Declared types from the mapping drive which operators a field offers.

use std::fmt;

/// Declared type of a mapping field
///
/// Parsed from the `type` string in the mapping. Types the catalog does not
/// know are preserved in `Other` so they still resolve to an operator set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FieldType {
    /// Full-text searchable field (the fail-open default)
    #[default]
    Text,
    /// Exact-match keyword field
    Keyword,
    /// Date/time field
    Date,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    /// Independent sub-document scope and grouping boundary
    Nested,
    Object,
    /// Any declared type the catalog has no dedicated row for
    Other(String),
}

impl FieldType {
    /// Parse a declared type name from a mapping
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => FieldType::Text,
            "keyword" => FieldType::Keyword,
            "date" => FieldType::Date,
            "integer" => FieldType::Integer,
            "long" => FieldType::Long,
            "float" => FieldType::Float,
            "double" => FieldType::Double,
            "boolean" => FieldType::Boolean,
            "nested" => FieldType::Nested,
            "object" => FieldType::Object,
            other => FieldType::Other(other.to_string()),
        }
    }

    /// The declared type name as it appears in a mapping
    pub fn name(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Date => "date",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::Nested => "nested",
            FieldType::Object => "object",
            FieldType::Other(name) => name,
        }
    }

    /// Check if this type supports range queries
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldType::Integer | FieldType::Long | FieldType::Float | FieldType::Double
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
