//! Operator catalog
//!
//! Maps a field's declared type to the query operators it offers. The first
//! operator in each row is the default selection. The catalog is advisory:
//! composition never re-validates operator legality.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::FieldType;

/// A query operator, named after its DSL keyword
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Match,
    MatchPhrase,
    Wildcard,
    Term,
    Terms,
    Prefix,
    Range,
    Exists,
}

impl Operator {
    /// The DSL keyword for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Match => "match",
            Operator::MatchPhrase => "match_phrase",
            Operator::Wildcard => "wildcard",
            Operator::Term => "term",
            Operator::Terms => "terms",
            Operator::Prefix => "prefix",
            Operator::Range => "range",
            Operator::Exists => "exists",
        }
    }

    /// Legal operators for a declared field type. Never empty; unknown
    /// types get the default row.
    pub fn for_field_type(field_type: &FieldType) -> &'static [Operator] {
        use Operator::*;
        match field_type {
            FieldType::Text => &[Match, MatchPhrase, Wildcard, Term, Terms, Exists],
            FieldType::Keyword => &[Term, Terms, Prefix, Exists],
            FieldType::Date => &[Range, Term, Terms, Exists],
            numeric if numeric.is_numeric() => &[Range, Term, Terms, Exists],
            _ => &[Match, Term, Terms, Exists],
        }
    }

    /// Default operator for a declared field type (first catalog entry)
    pub fn default_for(field_type: &FieldType) -> Operator {
        Self::for_field_type(field_type)[0]
    }

    /// Whether this operator consumes a value at all
    pub fn takes_value(&self) -> bool {
        !matches!(self, Operator::Exists)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_operators() {
        let types = [
            FieldType::Text,
            FieldType::Keyword,
            FieldType::Date,
            FieldType::Integer,
            FieldType::Long,
            FieldType::Float,
            FieldType::Double,
            FieldType::Boolean,
            FieldType::Nested,
            FieldType::Object,
            FieldType::Other("ip".to_string()),
        ];
        for field_type in types {
            assert!(!Operator::for_field_type(&field_type).is_empty());
        }
    }

    #[test]
    fn test_catalog_rows() {
        use Operator::*;
        assert_eq!(
            Operator::for_field_type(&FieldType::Text),
            &[Match, MatchPhrase, Wildcard, Term, Terms, Exists]
        );
        assert_eq!(
            Operator::for_field_type(&FieldType::Keyword),
            &[Term, Terms, Prefix, Exists]
        );
        assert_eq!(
            Operator::for_field_type(&FieldType::Date),
            &[Range, Term, Terms, Exists]
        );
        assert_eq!(
            Operator::for_field_type(&FieldType::Long),
            &[Range, Term, Terms, Exists]
        );
        assert_eq!(
            Operator::for_field_type(&FieldType::Other("ip".to_string())),
            &[Match, Term, Terms, Exists]
        );
    }

    #[test]
    fn test_default_operator_is_first() {
        assert_eq!(Operator::default_for(&FieldType::Text), Operator::Match);
        assert_eq!(Operator::default_for(&FieldType::Keyword), Operator::Term);
        assert_eq!(Operator::default_for(&FieldType::Date), Operator::Range);
        assert_eq!(Operator::default_for(&FieldType::Nested), Operator::Match);
    }

    #[test]
    fn test_serde_names_match_dsl_keywords() {
        let json = serde_json::to_string(&Operator::MatchPhrase).unwrap();
        assert_eq!(json, "\"match_phrase\"");
        let parsed: Operator = serde_json::from_str("\"wildcard\"").unwrap();
        assert_eq!(parsed, Operator::Wildcard);
    }

    #[test]
    fn test_takes_value() {
        assert!(!Operator::Exists.takes_value());
        assert!(Operator::Terms.takes_value());
    }
}
