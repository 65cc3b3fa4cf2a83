//! Inner clause construction
//!
//! Builds the atomic condition object for one field configuration. Raw
//! values pass through verbatim; the downstream search engine is the
//! validator.

use serde_json::{json, Value};

use super::operators::Operator;
use super::types::FieldConfig;

/// Build the inner clause for a single field configuration.
///
/// `terms` values are comma-separated; tokens are trimmed, empty tokens
/// are kept.
pub fn inner_clause(config: &FieldConfig) -> Value {
    match config.operator {
        Operator::Exists => json!({ "exists": { "field": &config.field } }),
        Operator::Terms => {
            let values: Vec<String> = config
                .value
                .split(',')
                .map(|token| token.trim().to_string())
                .collect();
            json!({ "terms": { config.field.as_str(): values } })
        }
        operator => json!({ operator.as_str(): { config.field.as_str(): &config.value } }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::BooleanRole;

    #[test]
    fn test_exists_clause() {
        let config = FieldConfig::new("author.email", Operator::Exists);
        assert_eq!(
            inner_clause(&config),
            json!({ "exists": { "field": "author.email" } })
        );
    }

    #[test]
    fn test_terms_clause_splits_and_trims() {
        let config = FieldConfig::new("tags", Operator::Terms).with_value("a, b ,c");
        assert_eq!(
            inner_clause(&config),
            json!({ "terms": { "tags": ["a", "b", "c"] } })
        );
    }

    #[test]
    fn test_terms_clause_keeps_empty_tokens() {
        let config = FieldConfig::new("tags", Operator::Terms).with_value("a,,b,");
        assert_eq!(
            inner_clause(&config),
            json!({ "terms": { "tags": ["a", "", "b", ""] } })
        );
    }

    #[test]
    fn test_single_value_clause() {
        let config = FieldConfig::new("title", Operator::MatchPhrase).with_value("rust weekly");
        assert_eq!(
            inner_clause(&config),
            json!({ "match_phrase": { "title": "rust weekly" } })
        );
    }

    #[test]
    fn test_value_is_not_coerced() {
        // Range values stay raw strings; the search engine rejects bad ones
        let config = FieldConfig::new("views", Operator::Range).with_value("not-a-number");
        assert_eq!(
            inner_clause(&config),
            json!({ "range": { "views": "not-a-number" } })
        );
    }

    #[test]
    fn test_role_does_not_affect_clause_shape() {
        let simple = FieldConfig::new("status", Operator::Term).with_value("active");
        let filtered = simple.clone().with_role(BooleanRole::Filter);
        assert_eq!(inner_clause(&simple), inner_clause(&filtered));
    }
}
