//! Query composition
//!
//! Folds a list of field configurations and query-level options into one
//! boolean query document.

use serde_json::{json, Map, Value};
use tracing::debug;

use super::clause::inner_clause;
use super::types::{BooleanRole, FieldConfig, QueryDocument, QueryOptions};

/// Bucket size of the generated terms aggregation
const AGGREGATION_SIZE: u64 = 10;

/// Clause lists for one bool scope
#[derive(Debug, Default)]
struct ClauseLists {
    must: Vec<Value>,
    should: Vec<Value>,
    filter: Vec<Value>,
}

impl ClauseLists {
    fn push(&mut self, role: BooleanRole, clause: Value) {
        match role {
            BooleanRole::Should => self.should.push(clause),
            BooleanRole::Filter => self.filter.push(clause),
            BooleanRole::Simple | BooleanRole::Must => self.must.push(clause),
        }
    }

    /// Top-level list a nested wrapper joins: must wins over should,
    /// should over filter. One nested path never feeds more than one list.
    fn wrapper_role(&self) -> BooleanRole {
        if !self.must.is_empty() {
            BooleanRole::Must
        } else if !self.should.is_empty() {
            BooleanRole::Should
        } else {
            BooleanRole::Filter
        }
    }

    /// Render as a `bool` body, omitting empty lists. A non-empty `should`
    /// list carries `minimum_should_match: 1`.
    fn into_bool_body(self) -> Map<String, Value> {
        let mut body = Map::new();
        if !self.must.is_empty() {
            body.insert("must".to_string(), Value::Array(self.must));
        }
        if !self.should.is_empty() {
            body.insert("should".to_string(), Value::Array(self.should));
            body.insert("minimum_should_match".to_string(), json!(1));
        }
        if !self.filter.is_empty() {
            body.insert("filter".to_string(), Value::Array(self.filter));
        }
        body
    }
}

/// Compose field configurations and options into a query document.
///
/// Pure and deterministic: identical inputs produce structurally identical
/// documents. Clauses group by role and nesting path, not by position; the
/// only position-sensitive output is the aggregation, which binds to the
/// first configuration.
pub fn compose(configs: &[FieldConfig], options: &QueryOptions) -> QueryDocument {
    let mut top = ClauseLists::default();
    // Nested buckets keyed by group path, in first-appearance order
    let mut nested: Vec<(String, ClauseLists)> = Vec::new();

    for config in configs {
        let clause = inner_clause(config);
        if config.is_nested && !config.nested_path.is_empty() {
            let index = match nested
                .iter()
                .position(|(path, _)| *path == config.nested_path)
            {
                Some(index) => index,
                None => {
                    nested.push((config.nested_path.clone(), ClauseLists::default()));
                    nested.len() - 1
                }
            };
            nested[index].1.push(config.role, clause);
        } else {
            top.push(config.role, clause);
        }
    }

    for (path, bucket) in nested {
        let role = bucket.wrapper_role();
        let wrapper = json!({
            "nested": {
                "path": path,
                "query": { "bool": bucket.into_bool_body() }
            }
        });
        top.push(role, wrapper);
    }

    let mut document = Map::new();
    document.insert(
        "query".to_string(),
        json!({ "bool": top.into_bool_body() }),
    );

    if options.track_total_hits {
        document.insert("track_total_hits".to_string(), json!(true));
    }

    if options.include_source {
        let source = if options.source_fields.is_empty() {
            json!(true)
        } else {
            json!(&options.source_fields)
        };
        document.insert("_source".to_string(), source);
    }

    if options.include_aggregation {
        if let Some(first) = configs.first() {
            let aggregation_key = format!("{}_aggs", first.field);
            document.insert(
                "aggs".to_string(),
                json!({
                    aggregation_key: {
                        "terms": { "field": &first.field, "size": AGGREGATION_SIZE }
                    }
                }),
            );
        }
    }

    debug!(clauses = configs.len(), "composed query document");
    QueryDocument::new(Value::Object(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::operators::Operator;
    use serde_json::json;

    fn quiet_options() -> QueryOptions {
        QueryOptions {
            track_total_hits: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_configs_empty_bool() {
        let doc = compose(&[], &quiet_options());
        assert_eq!(doc.into_value(), json!({ "query": { "bool": {} } }));
    }

    #[test]
    fn test_empty_configs_never_aggregate() {
        let options = QueryOptions {
            track_total_hits: false,
            include_aggregation: true,
            ..Default::default()
        };
        let doc = compose(&[], &options);
        assert_eq!(doc.as_value().get("aggs"), None);
    }

    #[test]
    fn test_simple_role_composes_as_must() {
        let configs = vec![FieldConfig::new("title", Operator::Match).with_value("rust")];
        let doc = compose(&configs, &quiet_options());
        assert_eq!(
            doc.into_value(),
            json!({ "query": { "bool": { "must": [ { "match": { "title": "rust" } } ] } } })
        );
    }

    #[test]
    fn test_should_list_sets_minimum_should_match() {
        let configs = vec![
            FieldConfig::new("title", Operator::Match)
                .with_value("rust")
                .with_role(BooleanRole::Should),
            FieldConfig::new("title", Operator::Match)
                .with_value("go")
                .with_role(BooleanRole::Should),
        ];
        let doc = compose(&configs, &quiet_options());
        assert_eq!(
            doc.into_value(),
            json!({ "query": { "bool": {
                "should": [
                    { "match": { "title": "rust" } },
                    { "match": { "title": "go" } }
                ],
                "minimum_should_match": 1
            } } })
        );
    }

    #[test]
    fn test_mixed_roles_in_one_nested_bucket_route_to_must() {
        let configs = vec![
            FieldConfig::new("comments.body", Operator::Match)
                .with_value("great")
                .with_role(BooleanRole::Must)
                .nested_in("comments"),
            FieldConfig::new("comments.rating", Operator::Term)
                .with_value("5")
                .with_role(BooleanRole::Filter)
                .nested_in("comments"),
        ];
        let doc = compose(&configs, &quiet_options());
        let value = doc.into_value();

        // Both clauses fold into one wrapper, placed in `must` only
        assert_eq!(
            value,
            json!({ "query": { "bool": { "must": [ { "nested": {
                "path": "comments",
                "query": { "bool": {
                    "must": [ { "match": { "comments.body": "great" } } ],
                    "filter": [ { "term": { "comments.rating": "5" } } ]
                } }
            } } ] } } })
        );
    }

    #[test]
    fn test_filter_only_nested_bucket_routes_to_filter() {
        let configs = vec![FieldConfig::new("comments.rating", Operator::Term)
            .with_value("5")
            .with_role(BooleanRole::Filter)
            .nested_in("comments")];
        let doc = compose(&configs, &quiet_options());
        let value = doc.into_value();
        assert!(value["query"]["bool"]["filter"][0]["nested"].is_object());
        assert_eq!(value["query"]["bool"].get("must"), None);
    }

    #[test]
    fn test_nested_flag_without_path_stays_top_level() {
        let mut config = FieldConfig::new("status", Operator::Term).with_value("active");
        config.is_nested = true;
        let doc = compose(&[config], &quiet_options());
        assert_eq!(
            doc.into_value(),
            json!({ "query": { "bool": { "must": [ { "term": { "status": "active" } } ] } } })
        );
    }

    #[test]
    fn test_distinct_nested_paths_get_distinct_wrappers() {
        let configs = vec![
            FieldConfig::new("comments.body", Operator::Match)
                .with_value("great")
                .nested_in("comments"),
            FieldConfig::new("authors.name", Operator::Match)
                .with_value("sacha")
                .nested_in("authors"),
        ];
        let doc = compose(&configs, &quiet_options());
        let must = doc.as_value()["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 2);
        assert_eq!(must[0]["nested"]["path"], "comments");
        assert_eq!(must[1]["nested"]["path"], "authors");
    }

    #[test]
    fn test_track_total_hits_and_source_options() {
        let configs = vec![FieldConfig::new("title", Operator::Match).with_value("rust")];
        let options = QueryOptions {
            track_total_hits: true,
            include_source: true,
            source_fields: vec!["title".to_string(), "status".to_string()],
            ..Default::default()
        };
        let doc = compose(&configs, &options);
        let value = doc.into_value();
        assert_eq!(value["track_total_hits"], json!(true));
        assert_eq!(value["_source"], json!(["title", "status"]));
    }

    #[test]
    fn test_source_without_selection_is_true() {
        let options = QueryOptions {
            track_total_hits: false,
            include_source: true,
            ..Default::default()
        };
        let doc = compose(&[], &options);
        assert_eq!(doc.into_value()["_source"], json!(true));
    }

    #[test]
    fn test_aggregation_binds_to_first_config() {
        let configs = vec![
            FieldConfig::new("status", Operator::Term).with_value("active"),
            FieldConfig::new("views", Operator::Range).with_value("10"),
        ];
        let options = QueryOptions {
            track_total_hits: false,
            include_aggregation: true,
            ..Default::default()
        };
        let doc = compose(&configs, &options);
        assert_eq!(
            doc.into_value()["aggs"],
            json!({ "status_aggs": { "terms": { "field": "status", "size": 10 } } })
        );
    }

    #[test]
    fn test_compose_is_idempotent() {
        let configs = vec![
            FieldConfig::new("title", Operator::Match)
                .with_value("rust")
                .with_role(BooleanRole::Should),
            FieldConfig::new("comments.body", Operator::Match)
                .with_value("great")
                .nested_in("comments"),
        ];
        let options = QueryOptions {
            include_aggregation: true,
            ..Default::default()
        };
        assert_eq!(compose(&configs, &options), compose(&configs, &options));
    }
}
