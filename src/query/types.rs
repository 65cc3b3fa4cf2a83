//! Core types for query composition

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operators::Operator;
use crate::Result;

/// Boolean role of a clause: which list it joins in the bool query
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanRole {
    /// No explicit role; composed as `must`
    #[default]
    Simple,
    /// All clauses must match (AND, scoring)
    Must,
    /// At least one clause should match (OR, scoring)
    Should,
    /// All clauses must match (AND, no scoring)
    Filter,
}

/// One user-configured clause: a field, an operator, and a raw value.
///
/// The raw value is kept verbatim; numeric and range values are not
/// coerced. List order is insertion order and only affects the
/// aggregation, which binds to the first clause.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_nested: bool,
    #[serde(default)]
    pub nested_path: String,
    #[serde(default)]
    pub role: BooleanRole,
}

impl FieldConfig {
    /// Create a clause for a field with the given operator
    pub fn new(field: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: String::new(),
            is_nested: false,
            nested_path: String::new(),
            role: BooleanRole::default(),
        }
    }

    /// Set the raw value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the boolean role
    pub fn with_role(mut self, role: BooleanRole) -> Self {
        self.role = role;
        self
    }

    /// Group this clause under a nested path
    pub fn nested_in(mut self, path: impl Into<String>) -> Self {
        self.is_nested = true;
        self.nested_path = path.into();
        self
    }
}

fn default_true() -> bool {
    true
}

/// Query-level presentation and aggregation options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Ask the engine for an exact hit count
    #[serde(default = "default_true")]
    pub track_total_hits: bool,

    /// Add a terms aggregation on the first configured field
    #[serde(default)]
    pub include_aggregation: bool,

    /// Emit a `_source` filter
    #[serde(default)]
    pub include_source: bool,

    /// Fields to keep in `_source`; empty selects everything
    #[serde(default)]
    pub source_fields: Vec<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            track_total_hits: true,
            include_aggregation: false,
            include_source: false,
            source_fields: Vec::new(),
        }
    }
}

/// A composed query document, ready to serialize for display or storage
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryDocument(Value);

impl QueryDocument {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Compact JSON rendering
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Two-space indented JSON rendering
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}
