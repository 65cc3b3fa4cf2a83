//! Composition session
//!
//! Owns the interactive state of one query-building session: the loaded
//! mapping, the configured clauses, and the query-level options. All
//! state lives in the session; nothing is shared or ambient.

use serde_json::Value;
use tracing::debug;

use super::composer::compose;
use super::operators::Operator;
use super::types::{FieldConfig, QueryDocument, QueryOptions};
use crate::error::Result;
use crate::schema::{FieldType, MappingRoot};

/// Interactive query-building session.
///
/// `build` is a pure function of the session state and may be called
/// repeatedly; repeated calls with unchanged state produce identical
/// documents.
#[derive(Debug, Default)]
pub struct ComposeSession {
    mapping: Option<MappingRoot>,
    configs: Vec<FieldConfig>,
    options: QueryOptions,
}

impl ComposeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mapping from raw JSON. Returns `true` when one of the two
    /// accepted envelopes matched.
    pub fn load_mapping(&mut self, raw: &Value) -> bool {
        self.mapping = MappingRoot::extract(raw);
        match &self.mapping {
            Some(root) => debug!(index = root.index_name.as_deref(), "mapping loaded"),
            None => debug!("mapping not recognized"),
        }
        self.mapping.is_some()
    }

    /// Load a mapping from JSON text. Parse failures surface as errors; an
    /// unrecognized envelope is not an error, just `false`.
    pub fn load_mapping_str(&mut self, raw: &str) -> Result<bool> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(self.load_mapping(&value))
    }

    pub fn clear_mapping(&mut self) {
        self.mapping = None;
    }

    pub fn mapping(&self) -> Option<&MappingRoot> {
        self.mapping.as_ref()
    }

    /// Field paths offered for selection, in mapping order
    pub fn field_paths(&self) -> Vec<String> {
        self.mapping
            .as_ref()
            .map(MappingRoot::field_paths)
            .unwrap_or_default()
    }

    /// Nested group paths offered for clause grouping, in mapping order
    pub fn nested_paths(&self) -> Vec<String> {
        self.mapping
            .as_ref()
            .map(MappingRoot::nested_paths)
            .unwrap_or_default()
    }

    /// Declared type of a field path; `text` when unknown or when no
    /// mapping is loaded
    pub fn resolve_type(&self, path: &str) -> FieldType {
        self.mapping
            .as_ref()
            .map(|root| root.resolve_type(path))
            .unwrap_or_default()
    }

    /// Add a clause for a field path and return its index. The operator
    /// defaults to the catalog default for the path's resolved type.
    pub fn add_field(&mut self, path: impl Into<String>) -> usize {
        let path = path.into();
        let operator = Operator::default_for(&self.resolve_type(&path));
        self.configs.push(FieldConfig::new(path, operator));
        self.configs.len() - 1
    }

    pub fn configs(&self) -> &[FieldConfig] {
        &self.configs
    }

    pub fn config_mut(&mut self, index: usize) -> Option<&mut FieldConfig> {
        self.configs.get_mut(index)
    }

    pub fn remove_field(&mut self, index: usize) -> Option<FieldConfig> {
        if index < self.configs.len() {
            Some(self.configs.remove(index))
        } else {
            None
        }
    }

    /// Toggle nesting for a clause. Enabling defaults the group path to
    /// the mapping's first nested path; disabling clears it.
    pub fn set_nested(&mut self, index: usize, is_nested: bool) {
        let nested_path = if is_nested {
            self.nested_paths().into_iter().next().unwrap_or_default()
        } else {
            String::new()
        };
        if let Some(config) = self.configs.get_mut(index) {
            config.is_nested = is_nested;
            config.nested_path = nested_path;
        }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options
    }

    /// Toggle a field in the `_source` selection
    pub fn toggle_source_field(&mut self, path: &str) {
        let fields = &mut self.options.source_fields;
        match fields.iter().position(|field| field == path) {
            Some(index) => {
                fields.remove(index);
            }
            None => fields.push(path.to_string()),
        }
    }

    /// Compose the current state into a query document, or `None` when no
    /// mapping is loaded
    pub fn build(&self) -> Option<QueryDocument> {
        self.mapping.as_ref()?;
        Some(compose(&self.configs, &self.options))
    }

    /// Clear clauses and restore default options. The loaded mapping is
    /// kept; any previously built document is no longer current.
    pub fn reset(&mut self) {
        self.configs.clear();
        self.options = QueryOptions::default();
        debug!("session reset");
    }
}
