//! Mapping traversal
//!
//! Walks the raw index mapping JSON to enumerate addressable field paths
//! and resolve declared types. The walker is total: malformed shapes
//! degrade to defaults instead of erroring.

use serde_json::{Map, Value};

use super::field_type::FieldType;

/// Extracted mapping root: the `properties` table plus the index name when
/// the envelope carried one.
#[derive(Clone, Debug, PartialEq)]
pub struct MappingRoot {
    pub index_name: Option<String>,
    pub properties: Map<String, Value>,
}

impl MappingRoot {
    /// Extract the properties table from a raw mapping.
    ///
    /// Two envelopes are accepted, tried in order:
    /// `{ "<index>": { "mappings": { "properties": {...} } } }` (only the
    /// first top-level key is probed) and `{ "properties": {...} }`.
    /// Returns `None` when neither matches; the caller treats that as "no
    /// mapping loaded", not an error.
    pub fn extract(raw: &Value) -> Option<Self> {
        let top = raw.as_object()?;

        if let Some((index_name, body)) = top.iter().next() {
            if let Some(props) = body
                .get("mappings")
                .and_then(|mappings| mappings.get("properties"))
                .and_then(Value::as_object)
            {
                return Some(Self {
                    index_name: Some(index_name.clone()),
                    properties: props.clone(),
                });
            }
        }

        let props = top.get("properties").and_then(Value::as_object)?;
        Some(Self {
            index_name: None,
            properties: props.clone(),
        })
    }

    /// All selectable field paths, in mapping key order
    pub fn field_paths(&self) -> Vec<String> {
        field_paths(&self.properties)
    }

    /// All `nested`-typed paths, in mapping key order
    pub fn nested_paths(&self) -> Vec<String> {
        nested_paths(&self.properties)
    }

    /// Declared type of a dot-separated field path
    pub fn resolve_type(&self, path: &str) -> FieldType {
        resolve_type(&self.properties, path)
    }
}

/// Shape of one mapping node, resolved once per visit
enum NodeKind<'a> {
    /// Plain field with no children: selectable
    Leaf,
    /// Grouping object: children only, not independently selectable
    Group(&'a Map<String, Value>),
    /// `nested` field: selectable itself and a grouping boundary
    Nested(Option<&'a Map<String, Value>>),
}

fn classify(node: &Value) -> NodeKind<'_> {
    let declared = node.get("type").and_then(Value::as_str);
    let children = node.get("properties").and_then(Value::as_object);
    match (declared, children) {
        (Some("nested"), kids) => NodeKind::Nested(kids),
        (_, Some(kids)) => NodeKind::Group(kids),
        _ => NodeKind::Leaf,
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Flatten a properties table into selectable field paths.
///
/// Depth-first, pre-order, in mapping key order. Grouping nodes are not
/// emitted themselves; `nested` nodes are emitted and descended into.
pub fn field_paths(properties: &Map<String, Value>) -> Vec<String> {
    let mut paths = Vec::new();
    walk_fields(properties, "", &mut paths);
    paths
}

fn walk_fields(properties: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (name, node) in properties {
        let path = join(prefix, name);
        match classify(node) {
            NodeKind::Nested(children) => {
                out.push(path.clone());
                if let Some(children) = children {
                    walk_fields(children, &path, out);
                }
            }
            NodeKind::Group(children) => walk_fields(children, &path, out),
            NodeKind::Leaf => out.push(path),
        }
    }
}

/// Collect the paths of `nested`-typed nodes only
pub fn nested_paths(properties: &Map<String, Value>) -> Vec<String> {
    let mut paths = Vec::new();
    walk_nested(properties, "", &mut paths);
    paths
}

fn walk_nested(properties: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (name, node) in properties {
        let path = join(prefix, name);
        match classify(node) {
            NodeKind::Nested(children) => {
                out.push(path.clone());
                if let Some(children) = children {
                    walk_nested(children, &path, out);
                }
            }
            NodeKind::Group(children) => walk_nested(children, &path, out),
            NodeKind::Leaf => {}
        }
    }
}

/// Resolve the declared type of a dot-separated field path.
///
/// Fail-open: a missing segment or a path that ends inside grouping nodes
/// resolves to `text`, so free-typed paths always get an operator set. The
/// first segment carrying an explicit `type` wins, so a path under a
/// `nested` parent resolves to `nested`.
pub fn resolve_type(properties: &Map<String, Value>, path: &str) -> FieldType {
    let mut current = properties;
    for part in path.split('.') {
        let Some(node) = current.get(part) else {
            return FieldType::default();
        };
        if let Some(declared) = node.get("type").and_then(Value::as_str) {
            return FieldType::from_name(declared);
        }
        match node.get("properties").and_then(Value::as_object) {
            Some(children) => current = children,
            None => return FieldType::default(),
        }
    }
    FieldType::default()
}
