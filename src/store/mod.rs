//! Named persistence for mappings and queries
//!
//! The engine never touches storage on its own; a repository is injected
//! by the caller. Collections are small and session-scoped: writes are
//! whole-collection, last-writer-wins.

mod bundle;
mod file;
mod memory;

pub use bundle::ExportBundle;
pub use file::FileRepository;
pub use memory::MemoryRepository;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Entry addressable by name
pub trait NamedEntry {
    fn name(&self) -> &str;
}

/// A mapping saved under a name
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedMapping {
    pub name: String,
    pub mapping: Value,
    pub saved_at: DateTime<Utc>,
}

impl SavedMapping {
    pub fn new(name: impl Into<String>, mapping: Value) -> Self {
        Self {
            name: name.into(),
            mapping,
            saved_at: Utc::now(),
        }
    }
}

impl NamedEntry for SavedMapping {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A rendered query document saved under a name
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub name: String,
    pub query: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedQuery {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            saved_at: Utc::now(),
        }
    }
}

impl NamedEntry for SavedQuery {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Name-keyed repository.
///
/// `put` replaces any existing entry with the same name; `delete` removes
/// every entry carrying the name and reports whether anything was removed.
pub trait Repository<T: NamedEntry> {
    fn list(&self) -> Result<Vec<T>>;

    fn get(&self, name: &str) -> Result<Option<T>>;

    fn put(&self, entry: T) -> Result<()>;

    fn delete(&self, name: &str) -> Result<bool>;

    /// Replace the whole collection (the import path)
    fn replace_all(&self, entries: Vec<T>) -> Result<()>;
}
