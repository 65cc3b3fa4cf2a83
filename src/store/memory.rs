//! In-memory repository

use parking_lot::RwLock;

use super::{NamedEntry, Repository};
use crate::Result;

/// Repository backed by process memory, for tests and sessions that never
/// persist.
#[derive(Debug)]
pub struct MemoryRepository<T> {
    entries: RwLock<Vec<T>>,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NamedEntry + Clone> Repository<T> for MemoryRepository<T> {
    fn list(&self) -> Result<Vec<T>> {
        Ok(self.entries.read().clone())
    }

    fn get(&self, name: &str) -> Result<Option<T>> {
        Ok(self
            .entries
            .read()
            .iter()
            .find(|entry| entry.name() == name)
            .cloned())
    }

    fn put(&self, entry: T) -> Result<()> {
        let mut entries = self.entries.write();
        entries.retain(|existing| existing.name() != entry.name());
        entries.push(entry);
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|entry| entry.name() != name);
        Ok(entries.len() != before)
    }

    fn replace_all(&self, entries: Vec<T>) -> Result<()> {
        *self.entries.write() = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SavedQuery;

    #[test]
    fn test_put_get_delete() {
        let repo = MemoryRepository::new();
        repo.put(SavedQuery::new("recent", "{}")).unwrap();

        assert_eq!(repo.get("recent").unwrap().unwrap().query, "{}");
        assert!(repo.get("missing").unwrap().is_none());

        assert!(repo.delete("recent").unwrap());
        assert!(!repo.delete("recent").unwrap());
    }

    #[test]
    fn test_put_replaces_same_name() {
        let repo = MemoryRepository::new();
        repo.put(SavedQuery::new("recent", "{}")).unwrap();
        repo.put(SavedQuery::new("recent", r#"{"query":{"bool":{}}}"#))
            .unwrap();

        let entries = repo.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, r#"{"query":{"bool":{}}}"#);
    }

    #[test]
    fn test_replace_all() {
        let repo = MemoryRepository::new();
        repo.put(SavedQuery::new("old", "{}")).unwrap();
        repo.replace_all(vec![SavedQuery::new("new", "{}")]).unwrap();

        let entries = repo.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "new");
    }
}
