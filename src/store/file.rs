//! JSON-file repository
//!
//! One file per collection. Every operation is a whole-file
//! read-modify-write; concurrent writers are last-writer-wins, which is
//! acceptable for a single interactive session.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{NamedEntry, Repository};
use crate::error::CuttleError;
use crate::Result;

/// Repository persisting one collection to a JSON file
#[derive(Debug)]
pub struct FileRepository<T> {
    path: PathBuf,
    _entry: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> FileRepository<T> {
    /// Open a repository at the given file path. The file is created on
    /// the first write; a missing file reads as an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entry: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        if !self.path.is_file() {
            return Err(CuttleError::Store(format!(
                "collection path {} is not a file",
                self.path.display()
            )));
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, entries: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl<T> Repository<T> for FileRepository<T>
where
    T: NamedEntry + Serialize + DeserializeOwned,
{
    fn list(&self) -> Result<Vec<T>> {
        self.read_all()
    }

    fn get(&self, name: &str) -> Result<Option<T>> {
        Ok(self
            .read_all()?
            .into_iter()
            .find(|entry| entry.name() == name))
    }

    fn put(&self, entry: T) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.retain(|existing| existing.name() != entry.name());
        entries.push(entry);
        self.write_all(&entries)?;
        debug!(path = %self.path.display(), "stored entry");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let mut entries = self.read_all()?;
        let before = entries.len();
        entries.retain(|entry| entry.name() != name);
        let removed = entries.len() != before;
        if removed {
            self.write_all(&entries)?;
        }
        Ok(removed)
    }

    fn replace_all(&self, entries: Vec<T>) -> Result<()> {
        self.write_all(&entries)
    }
}
