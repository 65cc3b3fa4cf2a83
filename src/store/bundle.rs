//! Export/import bundle
//!
//! The whole of a user's saved data (mappings and queries) as one JSON
//! document, for moving between machines.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Repository, SavedMapping, SavedQuery};
use crate::Result;

/// Snapshot of both saved collections
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    #[serde(default)]
    pub mappings: Vec<SavedMapping>,
    #[serde(default)]
    pub queries: Vec<SavedQuery>,
}

impl ExportBundle {
    /// Snapshot both collections
    pub fn collect(
        mappings: &dyn Repository<SavedMapping>,
        queries: &dyn Repository<SavedQuery>,
    ) -> Result<Self> {
        Ok(Self {
            mappings: mappings.list()?,
            queries: queries.list()?,
        })
    }

    /// Replace both collections with the bundle's contents
    pub fn apply(
        self,
        mappings: &dyn Repository<SavedMapping>,
        queries: &dyn Repository<SavedQuery>,
    ) -> Result<()> {
        mappings.replace_all(self.mappings)?;
        queries.replace_all(self.queries)?;
        Ok(())
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}
