use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filesystem layout for the named stores.
///
/// Each collection lives in its own JSON file under `data_dir`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl StoreConfig {
    /// Create a store configuration rooted at the given directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// File holding the saved-mapping collection
    pub fn mappings_path(&self) -> PathBuf {
        self.data_dir.join("mappings.json")
    }

    /// File holding the saved-query collection
    pub fn queries_path(&self) -> PathBuf {
        self.data_dir.join("queries.json")
    }
}
