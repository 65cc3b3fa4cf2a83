pub mod config;
pub mod error;
pub mod format;
pub mod query;
pub mod schema;
pub mod store;

pub use config::StoreConfig;
pub use error::{CuttleError, Result};
pub use query::{
    compose, BooleanRole, ComposeSession, FieldConfig, Operator, QueryDocument, QueryOptions,
};
pub use schema::{FieldType, MappingRoot};
pub use store::{
    ExportBundle, FileRepository, MemoryRepository, NamedEntry, Repository, SavedMapping,
    SavedQuery,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
