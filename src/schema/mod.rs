//! Index mapping schema
//!
//! Field type declarations and mapping traversal.

pub mod field_type;
pub mod mapping;

pub use field_type::FieldType;
pub use mapping::{field_paths, nested_paths, resolve_type, MappingRoot};
