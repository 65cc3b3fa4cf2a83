//! Query composition engine
//!
//! Turns user-configured field clauses into an Elasticsearch boolean query
//! document: clauses route by boolean role, nested clauses fold into
//! per-path sub-queries, and query-level options finish the document.
//!
//! # Example output
//!
//! ```json
//! {
//!   "query": {
//!     "bool": {
//!       "must": [
//!         { "nested": { "path": "comments", "query": { "bool": { "must": [
//!           { "match": { "comments.body": "great" } }
//!         ] } } } }
//!       ],
//!       "filter": [
//!         { "term": { "status": "active" } }
//!       ]
//!     }
//!   },
//!   "track_total_hits": true
//! }
//! ```

pub mod clause;
pub mod composer;
pub mod operators;
pub mod session;
pub mod types;

pub use clause::inner_clause;
pub use composer::compose;
pub use operators::Operator;
pub use session::ComposeSession;
pub use types::{BooleanRole, FieldConfig, QueryDocument, QueryOptions};
