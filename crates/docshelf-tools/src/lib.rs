//! # Docshelf Tools
//!
//! JSON-facing operation wrappers over the document store, the layer the
//! hosting front-end (CLI, HTTP handlers) calls into.
//!
//! ## Operations
//!
//! [`doc_tools::DocTools`] exposes one method per route:
//! - `list_versions` - version namespaces with document counts
//! - `list_documents` - flat ordered list plus category grouping,
//!   optionally filtered to one version
//! - `read_document` / `save_document` / `create_document` /
//!   `delete_document` - single-document CRUD
//! - `rename_document` / `duplicate_document` - copy-shaped operations
//! - `create_category` - category directory creation
//!
//! Every method returns `Result<serde_json::Value>`; successes carry
//! `{"success": true, ...}` and failures map through
//! [`response::failure`] to `{"error", "code"}`.

pub mod doc_tools;
pub mod response;

pub use doc_tools::DocTools;
pub use response::{failure, success, to_json};
