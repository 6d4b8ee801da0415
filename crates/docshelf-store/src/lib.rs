//! # Docshelf Store
//!
//! Document storage, CRUD operations, and category indexing.
//!
//! This crate provides the store functionality including:
//! - Create/read/save/delete/rename/duplicate on individual documents
//! - Atomic writes (write-to-temp then rename)
//! - Optional optimistic-concurrency saves via content hashes
//! - Recursive version scanning with category grouping
//! - A storage trait with disk and in-memory backends
//!
//! ## Quick Start
//!
//! ```no_run
//! use docshelf_store::prelude::*;
//! use docshelf_codec::frontmatter::Fields;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = StoreConfig::builder("/path/to/docs").build()?;
//!     let store = DocumentStore::new(config.clone())?;
//!
//!     let doc = store
//!         .create("v1", Some("guides"), "intro", Fields::default())
//!         .await?;
//!     println!("created {}", doc.path);
//!
//!     let index = DocumentIndex::new(config)?;
//!     for doc in index.scan("v1").await? {
//!         println!("{} [{}]", doc.path, doc.category);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! The store holds no cross-call state and is safe to share behind `Arc`.
//! Two simultaneous saves to the same path are not serialized: the last
//! write wins, unless the caller opts into hash checking by passing the
//! `expected_hash` from a prior read.

pub mod index;
pub mod storage;
pub mod store;

pub use index::DocumentIndex;
pub use storage::{FsStorage, MemStorage, Storage};
pub use store::{DocumentStore, compute_hash};

pub mod prelude {
    pub use crate::index::DocumentIndex;
    pub use crate::storage::{FsStorage, MemStorage, Storage};
    pub use crate::store::{DocumentStore, compute_hash};
    pub use docshelf_core::prelude::*;
}
