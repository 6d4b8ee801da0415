//! # Docshelf
//!
//! Versioned documentation file store: frontmatter-aware CRUD, category
//! indexing, and a JSON-speaking CLI front-end.
//!
//! A documentation root's first-level subdirectories are independent
//! version namespaces ("v1", "v2", ...). Inside a version, documents are
//! `.mdx`/`.md` files whose leading `---` block carries `title`,
//! `description`, `icon`, and `order` metadata; the parent directory is
//! the document's category, used purely for grouping.
//!
//! ## Crates
//!
//! - [`docshelf_core`] - models, errors, configuration, path resolution
//! - [`docshelf_codec`] - the frontmatter codec
//! - [`docshelf_store`] - storage backends, document store, indexer
//! - [`docshelf_tools`] - JSON-facing operation wrappers
//!
//! ## Quick Start
//!
//! ```no_run
//! use docshelf::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let tools = DocTools::open("~/docs")?;
//!     let listing = tools.list_documents(Some("v1")).await?;
//!     println!("{}", serde_json::to_string_pretty(&listing).unwrap());
//!     Ok(())
//! }
//! ```

pub use docshelf_codec::frontmatter::{self, Fields};
pub use docshelf_core::prelude::*;
pub use docshelf_store::{DocumentIndex, DocumentStore, FsStorage, MemStorage, Storage};
pub use docshelf_tools::{DocTools, response};

pub mod prelude {
    pub use docshelf_codec::frontmatter::Fields;
    pub use docshelf_core::prelude::*;
    pub use docshelf_store::prelude::*;
    pub use docshelf_tools::{DocTools, response};
}
