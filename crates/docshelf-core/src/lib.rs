//! # Docshelf Core
//!
//! Core data models, error types, and configuration for the versioned
//! documentation store. This crate defines the canonical types that all
//! other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Type-Driven Design**: Strong types replace string-based APIs
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Builder Pattern for Complex Types**: Configuration structs use builders
//! - **Immutable by Default**: Mutation through explicit methods only
//!
//! ## Core Modules
//!
//! - [`models`] - Document data types (Document, DocumentMeta, VersionInfo)
//! - [`error`] - Error types and Result alias
//! - [`config`] - Store configuration with builder and YAML persistence
//! - [`paths`] - Logical-path resolution and containment checks
//!
//! ## Usage Examples
//!
//! ### Resolving document paths
//!
//! ```
//! use docshelf_core::paths::PathResolver;
//!
//! let resolver = PathResolver::new("/tmp/docs");
//! assert!(resolver.resolve("v1", "guides/intro.mdx").is_ok());
//! assert!(resolver.resolve("v1", "../escape").is_err());
//! ```
//!
//! ### Error handling
//!
//! ```
//! use docshelf_core::prelude::*;
//!
//! fn lookup() -> Result<()> {
//!     let _err = Error::not_found("v1/missing.mdx");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod paths;

pub use config::{StoreConfig, StoreConfigBuilder};
pub use error::{Error, Result};
pub use models::{DEFAULT_ICON, Document, DocumentMeta, ORDER_LAST, ROOT_CATEGORY, VersionInfo};
pub use paths::{PathResolver, ensure_extension};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{StoreConfig, StoreConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        DEFAULT_ICON, Document, DocumentMeta, ORDER_LAST, ROOT_CATEGORY, VersionInfo,
    };
    pub use crate::paths::{PathResolver, ensure_extension};
}
