//! Core data models for versioned documentation files.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Cloneable**: `Arc<T>` friendly for shared ownership

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel category for documents that sit directly under a version
/// directory. Also what `.`/empty parent directories normalize to.
pub const ROOT_CATEGORY: &str = "root";

/// Default icon glyph for documents that declare none.
pub const DEFAULT_ICON: &str = "📄";

/// Sort sentinel so documents without an explicit `order` land last.
pub const ORDER_LAST: i64 = 999;

/// Frontmatter metadata fields recognized by the store.
///
/// Anything else present in a file's frontmatter block is preserved in
/// [`Document::frontmatter`] but carries no meaning for indexing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentMeta {
    pub title: String,
    pub description: String,
    /// Single-glyph display marker shown next to the document in listings.
    pub icon: String,
    /// Intra-category display order, ascending. Ties keep scan order.
    pub order: i64,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            icon: DEFAULT_ICON.to_string(),
            order: ORDER_LAST,
        }
    }
}

impl DocumentMeta {
    /// Build metadata from a decoded frontmatter map, applying defaults for
    /// missing or unparseable fields.
    pub fn from_frontmatter(fields: &HashMap<String, String>) -> Self {
        Self {
            title: fields.get("title").cloned().unwrap_or_default(),
            description: fields.get("description").cloned().unwrap_or_default(),
            icon: fields
                .get("icon")
                .filter(|s| !s.is_empty())
                .cloned()
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            order: fields
                .get("order")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(ORDER_LAST),
        }
    }
}

/// A single documentation file, fully decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Version namespace the document lives in (e.g. "v1").
    pub version: String,
    /// Path relative to the version root, forward-slash separated,
    /// unique within a version.
    pub path: String,
    /// Parent directory name relative to the version root, or
    /// [`ROOT_CATEGORY`] for files directly under the version directory.
    pub category: String,
    /// Recognized metadata fields with defaults applied.
    pub meta: DocumentMeta,
    /// Raw decoded frontmatter key-value pairs, unrecognized keys included.
    pub frontmatter: HashMap<String, String>,
    /// Text body following the frontmatter block (entire file if none).
    pub content: String,
    /// SHA-256 of the full file text, usable as an optimistic-concurrency
    /// token on save.
    pub hash: String,
}

/// Summary entry for version listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Directory name under the documentation root.
    pub name: String,
    /// Number of indexable documents in this version.
    pub document_count: usize,
}
