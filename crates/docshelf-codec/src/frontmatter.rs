//! Frontmatter extraction and emission: ---\nkey: value\n---
//!
//! This is a deliberately minimal, single-level key-value format, not full
//! YAML. Multi-line values, nested structures, and colons inside keys are
//! out of scope: decode passes such content through unparsed line by line,
//! and encode never emits it. The leniency is load-bearing: files are also
//! hand-edited outside the store, and decode must never fail on arbitrary
//! text.

use docshelf_core::DocumentMeta;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches a leading frontmatter block: --- ... ---
///
/// The optional blank line after the closing delimiter is the separator
/// [`encode`] emits; consuming it here makes encode/decode a true inverse
/// pair (the body round-trips byte-identically).
static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^---\n(.*?)\n---\n\n?").unwrap());

/// A file split into its frontmatter map and body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decoded {
    /// Raw key-value pairs from the block, quotes stripped.
    pub frontmatter: HashMap<String, String>,
    /// Everything after the block, verbatim. The whole file when no block
    /// is present.
    pub content: String,
}

impl Decoded {
    /// Recognized metadata fields with defaults applied.
    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta::from_frontmatter(&self.frontmatter)
    }
}

/// Fields to emit when encoding a frontmatter block.
///
/// `None` fields are omitted entirely; an all-`None` value encodes to the
/// empty string (no block at all).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i64>,
}

impl From<&DocumentMeta> for Fields {
    fn from(meta: &DocumentMeta) -> Self {
        Self {
            title: Some(meta.title.clone()),
            description: Some(meta.description.clone()),
            icon: Some(meta.icon.clone()),
            order: Some(meta.order),
        }
    }
}

/// Split a file into frontmatter and content.
///
/// Never fails: text without a leading block decodes to an empty map and
/// the text itself. Inside a block, lines are split at the first colon;
/// lines without one are ignored.
pub fn decode(text: &str) -> Decoded {
    let Some(caps) = FRONTMATTER_PATTERN.captures(text) else {
        return Decoded {
            frontmatter: HashMap::new(),
            content: text.to_string(),
        };
    };

    let block_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    let block = caps.get(1).map(|c| c.as_str()).unwrap_or_default();

    let mut frontmatter = HashMap::new();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        frontmatter.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    Decoded {
        frontmatter,
        content: text[block_end..].to_string(),
    }
}

/// Emit a frontmatter block for the given fields.
///
/// String fields are always double-quoted; `order` is a bare integer. The
/// block ends with a blank line after the closing delimiter so the body
/// stays visually separated. No fields → empty string; callers append the
/// content either way.
pub fn encode(fields: &Fields) -> String {
    let mut lines = Vec::new();

    if let Some(title) = &fields.title {
        lines.push(format!("title: \"{}\"", title));
    }
    if let Some(description) = &fields.description {
        lines.push(format!("description: \"{}\"", description));
    }
    if let Some(icon) = &fields.icon {
        lines.push(format!("icon: \"{}\"", icon));
    }
    if let Some(order) = fields.order {
        lines.push(format!("order: {}", order));
    }

    if lines.is_empty() {
        return String::new();
    }

    format!("---\n{}\n---\n\n", lines.join("\n"))
}

/// Strip a single matching pair of leading/trailing quotes, if present.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
