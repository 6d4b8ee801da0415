//! # Docshelf Codec
//!
//! Bidirectional conversion between documentation file text and
//! `{frontmatter, content}` pairs.
//!
//! The format is a leading block delimited by `---` lines holding
//! single-level `key: value` pairs. [`frontmatter::decode`] never fails:
//! text without a well-formed block is returned untouched with an empty
//! map, which keeps the store interoperable with files edited by hand.
//!
//! ```
//! use docshelf_codec::frontmatter::{self, Fields};
//!
//! let block = frontmatter::encode(&Fields {
//!     title: Some("Guide".to_string()),
//!     ..Default::default()
//! });
//! let decoded = frontmatter::decode(&format!("{}# Hello\n", block));
//! assert_eq!(decoded.frontmatter.get("title").unwrap(), "Guide");
//! assert_eq!(decoded.content, "# Hello\n");
//! ```

pub mod frontmatter;

pub use frontmatter::{Decoded, Fields, decode, encode};
