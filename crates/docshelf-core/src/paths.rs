//! Logical-path resolution and containment checks.
//!
//! Maps `(version, relative path)` pairs onto the filesystem and guarantees
//! the result stays inside the configured documentation root. The guard is
//! normalization-based, not a substring test: `..` components are resolved
//! before the containment check, and existing targets are additionally
//! compared through `canonicalize` so symlinks cannot escape the root.

use crate::error::{Error, Result};
use crate::models::ROOT_CATEGORY;
use std::path::{Component, Path, PathBuf};

/// Resolves logical document paths against a documentation root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at the documentation directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The documentation root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate a version name: a single path component, no separators,
    /// no traversal.
    pub fn validate_version(&self, version: &str) -> Result<()> {
        if version.is_empty() {
            return Err(Error::invalid_path("version cannot be empty"));
        }
        if version.contains('/') || version.contains('\\') {
            return Err(Error::invalid_path(format!(
                "version cannot contain path separators: {}",
                version
            )));
        }
        if version == "." || version == ".." {
            return Err(Error::path_traversal(version));
        }
        Ok(())
    }

    /// The absolute directory for a version namespace.
    pub fn version_root(&self, version: &str) -> Result<PathBuf> {
        self.validate_version(version)?;
        Ok(self.root.join(version))
    }

    /// Resolve a version-relative logical path to an absolute path,
    /// rejecting anything that would land outside the version directory.
    pub fn resolve(&self, version: &str, relative: &str) -> Result<PathBuf> {
        let version_root = self.version_root(version)?;

        if relative.is_empty() {
            return Err(Error::invalid_path("document path cannot be empty"));
        }
        if relative.starts_with('/') || Path::new(relative).is_absolute() {
            return Err(Error::invalid_path(format!(
                "document path must be relative: {}",
                relative
            )));
        }

        let joined = version_root.join(relative);
        let normalized = normalize(&joined);

        if !normalized.starts_with(&version_root) {
            return Err(Error::path_traversal(joined));
        }

        // Symlinked targets can still point outside the root; compare
        // canonical forms when the path exists.
        if normalized.exists() {
            let canonical_root = self
                .root
                .canonicalize()
                .unwrap_or_else(|_| self.root.clone());
            let canonical = normalized
                .canonicalize()
                .unwrap_or_else(|_| normalized.clone());
            if !canonical.starts_with(&canonical_root) {
                return Err(Error::path_traversal(normalized));
            }
        }

        Ok(normalized)
    }

    /// Derive the category of an absolute document path: the parent
    /// directory relative to the version root, with `.`/empty collapsed to
    /// the [`ROOT_CATEGORY`] sentinel.
    ///
    /// A directory literally named `root` directly under the version also
    /// yields the sentinel spelling; the store refuses to create one through
    /// `create_category` so the collision cannot arise via this API.
    pub fn categorize(&self, absolute: &Path, version_root: &Path) -> String {
        let relative = match absolute.strip_prefix(version_root) {
            Ok(rel) => rel,
            Err(_) => return ROOT_CATEGORY.to_string(),
        };

        match relative.parent() {
            None => ROOT_CATEGORY.to_string(),
            Some(dir) if dir.as_os_str().is_empty() => ROOT_CATEGORY.to_string(),
            Some(dir) => dir.to_string_lossy().replace('\\', "/"),
        }
    }

    /// The version-relative, forward-slash form of an absolute path.
    pub fn relative_path(&self, absolute: &Path, version_root: &Path) -> String {
        absolute
            .strip_prefix(version_root)
            .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            .unwrap_or_else(|_| absolute.to_string_lossy().to_string())
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(name) => normalized.push(name),
            Component::RootDir => normalized.push(component),
            Component::CurDir => {}
            Component::Prefix(p) => normalized.push(p.as_os_str()),
        }
    }
    normalized
}

/// Append the default extension when a logical path carries no
/// recognized one. `guide` becomes `guide.mdx`; `guide.md` is untouched.
pub fn ensure_extension(relative: &str, allowed: &std::collections::HashSet<String>, default: &str) -> String {
    let has_known = Path::new(relative)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| allowed.contains(&format!(".{}", ext)))
        .unwrap_or(false);

    if has_known {
        relative.to_string()
    } else {
        format!("{}{}", relative, default)
    }
}
