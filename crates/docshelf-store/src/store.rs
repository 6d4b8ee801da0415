//! Document store: CRUD, rename, and duplicate operations on individual
//! documentation files.
//!
//! Every operation resolves its logical path through
//! [`docshelf_core::PathResolver`] and moves file text through the
//! frontmatter codec. Failures propagate to the caller unretried; there is
//! no partial-failure state because every operation touches a single file.

use docshelf_codec::frontmatter::{self, Fields};
use docshelf_core::prelude::*;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;
use unicode_normalization::UnicodeNormalization;

use crate::storage::{FsStorage, Storage};

/// SHA-256 over NFC-normalized text, hex encoded.
///
/// Returned from reads and accepted by saves as an optimistic-concurrency
/// token.
pub fn compute_hash(content: &str) -> String {
    let normalized: String = content.nfc().collect();
    let hash = Sha256::digest(normalized.as_bytes());
    format!("{:x}", hash)
}

/// Store for one versioned documentation tree.
///
/// Cheap to clone behind [`Arc`]; operations hold no cross-call state, so
/// two concurrent saves to the same path race with last-writer-wins unless
/// the caller passes an `expected_hash`.
pub struct DocumentStore {
    config: StoreConfig,
    resolver: PathResolver,
    storage: Arc<dyn Storage>,
}

impl DocumentStore {
    /// Create a store over the real filesystem.
    pub fn new(config: StoreConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(FsStorage::new()))
    }

    /// Create a store over an explicit storage backend.
    pub fn with_storage(config: StoreConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        config.validate()?;
        let resolver = PathResolver::new(config.root.clone());
        Ok(Self {
            config,
            resolver,
            storage,
        })
    }

    /// The store's configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The store's path resolver.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// The underlying storage backend.
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.storage)
    }

    /// Create a new document from a metadata stub and a default body.
    ///
    /// `category` of `None` (or the `root` sentinel) places the file
    /// directly under the version directory. The file name gets the default
    /// extension when it carries no recognized one. An occupied destination
    /// fails with `AlreadyExists`.
    #[instrument(skip(self, fields), name = "store_create")]
    pub async fn create(
        &self,
        version: &str,
        category: Option<&str>,
        file_name: &str,
        mut fields: Fields,
    ) -> Result<Document> {
        if file_name.is_empty() {
            return Err(Error::invalid_path("file name cannot be empty"));
        }

        let relative = match category {
            Some(cat) if !cat.is_empty() && cat != ROOT_CATEGORY => {
                format!("{}/{}", cat, file_name)
            }
            _ => file_name.to_string(),
        };
        let relative = ensure_extension(
            &relative,
            &self.config.allowed_extensions,
            &self.config.default_extension,
        );

        let absolute = self.resolver.resolve(version, &relative)?;
        if self.storage.exists(&absolute).await {
            return Err(Error::already_exists(relative));
        }

        let title = match fields.title.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => file_stem(&absolute),
        };
        fields.title = Some(title.clone());

        let body = format!("# {}\n\nWrite your content here.\n", title);
        let text = format!("{}{}", frontmatter::encode(&fields), body);

        self.storage.write(&absolute, &text).await?;
        log::info!("Created document {}/{}", version, relative);

        self.build_document(version, &absolute, text)
    }

    /// Read and decode a document.
    #[instrument(skip(self), name = "store_read")]
    pub async fn read(&self, version: &str, path: &str) -> Result<Document> {
        let absolute = self.resolver.resolve(version, path)?;
        if !self.storage.exists(&absolute).await {
            return Err(Error::not_found(path));
        }

        let text = self.storage.read_to_string(&absolute).await?;
        self.build_document(version, &absolute, text)
    }

    /// Overwrite a document's frontmatter and content in full.
    ///
    /// Idempotent: the file is rewritten whether or not anything changed,
    /// and missing parent directories are created. When `expected_hash` is
    /// given and the on-disk text hashes differently, the save fails with a
    /// conflict instead of silently dropping the other writer's work.
    #[instrument(skip(self, fields, content, expected_hash), name = "store_save")]
    pub async fn save(
        &self,
        version: &str,
        path: &str,
        fields: Fields,
        content: &str,
        expected_hash: Option<&str>,
    ) -> Result<Document> {
        let relative = ensure_extension(
            path,
            &self.config.allowed_extensions,
            &self.config.default_extension,
        );
        let absolute = self.resolver.resolve(version, &relative)?;

        if let Some(expected) = expected_hash
            && self.storage.exists(&absolute).await
        {
            let current = self.storage.read_to_string(&absolute).await?;
            let actual = compute_hash(&current);
            if actual != expected {
                return Err(Error::concurrency_error(format!(
                    "document modified since read (expected hash {}, actual {}); re-read and try again",
                    expected, actual
                )));
            }
        }

        let text = format!("{}{}", frontmatter::encode(&fields), content);
        self.storage.write(&absolute, &text).await?;
        log::debug!("Saved document {}/{}", version, relative);

        self.build_document(version, &absolute, text)
    }

    /// Delete a document and prune newly empty ancestor directories.
    ///
    /// Pruning walks from the file's parent toward the version root and
    /// stops at the first non-empty directory or the version boundary. It
    /// is best-effort: a concurrent create can keep a directory alive, at
    /// worst leaving behind a directory that could have been removed.
    #[instrument(skip(self), name = "store_delete")]
    pub async fn delete(&self, version: &str, path: &str) -> Result<()> {
        let absolute = self.resolver.resolve(version, path)?;
        if !self.storage.exists(&absolute).await {
            return Err(Error::not_found(path));
        }

        self.storage.remove_file(&absolute).await?;
        log::info!("Deleted document {}/{}", version, path);

        let version_root = self.resolver.version_root(version)?;
        self.prune_empty_dirs(absolute.parent(), &version_root).await;
        Ok(())
    }

    /// Move a document to a new logical path within the same version.
    #[instrument(skip(self), name = "store_rename")]
    pub async fn rename(&self, version: &str, old_path: &str, new_path: &str) -> Result<Document> {
        let from = self.resolver.resolve(version, old_path)?;
        let to = self.resolver.resolve(version, new_path)?;

        if !self.storage.exists(&from).await {
            return Err(Error::not_found(old_path));
        }
        if self.storage.exists(&to).await {
            return Err(Error::already_exists(new_path));
        }

        self.storage.rename(&from, &to).await?;
        log::info!("Renamed {}/{} -> {}", version, old_path, new_path);

        let text = self.storage.read_to_string(&to).await?;
        self.build_document(version, &to, text)
    }

    /// Copy a document to a new logical path, retitling the copy.
    ///
    /// The copy's title is `"<original> (Copy)"`, or derives from the
    /// destination file stem when the source declared none. Description,
    /// icon, and order carry over (defaulted if absent); the body is
    /// byte-identical. The source is left intact.
    #[instrument(skip(self), name = "store_duplicate")]
    pub async fn duplicate(
        &self,
        version: &str,
        old_path: &str,
        new_path: &str,
    ) -> Result<Document> {
        let from = self.resolver.resolve(version, old_path)?;
        let to = self.resolver.resolve(version, new_path)?;

        if !self.storage.exists(&from).await {
            return Err(Error::not_found(old_path));
        }
        if self.storage.exists(&to).await {
            return Err(Error::already_exists(new_path));
        }

        let source = self.storage.read_to_string(&from).await?;
        let decoded = frontmatter::decode(&source);
        let meta = decoded.meta();

        let title = if meta.title.is_empty() {
            file_stem(&to)
        } else {
            format!("{} (Copy)", meta.title)
        };

        let fields = Fields {
            title: Some(title),
            description: Some(meta.description),
            icon: Some(meta.icon),
            order: Some(meta.order),
        };
        let text = format!("{}{}", frontmatter::encode(&fields), decoded.content);

        self.storage.write(&to, &text).await?;
        log::info!("Duplicated {}/{} -> {}", version, old_path, new_path);

        self.build_document(version, &to, text)
    }

    /// Create a category directory within a version.
    ///
    /// Idempotent. The sentinel name `root` is rejected so the "no
    /// category" spelling stays unambiguous.
    #[instrument(skip(self), name = "store_create_category")]
    pub async fn create_category(&self, version: &str, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::invalid_path("category name cannot be empty"));
        }
        if name == ROOT_CATEGORY {
            return Err(Error::invalid_path(format!(
                "'{}' is reserved for uncategorized documents",
                ROOT_CATEGORY
            )));
        }

        let absolute = self.resolver.resolve(version, name)?;
        self.storage.create_dir_all(&absolute).await?;
        log::info!("Created category {}/{}", version, name);
        Ok(())
    }

    /// Remove empty directories from `start` up to (not including) the
    /// version root.
    async fn prune_empty_dirs(&self, start: Option<&Path>, version_root: &Path) {
        let mut current = start.map(Path::to_path_buf);
        while let Some(dir) = current {
            if dir == *version_root || !dir.starts_with(version_root) {
                break;
            }
            match self.storage.remove_dir_if_empty(&dir).await {
                Ok(true) => current = dir.parent().map(Path::to_path_buf),
                Ok(false) => break,
                Err(e) => {
                    log::warn!("Failed to prune directory {}: {}", dir.display(), e);
                    break;
                }
            }
        }
    }

    /// Assemble a [`Document`] from an absolute path and its file text.
    pub(crate) fn build_document(
        &self,
        version: &str,
        absolute: &Path,
        text: String,
    ) -> Result<Document> {
        let version_root = self.resolver.version_root(version)?;
        let decoded = frontmatter::decode(&text);
        let hash = compute_hash(&text);

        Ok(Document {
            version: version.to_string(),
            path: self.resolver.relative_path(absolute, &version_root),
            category: self.resolver.categorize(absolute, &version_root),
            meta: decoded.meta(),
            frontmatter: decoded.frontmatter,
            content: decoded.content,
            hash,
        })
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
