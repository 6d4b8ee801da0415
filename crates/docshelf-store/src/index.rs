//! Directory indexer: full document listings and category grouping for a
//! version namespace.
//!
//! Scans re-read from storage on every call; there is no cache layer, so a
//! listing always reflects the tree as it was during the walk.

use docshelf_core::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

use crate::storage::{FsStorage, Storage};
use crate::store::compute_hash;

/// Indexer over one versioned documentation tree.
pub struct DocumentIndex {
    config: StoreConfig,
    resolver: PathResolver,
    storage: Arc<dyn Storage>,
}

impl DocumentIndex {
    /// Create an indexer over the real filesystem.
    pub fn new(config: StoreConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(FsStorage::new()))
    }

    /// Create an indexer over an explicit storage backend.
    pub fn with_storage(config: StoreConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        config.validate()?;
        let resolver = PathResolver::new(config.root.clone());
        Ok(Self {
            config,
            resolver,
            storage,
        })
    }

    /// List every document in a version, sorted ascending by `order`.
    ///
    /// The sort is stable, so order ties keep their walk order (which is
    /// itself platform-dependent). A version directory that does not exist
    /// yields an empty list: "no documentation yet" is not an error.
    /// Entries that cannot be read are logged and skipped.
    #[instrument(skip(self), name = "index_scan")]
    pub async fn scan(&self, version: &str) -> Result<Vec<Document>> {
        let version_root = self.resolver.version_root(version)?;
        let files = self.storage.list_files(&version_root).await?;

        let mut documents = Vec::new();
        for path in files {
            if !self.config.has_allowed_extension(&path) {
                continue;
            }
            if self.is_excluded(&path, &version_root) {
                continue;
            }
            match self.storage.file_size(&path).await {
                Ok(size) if size > self.config.max_file_size => {
                    log::warn!(
                        "Skipping oversized document {} ({} bytes)",
                        path.display(),
                        size
                    );
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Failed to stat {}: {}", path.display(), e);
                    continue;
                }
            }

            match self.storage.read_to_string(&path).await {
                Ok(text) => documents.push(self.build_document(version, &version_root, &path, text)),
                Err(e) => {
                    log::warn!("Failed to read {}: {}", path.display(), e);
                }
            }
        }

        documents.sort_by_key(|doc| doc.meta.order);
        log::debug!("Indexed {} documents in version {}", documents.len(), version);
        Ok(documents)
    }

    /// Bucket documents by category, preserving each bucket's relative
    /// order from the input. Categories with zero documents never appear.
    pub fn group_by_category(documents: Vec<Document>) -> BTreeMap<String, Vec<Document>> {
        let mut groups: BTreeMap<String, Vec<Document>> = BTreeMap::new();
        for doc in documents {
            groups.entry(doc.category.clone()).or_default().push(doc);
        }
        groups
    }

    /// List version namespaces: the first-level subdirectories of the
    /// documentation root, sorted by name. A missing root yields an empty
    /// list.
    #[instrument(skip(self), name = "index_list_versions")]
    pub async fn list_versions(&self) -> Result<Vec<VersionInfo>> {
        let dirs = self.storage.list_dirs(self.resolver.root()).await?;

        let mut names: Vec<String> = dirs
            .iter()
            .filter_map(|d| d.file_name().and_then(|n| n.to_str()).map(String::from))
            .filter(|name| !self.config.excluded_paths.contains(name))
            .collect();
        names.sort();

        let mut versions = Vec::with_capacity(names.len());
        for name in names {
            let document_count = self.scan(&name).await?.len();
            versions.push(VersionInfo {
                name,
                document_count,
            });
        }
        Ok(versions)
    }

    fn is_excluded(&self, path: &Path, version_root: &Path) -> bool {
        path.strip_prefix(version_root)
            .map(|rel| {
                rel.components().any(|c| {
                    c.as_os_str()
                        .to_str()
                        .map(|name| self.config.excluded_paths.contains(name))
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    }

    fn build_document(
        &self,
        version: &str,
        version_root: &Path,
        absolute: &Path,
        text: String,
    ) -> Document {
        let decoded = docshelf_codec::frontmatter::decode(&text);
        let hash = compute_hash(&text);

        Document {
            version: version.to_string(),
            path: self.resolver.relative_path(absolute, version_root),
            category: self.resolver.categorize(absolute, version_root),
            meta: decoded.meta(),
            frontmatter: decoded.frontmatter,
            content: decoded.content,
            hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentStore;
    use crate::storage::MemStorage;
    use docshelf_codec::frontmatter::Fields;
    use tempfile::TempDir;

    fn fs_index(temp: &TempDir) -> DocumentIndex {
        let config = StoreConfig::builder(temp.path()).build().unwrap();
        DocumentIndex::new(config).unwrap()
    }

    fn write(temp: &TempDir, rel: &str, text: &str) {
        let path = temp.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[tokio::test]
    async fn test_scan_missing_version_is_empty() {
        let temp = TempDir::new().unwrap();
        let index = fs_index(&temp);

        let docs = index.scan("v9").await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_scan_finds_and_categorizes() {
        let temp = TempDir::new().unwrap();
        write(&temp, "v1/intro.mdx", "---\ntitle: \"Intro\"\n---\nbody");
        write(
            &temp,
            "v1/guides/setup.mdx",
            "---\ntitle: \"Setup\"\n---\nbody",
        );
        write(&temp, "v1/guides/ignored.png", "binary");

        let index = fs_index(&temp);
        let docs = index.scan("v1").await.unwrap();
        assert_eq!(docs.len(), 2);

        let intro = docs.iter().find(|d| d.path == "intro.mdx").unwrap();
        assert_eq!(intro.category, ROOT_CATEGORY);

        let setup = docs.iter().find(|d| d.path == "guides/setup.mdx").unwrap();
        assert_eq!(setup.category, "guides");
        assert_eq!(setup.meta.title, "Setup");
    }

    #[tokio::test]
    async fn test_scan_sorts_by_order_unordered_last() {
        let temp = TempDir::new().unwrap();
        write(&temp, "v1/c.mdx", "---\norder: 2\n---\n");
        write(&temp, "v1/a.mdx", "---\norder: 1\n---\n");
        write(&temp, "v1/z.mdx", "no frontmatter at all");

        let index = fs_index(&temp);
        let docs = index.scan("v1").await.unwrap();

        let order: Vec<&str> = docs.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(order, vec!["a.mdx", "c.mdx", "z.mdx"]);
        assert_eq!(docs[2].meta.order, ORDER_LAST);
    }

    #[tokio::test]
    async fn test_scan_skips_excluded_dirs() {
        let temp = TempDir::new().unwrap();
        write(&temp, "v1/doc.mdx", "ok");
        write(&temp, "v1/.git/config.md", "not a document");

        let index = fs_index(&temp);
        let docs = index.scan("v1").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path, "doc.mdx");
    }

    #[tokio::test]
    async fn test_scan_skips_oversized_files() {
        let temp = TempDir::new().unwrap();
        write(&temp, "v1/small.mdx", "fine");
        write(&temp, "v1/big.mdx", &"x".repeat(64));

        let config = StoreConfig::builder(temp.path())
            .max_file_size(32)
            .build()
            .unwrap();
        let index = DocumentIndex::new(config).unwrap();
        let docs = index.scan("v1").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path, "small.mdx");
    }

    #[tokio::test]
    async fn test_group_by_category_preserves_bucket_order() {
        let temp = TempDir::new().unwrap();
        write(&temp, "v1/guides/b.mdx", "---\norder: 2\n---\n");
        write(&temp, "v1/guides/a.mdx", "---\norder: 1\n---\n");
        write(&temp, "v1/top.mdx", "---\norder: 5\n---\n");

        let index = fs_index(&temp);
        let docs = index.scan("v1").await.unwrap();
        let groups = DocumentIndex::group_by_category(docs);

        assert_eq!(groups.len(), 2);
        let guides: Vec<&str> = groups["guides"].iter().map(|d| d.path.as_str()).collect();
        assert_eq!(guides, vec!["guides/a.mdx", "guides/b.mdx"]);
        assert_eq!(groups[ROOT_CATEGORY].len(), 1);
    }

    #[tokio::test]
    async fn test_list_versions() {
        let temp = TempDir::new().unwrap();
        write(&temp, "v1/a.mdx", "x");
        write(&temp, "v2/b.mdx", "y");
        write(&temp, "v2/c.mdx", "z");

        let index = fs_index(&temp);
        let versions = index.list_versions().await.unwrap();

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].name, "v1");
        assert_eq!(versions[0].document_count, 1);
        assert_eq!(versions[1].name, "v2");
        assert_eq!(versions[1].document_count, 2);
    }

    #[tokio::test]
    async fn test_list_versions_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let config = StoreConfig::builder(temp.path().join("absent"))
            .build()
            .unwrap();
        let index = DocumentIndex::new(config).unwrap();
        assert!(index.list_versions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_index_sees_store_writes_through_shared_mem_storage() {
        let storage = Arc::new(MemStorage::new());
        let config = StoreConfig::builder("/docs").build().unwrap();
        let store =
            DocumentStore::with_storage(config.clone(), storage.clone()).unwrap();
        let index = DocumentIndex::with_storage(config, storage).unwrap();

        store
            .create(
                "v1",
                Some("guides"),
                "intro",
                Fields {
                    title: Some("Intro".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let docs = index.scan("v1").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].category, "guides");
        assert_eq!(docs[0].path, "guides/intro.mdx");

        store.delete("v1", "guides/intro.mdx").await.unwrap();
        let docs = index.scan("v1").await.unwrap();
        assert!(docs.is_empty());
        let groups = DocumentIndex::group_by_category(docs);
        assert!(!groups.contains_key("guides"));
    }
}
