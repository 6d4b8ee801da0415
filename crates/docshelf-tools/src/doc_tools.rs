//! Document operation tools: one method per externally exposed route.
//!
//! Thin wrappers over [`DocumentStore`] and [`DocumentIndex`] that speak
//! JSON, the interchange shape of the hosting handlers.

use docshelf_codec::frontmatter::Fields;
use docshelf_store::prelude::*;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

use crate::response::success;

/// Document tools context
#[derive(Clone)]
pub struct DocTools {
    pub store: Arc<DocumentStore>,
    pub index: Arc<DocumentIndex>,
}

impl DocTools {
    /// Create new document tools over a prebuilt store and index.
    pub fn new(store: Arc<DocumentStore>, index: Arc<DocumentIndex>) -> Self {
        Self { store, index }
    }

    /// Open tools over a documentation root path, expanding `~`.
    pub fn open(root: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(root);
        let root = PathBuf::from(expanded.as_ref());

        let config = StoreConfig::builder(root).build()?;
        Self::from_config(config)
    }

    /// Build tools from an explicit configuration.
    pub fn from_config(config: StoreConfig) -> Result<Self> {
        let store = DocumentStore::new(config.clone())?;
        let index = DocumentIndex::new(config)?;
        Ok(Self::new(Arc::new(store), Arc::new(index)))
    }

    /// List version namespaces.
    pub async fn list_versions(&self) -> Result<Value> {
        let versions = self.index.list_versions().await?;
        Ok(success(json!({ "versions": versions })))
    }

    /// List documents, optionally filtered to one version.
    ///
    /// Always returns the flat ordered list plus the category grouping.
    pub async fn list_documents(&self, version: Option<&str>) -> Result<Value> {
        let documents = match version {
            Some(v) => self.index.scan(v).await?,
            None => {
                let mut all = Vec::new();
                for info in self.index.list_versions().await? {
                    all.extend(self.index.scan(&info.name).await?);
                }
                all
            }
        };

        let categories = DocumentIndex::group_by_category(documents.clone());
        Ok(success(json!({
            "documents": documents,
            "categories": categories,
        })))
    }

    /// Read a single document by logical path.
    pub async fn read_document(&self, version: &str, path: &str) -> Result<Value> {
        let document = self.store.read(version, path).await?;
        Ok(success(json!({ "document": document })))
    }

    /// Create a new document with a metadata stub.
    pub async fn create_document(
        &self,
        version: &str,
        category: Option<&str>,
        file_name: &str,
        fields: Fields,
    ) -> Result<Value> {
        let document = self
            .store
            .create(version, category, file_name, fields)
            .await?;
        Ok(success(json!({ "document": document })))
    }

    /// Overwrite a document's frontmatter and content.
    pub async fn save_document(
        &self,
        version: &str,
        path: &str,
        fields: Fields,
        content: &str,
        expected_hash: Option<&str>,
    ) -> Result<Value> {
        let document = self
            .store
            .save(version, path, fields, content, expected_hash)
            .await?;
        Ok(success(json!({ "document": document })))
    }

    /// Delete a document.
    pub async fn delete_document(&self, version: &str, path: &str) -> Result<Value> {
        self.store.delete(version, path).await?;
        Ok(success(json!({ "deleted": path })))
    }

    /// Rename a document within its version.
    pub async fn rename_document(
        &self,
        version: &str,
        old_path: &str,
        new_path: &str,
    ) -> Result<Value> {
        let document = self.store.rename(version, old_path, new_path).await?;
        Ok(success(json!({ "document": document })))
    }

    /// Duplicate a document within its version.
    pub async fn duplicate_document(
        &self,
        version: &str,
        old_path: &str,
        new_path: &str,
    ) -> Result<Value> {
        let document = self.store.duplicate(version, old_path, new_path).await?;
        Ok(success(json!({ "document": document })))
    }

    /// Create a category directory within a version.
    pub async fn create_category(&self, version: &str, name: &str) -> Result<Value> {
        self.store.create_category(version, name).await?;
        Ok(success(json!({ "category": name })))
    }
}
