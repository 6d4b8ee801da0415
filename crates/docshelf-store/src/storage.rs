//! Storage backends for the document store.
//!
//! The [`Storage`] trait is the seam between logical documents and physical
//! files: the store and indexer only ever touch this interface. Two
//! implementations ship with the crate, [`FsStorage`] for real disk I/O and
//! [`MemStorage`] as an in-memory fake for tests.

use async_trait::async_trait;
use docshelf_core::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Filesystem-shaped primitives the store operates through.
///
/// Listing operations are lenient: a directory that does not exist yields
/// an empty listing, not an error.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a file's full text.
    async fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write a file's full text, creating parent directories as needed.
    /// Implementations must make the write atomic where the medium allows.
    async fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Remove a file.
    async fn remove_file(&self, path: &Path) -> Result<()>;

    /// Rename a file, creating destination parent directories as needed.
    async fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Whether a file or directory exists at the path.
    async fn exists(&self, path: &Path) -> bool;

    /// Create a directory and any missing ancestors.
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Recursively list all files under a directory.
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// List first-level subdirectories of a directory.
    async fn list_dirs(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Remove a directory if (and only if) it is empty. Returns whether the
    /// directory was removed.
    async fn remove_dir_if_empty(&self, path: &Path) -> Result<bool>;

    /// Size of a file in bytes.
    async fn file_size(&self, path: &Path) -> Result<u64>;
}

/// Disk-backed storage using tokio's filesystem primitives.
///
/// Writes go to a temp file first and land via rename, so concurrent
/// readers never observe a half-written document.
#[derive(Debug, Default, Clone)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path).await.map_err(Error::io)
    }

    async fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }

        // Write to temp file first, then atomic rename.
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(Error::io)?;
        tokio::fs::rename(&temp_path, path).await.map_err(Error::io)
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        tokio::fs::remove_file(path).await.map_err(Error::io)
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }
        tokio::fs::rename(from, to).await.map_err(Error::io)
    }

    async fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path).await.map_err(Error::io)
    }

    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(dir).follow_links(false) {
            let entry = entry.map_err(|e| Error::other(format!("walk failed: {}", e)))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    async fn list_dirs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await.map_err(Error::io)?;
        while let Some(entry) = entries.next_entry().await.map_err(Error::io)? {
            if entry.file_type().await.map_err(Error::io)?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    async fn remove_dir_if_empty(&self, path: &Path) -> Result<bool> {
        let mut entries = tokio::fs::read_dir(path).await.map_err(Error::io)?;
        if entries.next_entry().await.map_err(Error::io)?.is_some() {
            return Ok(false);
        }
        tokio::fs::remove_dir(path).await.map_err(Error::io)?;
        Ok(true)
    }

    async fn file_size(&self, path: &Path) -> Result<u64> {
        let meta = tokio::fs::metadata(path).await.map_err(Error::io)?;
        Ok(meta.len())
    }
}

/// In-memory storage fake for exercising store and indexer logic without
/// disk I/O.
///
/// Directories exist implicitly for every stored file's ancestors, plus any
/// created explicitly via [`Storage::create_dir_all`].
#[derive(Debug, Default)]
pub struct MemStorage {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    dirs: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn ancestors_of(path: &Path) -> Vec<PathBuf> {
        path.ancestors()
            .skip(1)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect()
    }

    async fn is_dir(&self, path: &Path) -> bool {
        if self.dirs.read().await.contains(path) {
            return true;
        }
        let files = self.files.read().await;
        files.keys().any(|f| f.starts_with(path) && f != path)
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| Error::not_found(path))
    }

    async fn write(&self, path: &Path, content: &str) -> Result<()> {
        let ancestors = Self::ancestors_of(path);
        self.dirs.write().await.extend(ancestors);
        self.files
            .write()
            .await
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        self.files
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(path))
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let content = {
            let mut files = self.files.write().await;
            files.remove(from).ok_or_else(|| Error::not_found(from))?
        };
        self.write(to, &content).await
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.read().await.contains_key(path) || self.is_dir(path).await
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut ancestors = Self::ancestors_of(path);
        ancestors.push(path.to_path_buf());
        self.dirs.write().await.extend(ancestors);
        Ok(())
    }

    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self
            .files
            .read()
            .await
            .keys()
            .filter(|f| f.starts_with(dir))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }

    async fn list_dirs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut found = HashSet::new();

        for candidate in self.dirs.read().await.iter() {
            if candidate.parent() == Some(dir) {
                found.insert(candidate.clone());
            }
        }
        for file in self.files.read().await.keys() {
            let mut current = file.parent();
            while let Some(p) = current {
                if p.parent() == Some(dir) {
                    found.insert(p.to_path_buf());
                }
                current = p.parent();
            }
        }

        let mut dirs: Vec<PathBuf> = found.into_iter().collect();
        dirs.sort();
        Ok(dirs)
    }

    async fn remove_dir_if_empty(&self, path: &Path) -> Result<bool> {
        let has_files = self
            .files
            .read()
            .await
            .keys()
            .any(|f| f.starts_with(path) && f != path);
        if has_files {
            return Ok(false);
        }

        let mut dirs = self.dirs.write().await;
        let has_subdirs = dirs.iter().any(|d| d.starts_with(path) && d != path);
        if has_subdirs {
            return Ok(false);
        }
        dirs.remove(path);
        Ok(true)
    }

    async fn file_size(&self, path: &Path) -> Result<u64> {
        Ok(self.read_to_string(path).await?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fs_write_and_read() {
        let temp = TempDir::new().unwrap();
        let storage = FsStorage::new();
        let path = temp.path().join("nested/dir/doc.mdx");

        storage.write(&path, "hello").await.unwrap();
        assert_eq!(storage.read_to_string(&path).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_fs_write_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let storage = FsStorage::new();
        storage
            .write(&temp.path().join("doc.mdx"), "content")
            .await
            .unwrap();

        for entry in std::fs::read_dir(temp.path()).unwrap() {
            let path = entry.unwrap().path();
            assert_ne!(
                path.extension().and_then(|e| e.to_str()),
                Some("tmp"),
                "temporary file left after write"
            );
        }
    }

    #[tokio::test]
    async fn test_fs_list_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let storage = FsStorage::new();
        let files = storage.list_files(&temp.path().join("absent")).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_fs_remove_dir_if_empty() {
        let temp = TempDir::new().unwrap();
        let storage = FsStorage::new();
        let dir = temp.path().join("cat");
        let file = dir.join("doc.mdx");

        storage.write(&file, "x").await.unwrap();
        assert!(!storage.remove_dir_if_empty(&dir).await.unwrap());

        storage.remove_file(&file).await.unwrap();
        assert!(storage.remove_dir_if_empty(&dir).await.unwrap());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_mem_roundtrip() {
        let storage = MemStorage::new();
        let path = Path::new("/docs/v1/guides/intro.mdx");

        storage.write(path, "hello").await.unwrap();
        assert_eq!(storage.read_to_string(path).await.unwrap(), "hello");
        assert!(storage.exists(Path::new("/docs/v1/guides")).await);
    }

    #[tokio::test]
    async fn test_mem_rename() {
        let storage = MemStorage::new();
        storage
            .write(Path::new("/docs/v1/a.mdx"), "x")
            .await
            .unwrap();
        storage
            .rename(Path::new("/docs/v1/a.mdx"), Path::new("/docs/v1/b.mdx"))
            .await
            .unwrap();

        assert!(!storage.exists(Path::new("/docs/v1/a.mdx")).await);
        assert_eq!(
            storage
                .read_to_string(Path::new("/docs/v1/b.mdx"))
                .await
                .unwrap(),
            "x"
        );
    }

    #[tokio::test]
    async fn test_mem_list_dirs() {
        let storage = MemStorage::new();
        storage
            .write(Path::new("/docs/v1/intro.mdx"), "x")
            .await
            .unwrap();
        storage
            .write(Path::new("/docs/v2/guides/a.mdx"), "y")
            .await
            .unwrap();

        let dirs = storage.list_dirs(Path::new("/docs")).await.unwrap();
        assert_eq!(
            dirs,
            vec![PathBuf::from("/docs/v1"), PathBuf::from("/docs/v2")]
        );
    }

    #[tokio::test]
    async fn test_mem_remove_dir_if_empty() {
        let storage = MemStorage::new();
        let file = Path::new("/docs/v1/cat/doc.mdx");
        storage.write(file, "x").await.unwrap();

        let dir = Path::new("/docs/v1/cat");
        assert!(!storage.remove_dir_if_empty(dir).await.unwrap());

        storage.remove_file(file).await.unwrap();
        assert!(storage.remove_dir_if_empty(dir).await.unwrap());
        assert!(!storage.exists(dir).await);
    }
}
