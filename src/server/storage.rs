//! Blob storage for uploaded media.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Stores, addresses and removes files by relative path.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Name recorded on media rows stored through this store.
    fn disk(&self) -> &str;

    async fn put(&self, path: &str, bytes: &[u8]) -> std::io::Result<()>;

    /// Removes a file; missing files are not an error.
    async fn delete(&self, path: &str) -> std::io::Result<()>;

    /// Public URL of a stored file.
    fn url(&self, path: &str) -> String;
}

/// Files under a local directory, served from a base URL.
pub struct LocalDiskStore {
    root: PathBuf,
    base_url: String,
}

impl LocalDiskStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(Path::new(path))
    }
}

#[async_trait]
impl BlobStore for LocalDiskStore {
    fn disk(&self) -> &str {
        "public"
    }

    async fn put(&self, path: &str, bytes: &[u8]) -> std::io::Result<()> {
        let full_path = self.full_path(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(full_path, bytes).await
    }

    async fn delete(&self, path: &str) -> std::io::Result<()> {
        match tokio::fs::remove_file(self.full_path(path)).await {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn writes_and_deletes_files() -> std::io::Result<()> {
        let root = std::env::temp_dir().join(format!("blob-store-{}", Uuid::new_v4()));
        let store = LocalDiskStore::new(&root, "/storage/");

        store.put("media/a/b.png", b"png").await?;
        assert_eq!(tokio::fs::read(root.join("media/a/b.png")).await?, b"png");
        assert_eq!(store.url("media/a/b.png"), "/storage/media/a/b.png");

        store.delete("media/a/b.png").await?;
        store.delete("media/a/b.png").await?;
        assert!(!root.join("media/a/b.png").exists());

        tokio::fs::remove_dir_all(root).await
    }
}
