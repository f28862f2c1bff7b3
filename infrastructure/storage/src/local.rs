use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::{debug, error};

use business::domain::storage::blob_store::BlobStore;
use business::domain::storage::errors::StorageError;

/// URL segment stored image references are served under.
pub const UPLOADS_SEGMENT: &str = "/uploads/";

/// Blob store backed by a directory on the local filesystem.
pub struct LocalBlobStore {
    root: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves `path` against the root, returning the absolute location and
    /// the normalized relative key.
    fn resolve(&self, path: &str) -> Result<(PathBuf, String), StorageError> {
        let relative = normalize(path)?;
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Ok((self.root.join(relative), key))
    }
}

/// Lexically normalizes a slash-separated relative path. Any `..` that would
/// climb above the root is rejected rather than clamped.
fn normalize(path: &str) -> Result<PathBuf, StorageError> {
    let invalid = || StorageError::InvalidPath(path.to_string());
    let mut clean = PathBuf::new();

    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !clean.pop() {
                    return Err(invalid());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(invalid()),
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(invalid());
    }
    Ok(clean)
}

/// Writes into a uniquely named file beside `target` and renames it into place.
/// The temp file is removed if any step fails.
fn write_atomically(parent: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, bytes: Vec<u8>, path: &str) -> Result<String, StorageError> {
        let (target, key) = self.resolve(path)?;

        let parent = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        tokio::fs::create_dir_all(&parent).await?;

        let size = bytes.len();
        let written = tokio::task::spawn_blocking(move || write_atomically(&parent, &target, &bytes))
            .await
            .map_err(std::io::Error::other)
            .and_then(|result| result);
        if let Err(e) = written {
            error!(path = %key, error = %e, "Failed to write blob");
            return Err(StorageError::Io(e));
        }

        debug!(path = %key, size, "Blob stored");
        Ok(key)
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let (target, key) = self.resolve(path)?;
        match tokio::fs::read(&target).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
                Err(StorageError::NotFound(key))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let (target, key) = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!(path = %key, "Blob deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!(path = %key, error = %e, "Failed to delete blob");
                Err(e.into())
            }
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let (target, _) = self.resolve(path)?;
        match tokio::fs::metadata(&target).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn path_from_url(&self, url: &str) -> String {
        if let Some(rest) = url
            .strip_prefix(self.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        {
            return rest.to_string();
        }
        if let Some((_, rest)) = url.split_once(UPLOADS_SEGMENT) {
            return rest.to_string();
        }
        url.trim_start_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    const BASE_URL: &str = "http://localhost:8080/uploads";

    #[tokio::test]
    async fn should_store_and_fetch_bytes() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), BASE_URL);

        let key = store
            .store(vec![1, 2, 3], "products/1/product-1-image.png")
            .await
            .unwrap();

        assert_eq!(key, "products/1/product-1-image.png");
        assert!(dir.path().join("products/1/product-1-image.png").is_file());
        assert_eq!(store.fetch(&key).await.unwrap(), vec![1, 2, 3]);
        assert!(store.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn should_overwrite_existing_object() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), BASE_URL);

        store.store(vec![1], "a/b.png").await.unwrap();
        store.store(vec![9, 9], "a/b.png").await.unwrap();

        assert_eq!(store.fetch("a/b.png").await.unwrap(), vec![9, 9]);
        assert_eq!(std::fs::read_dir(dir.path().join("a")).unwrap().count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn should_let_last_concurrent_writer_win() {
        let dir = tempdir().unwrap();
        let store = Arc::new(LocalBlobStore::new(dir.path(), BASE_URL));
        let path = "products/1/product-1-image.png";

        let mut tasks = Vec::new();
        for writer in 0..8u8 {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                for _ in 0..25 {
                    store.store(vec![writer; 4096], path).await?;
                }
                Ok::<_, StorageError>(())
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let bytes = store.fetch(path).await.unwrap();
        assert_eq!(bytes.len(), 4096);
        assert!(bytes.iter().all(|b| *b == bytes[0]));

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("products/1"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(leftovers, vec!["product-1-image.png"]);
    }

    #[tokio::test]
    async fn should_normalize_leading_slash_and_dot_segments() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), BASE_URL);

        let key = store.store(vec![7], "/products/./2/../3/x.gif").await.unwrap();
        assert_eq!(key, "products/3/x.gif");
    }

    #[tokio::test]
    async fn should_reject_paths_escaping_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("uploads");
        let store = LocalBlobStore::new(&root, BASE_URL);

        for path in ["../secret.txt", "products/../../secret.txt", "", "/"] {
            let result = store.store(vec![1], path).await;
            assert!(
                matches!(result, Err(StorageError::InvalidPath(_))),
                "expected {path:?} to be rejected"
            );
        }
        assert!(!dir.path().join("secret.txt").exists());
        assert!(matches!(
            store.fetch("../../etc/passwd").await,
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[tokio::test]
    async fn should_report_missing_object_on_fetch() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), BASE_URL);

        assert!(matches!(
            store.fetch("products/9/none.png").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(!store.exists("products/9/none.png").await.unwrap());
    }

    #[tokio::test]
    async fn should_delete_idempotently() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), BASE_URL);

        store.store(vec![1], "products/4/img.jpg").await.unwrap();
        store.delete("products/4/img.jpg").await.unwrap();
        assert!(!store.exists("products/4/img.jpg").await.unwrap());

        assert!(store.delete("products/4/img.jpg").await.is_ok());
    }

    #[test]
    fn should_map_between_paths_and_urls() {
        let store = LocalBlobStore::new("/tmp/unused", "http://localhost:8080/uploads/");

        let url = store.url_for("products/5/product-5-image.png");
        assert_eq!(url, "http://localhost:8080/uploads/products/5/product-5-image.png");
        assert_eq!(store.path_from_url(&url), "products/5/product-5-image.png");
    }

    #[test]
    fn should_derive_path_from_foreign_upload_url() {
        let store = LocalBlobStore::new("/tmp/unused", BASE_URL);

        assert_eq!(
            store.path_from_url("https://old-host.example/uploads/products/1/a.jpg"),
            "products/1/a.jpg"
        );
        assert_eq!(store.path_from_url("products/1/a.jpg"), "products/1/a.jpg");
    }
}
