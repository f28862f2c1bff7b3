use std::sync::Arc;

use business::domain::storage::blob_store::BlobStore;
use storage::local::LocalBlobStore;

use super::error::{ConfigError, optional, required};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub base_path: String,
    pub base_url: String,
}

impl StorageConfig {
    /// Environment variables:
    /// - STORAGE_TYPE: backend kind, only "local" is available (default: "local")
    /// - BASE_PATH: directory images are written under
    /// - BASE_URL: public prefix images are served from
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let kind = optional(lookup, "STORAGE_TYPE").unwrap_or_else(|| "local".to_string());
        if !kind.eq_ignore_ascii_case("local") {
            return Err(ConfigError::UnsupportedStorage(kind));
        }

        Ok(Self {
            base_path: required(lookup, "BASE_PATH")?,
            base_url: required(lookup, "BASE_URL")?,
        })
    }

    pub fn blob_store(&self) -> Arc<dyn BlobStore> {
        Arc::new(LocalBlobStore::new(&self.base_path, &self.base_url))
    }
}
