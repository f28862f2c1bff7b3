use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::filter::ProductFilter;
use crate::domain::product::model::{NewProduct, Product, ProductChanges};
use crate::domain::product::repository::ProductRepository;
use crate::domain::storage::blob_store::BlobStore;
use crate::domain::storage::errors::StorageError;

pub const BASE_URL: &str = "http://localhost:8080/uploads";

mock! {
    pub ProductRepo {}

    #[async_trait]
    impl ProductRepository for ProductRepo {
        async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError>;
        async fn get_by_id(&self, id: i64) -> Result<Product, RepositoryError>;
        async fn get_by_sku(&self, sku: &str) -> Result<Product, RepositoryError>;
        async fn list(&self, filter: &ProductFilter) -> Result<(Vec<Product>, i64), RepositoryError>;
        async fn update(&self, changes: &ProductChanges) -> Result<(), RepositoryError>;
        async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
    }
}

mock! {
    pub Blobs {}

    #[async_trait]
    impl BlobStore for Blobs {
        async fn store(&self, bytes: Vec<u8>, path: &str) -> Result<String, StorageError>;
        async fn fetch(&self, path: &str) -> Result<Vec<u8>, StorageError>;
        async fn delete(&self, path: &str) -> Result<(), StorageError>;
        async fn exists(&self, path: &str) -> Result<bool, StorageError>;
        fn url_for(&self, path: &str) -> String;
        fn path_from_url(&self, url: &str) -> String;
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

/// Logger that fails the test unless exactly `count` warnings are emitted.
pub fn logger_expecting_warnings(count: usize) -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().times(count).returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

/// Blob store mock with the URL mapping of a store rooted at [`BASE_URL`].
pub fn blobs_with_urls() -> MockBlobs {
    let mut blobs = MockBlobs::new();
    blobs
        .expect_url_for()
        .returning(|path| format!("{BASE_URL}/{path}"));
    blobs.expect_path_from_url().returning(|url| {
        url.strip_prefix(&format!("{BASE_URL}/"))
            .unwrap_or(url)
            .to_string()
    });
    blobs
}
