use crate::domain::logger::Logger;
use crate::domain::storage::blob_store::BlobStore;

/// Deletes an image whose removal is advisory.
///
/// The caller's primary operation has already committed, so a failure here is
/// reported through `logger.warn` and otherwise ignored. Returns whether the
/// object was removed.
pub async fn remove_orphaned_image(
    blob_store: &dyn BlobStore,
    logger: &dyn Logger,
    path: &str,
) -> bool {
    match blob_store.delete(path).await {
        Ok(()) => {
            logger.debug(&format!("Removed orphaned image: {}", path));
            true
        }
        Err(e) => {
            logger.warn(&format!("Failed to remove orphaned image {}: {}", path, e));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::product::test_support::{
        MockBlobs, logger_expecting_warnings, mock_logger,
    };
    use crate::domain::storage::errors::StorageError;

    #[tokio::test]
    async fn should_report_success_without_warning() {
        let mut blobs = MockBlobs::new();
        blobs.expect_delete().times(1).returning(|_| Ok(()));
        let logger = logger_expecting_warnings(0);

        assert!(remove_orphaned_image(&blobs, logger.as_ref(), "products/1/a.png").await);
    }

    #[tokio::test]
    async fn should_log_and_swallow_failure() {
        let mut blobs = MockBlobs::new();
        blobs.expect_delete().returning(|_| {
            Err(StorageError::Io(std::io::Error::other("disk unplugged")))
        });
        let logger = logger_expecting_warnings(1);

        assert!(!remove_orphaned_image(&blobs, logger.as_ref(), "products/1/a.png").await);
    }

    #[tokio::test]
    async fn should_pass_path_through_to_store() {
        let mut blobs = MockBlobs::new();
        blobs
            .expect_delete()
            .withf(|path| path == "products/9/product-9-image.gif")
            .times(1)
            .returning(|_| Ok(()));

        remove_orphaned_image(&blobs, mock_logger().as_ref(), "products/9/product-9-image.gif")
            .await;
    }
}
