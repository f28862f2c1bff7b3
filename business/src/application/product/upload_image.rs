use std::sync::Arc;

use async_trait::async_trait;

use crate::application::product::image_cleanup::remove_orphaned_image;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::image::{check_upload, image_path};
use crate::domain::product::model::ProductChanges;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::upload_image::{UploadImageParams, UploadImageUseCase};
use crate::domain::storage::blob_store::BlobStore;

pub struct UploadImageUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub blob_store: Arc<dyn BlobStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UploadImageUseCase for UploadImageUseCaseImpl {
    /// Stores the new image, points the product at it, then removes the
    /// previous image if it lived at a different path.
    async fn execute(&self, params: UploadImageParams) -> Result<String, ProductError> {
        let extension = check_upload(&params.bytes, &params.filename)?;

        self.logger.info(&format!(
            "Uploading image for product {} ({} bytes)",
            params.product_id,
            params.bytes.len()
        ));

        let existing = self
            .repository
            .get_by_id(params.product_id)
            .await
            .map_err(ProductError::from_repository)?;

        let stored_path = self
            .blob_store
            .store(params.bytes, &image_path(params.product_id, &extension))
            .await?;
        let image_url = self.blob_store.url_for(&stored_path);

        self.repository
            .update(&ProductChanges::image_url(
                params.product_id,
                Some(image_url.clone()),
            ))
            .await
            .map_err(ProductError::from_repository)?;

        if let Some(previous) = existing.image() {
            let previous_path = self.blob_store.path_from_url(previous);
            if previous_path != stored_path {
                remove_orphaned_image(
                    self.blob_store.as_ref(),
                    self.logger.as_ref(),
                    &previous_path,
                )
                .await;
            }
        }

        self.logger.info(&format!(
            "Image stored for product {}: {}",
            params.product_id, image_url
        ));
        Ok(image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::product::test_support::{
        BASE_URL, MockBlobs, MockProductRepo, blobs_with_urls, logger_expecting_warnings,
        mock_logger,
    };
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::fixtures;
    use crate::domain::product::value_objects::FieldUpdate;
    use crate::domain::storage::errors::StorageError;

    fn params(product_id: i64, filename: &str, size: usize) -> UploadImageParams {
        UploadImageParams {
            product_id,
            bytes: vec![0x89; size],
            filename: filename.to_string(),
        }
    }

    fn untouched_stores() -> (MockProductRepo, MockBlobs) {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().never();
        mock_repo.expect_update().never();
        let mut blobs = MockBlobs::new();
        blobs.expect_store().never();
        blobs.expect_delete().never();
        (mock_repo, blobs)
    }

    #[tokio::test]
    async fn should_store_image_and_point_product_at_it() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(fixtures::product(id)));
        mock_repo
            .expect_update()
            .withf(|changes| {
                changes.id == 4
                    && changes.image_url
                        == FieldUpdate::Set(Some(format!(
                            "{BASE_URL}/products/4/product-4-image.png"
                        )))
                    && changes.name == FieldUpdate::Keep
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut blobs = blobs_with_urls();
        blobs
            .expect_store()
            .withf(|bytes, path| bytes.len() == 1024 && path == "products/4/product-4-image.png")
            .times(1)
            .returning(|_, path| Ok(path.to_string()));
        blobs.expect_delete().never();

        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: mock_logger(),
        };

        let url = use_case.execute(params(4, "photo.png", 1024)).await.unwrap();
        assert_eq!(url, format!("{BASE_URL}/products/4/product-4-image.png"));
    }

    #[tokio::test]
    async fn should_remove_previous_image_stored_under_another_path() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(|id| {
            Ok(fixtures::product_with_image(
                id,
                &format!("{BASE_URL}/products/4/product-4-image.jpg"),
            ))
        });
        mock_repo.expect_update().returning(|_| Ok(()));
        let mut blobs = blobs_with_urls();
        blobs
            .expect_store()
            .returning(|_, path| Ok(path.to_string()));
        blobs
            .expect_delete()
            .withf(|path| path == "products/4/product-4-image.jpg")
            .times(1)
            .returning(|_| Ok(()));

        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: mock_logger(),
        };

        assert!(use_case.execute(params(4, "new.png", 10)).await.is_ok());
    }

    #[tokio::test]
    async fn should_not_delete_image_that_was_just_overwritten() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(|id| {
            Ok(fixtures::product_with_image(
                id,
                &format!("{BASE_URL}/products/4/product-4-image.png"),
            ))
        });
        mock_repo.expect_update().returning(|_| Ok(()));
        let mut blobs = blobs_with_urls();
        blobs
            .expect_store()
            .returning(|_, path| Ok(path.to_string()));
        blobs.expect_delete().never();

        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: mock_logger(),
        };

        assert!(use_case.execute(params(4, "again.PNG", 10)).await.is_ok());
    }

    #[tokio::test]
    async fn should_succeed_and_warn_when_old_image_cleanup_fails() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(|id| {
            Ok(fixtures::product_with_image(id, "products/4/product-4-image.gif"))
        });
        mock_repo.expect_update().returning(|_| Ok(()));
        let mut blobs = blobs_with_urls();
        blobs
            .expect_store()
            .returning(|_, path| Ok(path.to_string()));
        blobs.expect_delete().returning(|_| {
            Err(StorageError::Io(std::io::Error::other("device busy")))
        });

        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: logger_expecting_warnings(1),
        };

        assert!(use_case.execute(params(4, "new.jpeg", 10)).await.is_ok());
    }

    #[tokio::test]
    async fn should_reject_pdf_before_touching_any_store() {
        let (mock_repo, blobs) = untouched_stores();
        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(4, "manual.pdf", 1024)).await;
        assert!(matches!(result, Err(ProductError::InvalidImageFormat)));
    }

    #[tokio::test]
    async fn should_reject_6_mib_jpg_before_touching_any_store() {
        let (mock_repo, blobs) = untouched_stores();
        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(params(4, "huge.jpg", 6 * 1024 * 1024))
            .await;
        assert!(matches!(result, Err(ProductError::ImageTooLarge)));
    }

    #[tokio::test]
    async fn should_require_file_content() {
        let (mock_repo, blobs) = untouched_stores();
        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(4, "empty.png", 0)).await;
        assert!(matches!(result, Err(ProductError::ImageRequired)));
    }

    #[tokio::test]
    async fn should_return_not_found_before_storing_for_missing_product() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));
        let mut blobs = MockBlobs::new();
        blobs.expect_store().never();

        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(77, "a.png", 10)).await;
        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn should_surface_storage_failure_without_updating_row() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(fixtures::product(id)));
        mock_repo.expect_update().never();
        let mut blobs = MockBlobs::new();
        blobs.expect_store().returning(|_, _| {
            Err(StorageError::Io(std::io::Error::other("no space left")))
        });

        let use_case = UploadImageUseCaseImpl {
            repository: Arc::new(mock_repo),
            blob_store: Arc::new(blobs),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(4, "a.png", 10)).await;
        assert!(matches!(result, Err(ProductError::Storage(_))));
    }
}
