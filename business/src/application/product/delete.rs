use std::sync::Arc;

use async_trait::async_trait;

use crate::application::product::image_cleanup::remove_orphaned_image;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use crate::domain::storage::blob_store::BlobStore;

pub struct DeleteProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub blob_store: Arc<dyn BlobStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteProductUseCase for DeleteProductUseCaseImpl {
    async fn execute(&self, params: DeleteProductParams) -> Result<(), ProductError> {
        self.logger
            .info(&format!("Deleting product: {}", params.id));

        // Read first so the image reference survives the row
        let existing = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(ProductError::from_repository)?;

        self.repository
            .delete(params.id)
            .await
            .map_err(ProductError::from_repository)?;

        if let Some(url) = existing.image() {
            let path = self.blob_store.path_from_url(url);
            remove_orphaned_image(self.blob_store.as_ref(), self.logger.as_ref(), &path).await;
        }

        self.logger.info(&format!("Product deleted: {}", params.id));
        Ok(())
    }
}
