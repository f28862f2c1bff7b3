use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::ProductChanges;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::delete_image::{DeleteImageParams, DeleteImageUseCase};
use crate::domain::storage::blob_store::BlobStore;

pub struct DeleteImageUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub blob_store: Arc<dyn BlobStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteImageUseCase for DeleteImageUseCaseImpl {
    async fn execute(&self, params: DeleteImageParams) -> Result<(), ProductError> {
        self.logger
            .info(&format!("Deleting image for product: {}", params.product_id));

        let existing = self
            .repository
            .get_by_id(params.product_id)
            .await
            .map_err(ProductError::from_repository)?;

        let url = existing.image().ok_or(ProductError::NoImage)?;
        let path = self.blob_store.path_from_url(url);

        // Unlike the cascades, this deletion is the requested action
        self.blob_store.delete(&path).await?;

        self.repository
            .update(&ProductChanges::image_url(params.product_id, None))
            .await
            .map_err(ProductError::from_repository)?;

        self.logger
            .info(&format!("Image deleted for product: {}", params.product_id));
        Ok(())
    }
}
