use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};
use crate::domain::product::validation::validate_update;

pub struct UpdateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductUseCase for UpdateProductUseCaseImpl {
    async fn execute(&self, params: UpdateProductParams) -> Result<(), ProductError> {
        self.logger
            .info(&format!("Updating product: {}", params.id));

        let changes = validate_update(&params)?;
        if changes.is_empty() {
            self.logger
                .debug(&format!("No fields to update for product: {}", params.id));
        }

        self.repository
            .update(&changes)
            .await
            .map_err(ProductError::from_repository)?;

        self.logger.info(&format!("Product updated: {}", params.id));
        Ok(())
    }
}
