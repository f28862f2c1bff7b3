use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::get_by_sku::{
    GetProductBySkuParams, GetProductBySkuUseCase,
};

pub struct GetProductBySkuUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductBySkuUseCase for GetProductBySkuUseCaseImpl {
    async fn execute(&self, params: GetProductBySkuParams) -> Result<Product, ProductError> {
        self.logger
            .debug(&format!("Fetching product by sku: {}", params.sku));

        self.repository
            .get_by_sku(&params.sku)
            .await
            .map_err(ProductError::from_repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::product::test_support::{MockProductRepo, mock_logger};
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::fixtures;

    #[tokio::test]
    async fn should_return_product_when_sku_exists() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_sku()
            .withf(|sku| sku == "SKU-007")
            .returning(|_| Ok(fixtures::product(7)));

        let use_case = GetProductBySkuUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let product = use_case
            .execute(GetProductBySkuParams {
                sku: "SKU-007".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(product.id, 7);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_sku() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_sku()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = GetProductBySkuUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(GetProductBySkuParams {
                sku: "MISSING".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ProductError::NotFound)));
    }
}
