use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

/// Create request as received; `price` and `status` are parsed during validation.
#[derive(Debug, Clone)]
pub struct CreateProductParams {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub stock: i64,
    pub category: String,
    pub status: String,
}

#[async_trait]
pub trait CreateProductUseCase: Send + Sync {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError>;
}
