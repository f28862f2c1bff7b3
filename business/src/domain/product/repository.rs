use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::filter::ProductFilter;
use super::model::{NewProduct, Product, ProductChanges};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fails with `Duplicated` when the SKU is taken.
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError>;
    async fn get_by_id(&self, id: i64) -> Result<Product, RepositoryError>;
    async fn get_by_sku(&self, sku: &str) -> Result<Product, RepositoryError>;
    /// One page of matching products plus the total number of matches.
    async fn list(&self, filter: &ProductFilter) -> Result<(Vec<Product>, i64), RepositoryError>;
    /// Writes only the fields set in `changes`. Empty changes are a no-op.
    async fn update(&self, changes: &ProductChanges) -> Result<(), RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
