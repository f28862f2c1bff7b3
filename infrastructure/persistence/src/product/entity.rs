use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::error;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::value_objects::ProductStatus;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    /// The `status` check constraint keeps this infallible in practice; a row
    /// that slips past it is reported as a store failure.
    pub fn into_domain(self) -> Result<Product, RepositoryError> {
        let status = self.status.parse::<ProductStatus>().map_err(|e| {
            error!(product_id = self.id, error = %e, "Stored product has unknown status");
            RepositoryError::database_error()
        })?;

        Ok(Product {
            id: self.id,
            sku: self.sku,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            status,
            image_url: self.image_url.filter(|url| !url.is_empty()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
