use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::value_objects::FieldUpdate;

/// Partial update as received. Fields left at `Keep` are not touched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductParams {
    pub id: i64,
    pub sku: FieldUpdate<String>,
    pub name: FieldUpdate<String>,
    pub description: FieldUpdate<Option<String>>,
    pub price: FieldUpdate<String>,
    pub stock: FieldUpdate<i64>,
    pub category: FieldUpdate<String>,
    pub status: FieldUpdate<String>,
    pub image_url: FieldUpdate<Option<String>>,
}

impl UpdateProductParams {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait UpdateProductUseCase: Send + Sync {
    async fn execute(&self, params: UpdateProductParams) -> Result<(), ProductError>;
}
