use async_trait::async_trait;

use crate::domain::product::errors::ProductError;

pub struct UploadImageParams {
    pub product_id: i64,
    pub bytes: Vec<u8>,
    pub filename: String,
}

#[async_trait]
pub trait UploadImageUseCase: Send + Sync {
    /// Returns the public URL of the stored image.
    async fn execute(&self, params: UploadImageParams) -> Result<String, ProductError>;
}
