use super::validation::ValidationErrors;
use crate::domain::errors::RepositoryError;
use crate::domain::storage::errors::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.validation_failed")]
    Validation(#[from] ValidationErrors),
    #[error("product.not_found")]
    NotFound,
    #[error("product.sku_exists")]
    SkuExists,
    #[error("product.image_required")]
    ImageRequired,
    #[error("product.image_too_large")]
    ImageTooLarge,
    #[error("product.invalid_image_format")]
    InvalidImageFormat,
    #[error("product.no_image")]
    NoImage,
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
    #[error("storage.failure")]
    Storage(#[from] StorageError),
}

impl ProductError {
    /// Lifts a store failure into the product vocabulary: missing rows become
    /// `NotFound` and unique violations become `SkuExists`.
    pub fn from_repository(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => ProductError::NotFound,
            RepositoryError::Duplicated => ProductError::SkuExists,
            other => ProductError::Repository(other),
        }
    }
}
