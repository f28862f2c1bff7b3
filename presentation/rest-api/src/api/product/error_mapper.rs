use poem::http::StatusCode;
use poem_openapi::payload::Json;
use tracing::error;

use business::domain::product::errors::ProductError;

use crate::api::error::{
    BAD_REQUEST, CONFLICT, ErrorResponse, IntoErrorResponse, NOT_FOUND, VALIDATION_ERROR,
};

impl IntoErrorResponse for ProductError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, body) = match &self {
            ProductError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(VALIDATION_ERROR, "Validation failed")
                    .with_details(errors.to_map()),
            ),
            ProductError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(NOT_FOUND, "Product not found"),
            ),
            ProductError::SkuExists => (
                StatusCode::CONFLICT,
                ErrorResponse::new(CONFLICT, "Product with this SKU already exists"),
            ),
            ProductError::ImageRequired => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(BAD_REQUEST, "Image file is required"),
            ),
            ProductError::ImageTooLarge => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(BAD_REQUEST, "Image file size exceeds maximum limit of 5MB"),
            ),
            ProductError::InvalidImageFormat => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    BAD_REQUEST,
                    "Invalid image format, only JPG, JPEG, PNG, GIF are allowed",
                ),
            ),
            ProductError::NoImage => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(BAD_REQUEST, "Product has no image"),
            ),
            ProductError::Repository(e) => {
                error!(error = %e, "Product store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal())
            }
            ProductError::Storage(e) => {
                error!(error = ?e, "Blob store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal())
            }
        };

        (status, Json(body))
    }
}
