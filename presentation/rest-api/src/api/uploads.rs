use std::sync::Arc;

use poem::{
    IntoResponse, Response, handler,
    http::StatusCode,
    web::{Data, Path},
};
use poem_openapi::payload::Json;
use tracing::error;

use business::domain::storage::blob_store::BlobStore;
use business::domain::storage::errors::StorageError;

use crate::api::error::{ErrorResponse, NOT_FOUND};

/// Content type for a stored image, derived from its extension.
pub fn content_type_for(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Serves `GET /uploads/*path` straight from the blob store.
#[handler]
pub async fn serve_upload(
    Path(path): Path<String>,
    Data(blob_store): Data<&Arc<dyn BlobStore>>,
) -> Response {
    match blob_store.fetch(&path).await {
        Ok(bytes) => bytes
            .with_content_type(content_type_for(&path))
            .into_response(),
        Err(StorageError::InvalidPath(_)) => Json(ErrorResponse::bad_request("Invalid file path"))
            .with_status(StatusCode::BAD_REQUEST)
            .into_response(),
        Err(StorageError::NotFound(_)) => Json(ErrorResponse::new(NOT_FOUND, "File not found"))
            .with_status(StatusCode::NOT_FOUND)
            .into_response(),
        Err(e) => {
            error!(path = %path, error = ?e, "Failed to read stored file");
            Json(ErrorResponse::internal())
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_derive_image_content_types() {
        assert_eq!(content_type_for("products/1/product-1-image.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }
}
