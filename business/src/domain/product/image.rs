//! Upload rules for product images.

use std::path::Path;

use super::errors::ProductError;

/// 5 MiB.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Lower-cased extension of `filename` including the leading dot, if allowed.
pub fn image_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    let ext = format!(".{}", ext.to_lowercase());
    ALLOWED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Checks an upload before any store is touched and returns its extension.
pub fn check_upload(bytes: &[u8], filename: &str) -> Result<String, ProductError> {
    if bytes.is_empty() {
        return Err(ProductError::ImageRequired);
    }
    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ProductError::ImageTooLarge);
    }
    image_extension(filename).ok_or(ProductError::InvalidImageFormat)
}

/// Blob path for a product's image. Re-uploading with the same extension
/// overwrites the previous object.
pub fn image_path(product_id: i64, extension: &str) -> String {
    format!("products/{product_id}/product-{product_id}-image{extension}")
}
