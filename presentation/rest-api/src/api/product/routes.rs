use std::sync::Arc;

use poem::Error as PoemError;
use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use tracing::warn;

use business::domain::product::errors::ProductError;
use business::domain::product::filter::ListProductsParams;
use business::domain::product::model::Product;
use business::domain::product::use_cases::create::CreateProductUseCase;
use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use business::domain::product::use_cases::delete_image::{DeleteImageParams, DeleteImageUseCase};
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::get_by_sku::{
    GetProductBySkuParams, GetProductBySkuUseCase,
};
use business::domain::product::use_cases::list::ListProductsUseCase;
use business::domain::product::use_cases::update::UpdateProductUseCase;
use business::domain::product::use_cases::upload_image::{UploadImageParams, UploadImageUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse, MessageResponse};
use crate::api::product::dto::{
    CreateProductRequest, ImageEnvelope, ImageResponse, ProductEnvelope, ProductListEnvelope,
    UpdateProductRequest, UploadImageForm,
};
use crate::api::tags::ApiTags;

pub struct ProductApi {
    create_use_case: Arc<dyn CreateProductUseCase>,
    list_use_case: Arc<dyn ListProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    get_by_sku_use_case: Arc<dyn GetProductBySkuUseCase>,
    update_use_case: Arc<dyn UpdateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    upload_image_use_case: Arc<dyn UploadImageUseCase>,
    delete_image_use_case: Arc<dyn DeleteImageUseCase>,
}

impl ProductApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_use_case: Arc<dyn CreateProductUseCase>,
        list_use_case: Arc<dyn ListProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        get_by_sku_use_case: Arc<dyn GetProductBySkuUseCase>,
        update_use_case: Arc<dyn UpdateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        upload_image_use_case: Arc<dyn UploadImageUseCase>,
        delete_image_use_case: Arc<dyn DeleteImageUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            list_use_case,
            get_by_id_use_case,
            get_by_sku_use_case,
            update_use_case,
            delete_use_case,
            upload_image_use_case,
            delete_image_use_case,
        }
    }
}

/// Product management API
///
/// Endpoints for creating, reading, updating, and deleting catalogue products
/// and their images.
#[OpenApi(prefix_path = "/api/v1")]
impl ProductApi {
    /// Create a new product
    #[oai(path = "/product", method = "post", tag = "ApiTags::Products")]
    async fn create_product(&self, body: Json<CreateProductRequest>) -> CreateProductResponse {
        match self.create_use_case.execute(body.0.into()).await {
            Ok(product) => CreateProductResponse::Created(Json(ProductEnvelope::created(product))),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateProductResponse::BadRequest(json),
                    409 => CreateProductResponse::Conflict(json),
                    422 => CreateProductResponse::UnprocessableEntity(json),
                    _ => CreateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// List products
    ///
    /// Filters are combined with AND. `name` and `sku` match substrings
    /// case-insensitively, `category` matches whole values case-insensitively,
    /// and the price bounds are inclusive.
    #[oai(path = "/product", method = "get", tag = "ApiTags::Products")]
    async fn list_products(
        &self,
        name: Query<Option<String>>,
        sku: Query<Option<String>>,
        category: Query<Option<String>>,
        status: Query<Option<String>>,
        min_price: Query<Option<String>>,
        max_price: Query<Option<String>>,
        page: Query<Option<i64>>,
        limit: Query<Option<i64>>,
        sort_by: Query<Option<String>>,
        sort_order: Query<Option<String>>,
    ) -> ListProductsResponse {
        let params = ListProductsParams {
            name: non_blank(name.0),
            sku: non_blank(sku.0),
            category: non_blank(category.0),
            status: non_blank(status.0),
            min_price: non_blank(min_price.0),
            max_price: non_blank(max_price.0),
            page: page.0.unwrap_or_default(),
            limit: limit.0.unwrap_or_default(),
            sort_by: non_blank(sort_by.0),
            sort_order: non_blank(sort_order.0),
        };

        match self.list_use_case.execute(params).await {
            Ok(page) => ListProductsResponse::Ok(Json(ProductListEnvelope {
                success: true,
                data: page.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    422 => ListProductsResponse::UnprocessableEntity(json),
                    _ => ListProductsResponse::InternalError(json),
                }
            }
        }
    }

    /// Get a product by SKU
    #[oai(path = "/product/sku/:sku", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_sku(&self, sku: Path<String>) -> GetProductResponse {
        get_product_response(
            self.get_by_sku_use_case
                .execute(GetProductBySkuParams { sku: sku.0 })
                .await,
        )
    }

    /// Get a product by ID
    #[oai(path = "/product/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(&self, id: Path<i64>) -> GetProductResponse {
        get_product_response(
            self.get_by_id_use_case
                .execute(GetProductByIdParams { id: id.0 })
                .await,
        )
    }

    /// Update a product
    ///
    /// Only the fields present in the body are written.
    #[oai(path = "/product", method = "put", tag = "ApiTags::Products")]
    async fn update_product(&self, body: Json<UpdateProductRequest>) -> MutationResponse {
        match self.update_use_case.execute(body.0.into()).await {
            Ok(()) => MutationResponse::Ok(Json(MessageResponse::new(
                "Product updated successfully",
            ))),
            Err(err) => MutationResponse::from_error(err.into_error_response()),
        }
    }

    /// Delete a product
    ///
    /// Any attached image is removed as well.
    #[oai(path = "/product/:id", method = "delete", tag = "ApiTags::Products")]
    async fn delete_product(&self, id: Path<i64>) -> MutationResponse {
        match self
            .delete_use_case
            .execute(DeleteProductParams { id: id.0 })
            .await
        {
            Ok(()) => MutationResponse::Ok(Json(MessageResponse::new(
                "Product deleted successfully",
            ))),
            Err(err) => MutationResponse::from_error(err.into_error_response()),
        }
    }

    /// Upload a product image
    ///
    /// Multipart form with an `image` field. JPG, JPEG, PNG and GIF up to 5MB
    /// are accepted; an existing image is replaced.
    #[oai(path = "/product/:id/image", method = "post", tag = "ApiTags::Products")]
    async fn upload_image(&self, id: Path<i64>, form: UploadImageForm) -> UploadImageResponse {
        let (bytes, filename) = match form.image {
            Some(upload) => {
                let filename = upload.file_name().unwrap_or_default().to_string();
                match upload.into_vec().await {
                    Ok(bytes) => (bytes, filename),
                    Err(e) => {
                        warn!(error = %e, "Failed to read uploaded image");
                        return UploadImageResponse::BadRequest(Json(
                            ErrorResponse::bad_request("Failed to parse form"),
                        ));
                    }
                }
            }
            None => (Vec::new(), String::new()),
        };

        let params = UploadImageParams {
            product_id: id.0,
            bytes,
            filename,
        };

        match self.upload_image_use_case.execute(params).await {
            Ok(image_url) => UploadImageResponse::Ok(Json(ImageEnvelope {
                success: true,
                message: "Image uploaded successfully".to_string(),
                data: ImageResponse { image_url },
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UploadImageResponse::BadRequest(json),
                    404 => UploadImageResponse::NotFound(json),
                    _ => UploadImageResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a product image
    #[oai(path = "/product/:id/image", method = "delete", tag = "ApiTags::Products")]
    async fn delete_image(&self, id: Path<i64>) -> MutationResponse {
        match self
            .delete_image_use_case
            .execute(DeleteImageParams { product_id: id.0 })
            .await
        {
            Ok(()) => MutationResponse::Ok(Json(MessageResponse::new(
                "Image deleted successfully",
            ))),
            Err(err) => MutationResponse::from_error(err.into_error_response()),
        }
    }
}

fn get_product_response(result: Result<Product, ProductError>) -> GetProductResponse {
    match result {
        Ok(product) => GetProductResponse::Ok(Json(ProductEnvelope::new(product))),
        Err(err) => {
            let (status, json) = err.into_error_response();
            match status.as_u16() {
                404 => GetProductResponse::NotFound(json),
                _ => GetProductResponse::InternalError(json),
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn malformed(err: &PoemError) -> Json<ErrorResponse> {
    Json(ErrorResponse::bad_request(format!("Invalid request: {err}")))
}

#[derive(poem_openapi::ApiResponse)]
#[oai(bad_request_handler = "create_bad_request")]
pub enum CreateProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn create_bad_request(err: PoemError) -> CreateProductResponse {
    CreateProductResponse::BadRequest(malformed(&err))
}

#[derive(poem_openapi::ApiResponse)]
#[oai(bad_request_handler = "list_bad_request")]
pub enum ListProductsResponse {
    #[oai(status = 200)]
    Ok(Json<ProductListEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn list_bad_request(err: PoemError) -> ListProductsResponse {
    ListProductsResponse::BadRequest(malformed(&err))
}

#[derive(poem_openapi::ApiResponse)]
#[oai(bad_request_handler = "get_bad_request")]
pub enum GetProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn get_bad_request(err: PoemError) -> GetProductResponse {
    GetProductResponse::BadRequest(malformed(&err))
}

/// Shared by update, delete and delete-image, which all answer with a
/// message-only envelope.
#[derive(poem_openapi::ApiResponse)]
#[oai(bad_request_handler = "mutation_bad_request")]
pub enum MutationResponse {
    #[oai(status = 200)]
    Ok(Json<MessageResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl MutationResponse {
    fn from_error((status, json): (poem::http::StatusCode, Json<ErrorResponse>)) -> Self {
        match status.as_u16() {
            400 => MutationResponse::BadRequest(json),
            404 => MutationResponse::NotFound(json),
            409 => MutationResponse::Conflict(json),
            422 => MutationResponse::UnprocessableEntity(json),
            _ => MutationResponse::InternalError(json),
        }
    }
}

fn mutation_bad_request(err: PoemError) -> MutationResponse {
    MutationResponse::BadRequest(malformed(&err))
}

#[derive(poem_openapi::ApiResponse)]
#[oai(bad_request_handler = "upload_bad_request")]
pub enum UploadImageResponse {
    #[oai(status = 200)]
    Ok(Json<ImageEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn upload_bad_request(err: PoemError) -> UploadImageResponse {
    UploadImageResponse::BadRequest(malformed(&err))
}
