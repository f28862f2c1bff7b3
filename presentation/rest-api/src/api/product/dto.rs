use std::borrow::Cow;

use chrono::{DateTime, Utc};
use poem_openapi::registry::{MetaSchema, MetaSchemaRef};
use poem_openapi::types::{MaybeUndefined, ParseError, ParseFromJSON, ParseResult, ToJSON, Type};
use poem_openapi::{Enum, Multipart, Object, types::multipart::Upload};
use serde_json::Value;

use business::domain::product::model::{Product, ProductPage};
use business::domain::product::use_cases::create::CreateProductParams;
use business::domain::product::use_cases::update::UpdateProductParams;
use business::domain::product::value_objects::{FieldUpdate, ProductStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum ProductStatusDto {
    Active,
    Inactive,
}

impl From<ProductStatus> for ProductStatusDto {
    fn from(status: ProductStatus) -> Self {
        match status {
            ProductStatus::Active => ProductStatusDto::Active,
            ProductStatus::Inactive => ProductStatusDto::Inactive,
        }
    }
}

/// Decimal amount accepted either as a JSON string (`"19.99"`) or a JSON
/// number (`19.99`). The textual form is kept for the validator, so no value is
/// ever carried as a float.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecimalInput(pub String);

impl Type for DecimalInput {
    const IS_REQUIRED: bool = true;

    type RawValueType = Self;

    type RawElementValueType = Self;

    fn name() -> Cow<'static, str> {
        "decimal".into()
    }

    fn schema_ref() -> MetaSchemaRef {
        MetaSchemaRef::Inline(Box::new(MetaSchema {
            one_of: vec![
                MetaSchemaRef::Inline(Box::new(MetaSchema::new("string"))),
                MetaSchemaRef::Inline(Box::new(MetaSchema::new("number"))),
            ],
            ..MetaSchema::ANY
        }))
    }

    fn as_raw_value(&self) -> Option<&Self::RawValueType> {
        Some(self)
    }

    fn raw_element_iter<'a>(
        &'a self,
    ) -> Box<dyn Iterator<Item = &'a Self::RawElementValueType> + 'a> {
        Box::new(self.as_raw_value().into_iter())
    }
}

impl ParseFromJSON for DecimalInput {
    fn parse_from_json(value: Option<Value>) -> ParseResult<Self> {
        match value {
            // Number's Display is the shortest exact rendering of the parsed value
            Some(Value::Number(number)) => Ok(Self(number.to_string())),
            Some(Value::String(text)) => Ok(Self(text)),
            Some(other) => Err(ParseError::expected_type(other)),
            None => Err(ParseError::expected_input()),
        }
    }
}

impl ToJSON for DecimalInput {
    fn to_json(&self) -> Option<Value> {
        Some(Value::String(self.0.clone()))
    }
}

/// Missing fields fall back to empty values so the validator reports them
/// alongside every other violation.
#[derive(Debug, Clone, Object)]
pub struct CreateProductRequest {
    /// Unique stock-keeping unit (max 100 characters)
    #[oai(default)]
    pub sku: String,
    #[oai(default)]
    pub name: String,
    pub description: Option<String>,
    /// Decimal price, at most two fractional digits (e.g. "19.99" or 19.99)
    #[oai(default)]
    pub price: DecimalInput,
    #[oai(default)]
    pub stock: i64,
    /// Max 100 characters
    #[oai(default)]
    pub category: String,
    /// "Active" or "Inactive"
    #[oai(default)]
    pub status: String,
}

impl From<CreateProductRequest> for CreateProductParams {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            sku: request.sku,
            name: request.name,
            description: request.description,
            price: request.price.0,
            stock: request.stock,
            category: request.category,
            status: request.status,
        }
    }
}

/// Partial update. Omitted fields are left untouched; `description` and
/// `image_url` may be sent as `null` to clear them.
#[derive(Debug, Clone, Object)]
pub struct UpdateProductRequest {
    #[oai(default)]
    pub id: i64,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: MaybeUndefined<String>,
    pub price: Option<DecimalInput>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub image_url: MaybeUndefined<String>,
}

fn nullable(value: MaybeUndefined<String>) -> FieldUpdate<Option<String>> {
    match value {
        MaybeUndefined::Undefined => FieldUpdate::Keep,
        MaybeUndefined::Null => FieldUpdate::Set(None),
        MaybeUndefined::Value(value) => FieldUpdate::Set(Some(value)),
    }
}

impl From<UpdateProductRequest> for UpdateProductParams {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            id: request.id,
            sku: request.sku.into(),
            name: request.name.into(),
            description: nullable(request.description),
            price: request.price.map(|price| price.0).into(),
            stock: request.stock.into(),
            category: request.category.into(),
            status: request.status.into(),
            image_url: nullable(request.image_url),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    pub id: i64,
    pub sku: String,
    pub name: String,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    /// Decimal price as a string
    pub price: String,
    pub stock: i32,
    pub category: String,
    pub status: ProductStatusDto,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let image_url = product.image().map(str::to_string);
        Self {
            id: product.id,
            sku: product.sku,
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            stock: product.stock,
            category: product.category,
            status: product.status.into(),
            image_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductListResponse {
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    /// "Showing X to Y of Z products"; absent when the page is empty
    #[oai(skip_serializing_if_is_none)]
    pub showing: Option<String>,
    pub products: Vec<ProductResponse>,
}

impl From<ProductPage> for ProductListResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            total_count: page.total_count,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            showing: page.showing,
            products: page.products.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ImageResponse {
    pub image_url: String,
}

#[derive(Debug, Multipart)]
pub struct UploadImageForm {
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, Object)]
pub struct ProductEnvelope {
    pub success: bool,
    #[oai(skip_serializing_if_is_none)]
    pub message: Option<String>,
    pub data: ProductResponse,
}

impl ProductEnvelope {
    pub fn new(product: Product) -> Self {
        Self {
            success: true,
            message: None,
            data: product.into(),
        }
    }

    pub fn created(product: Product) -> Self {
        Self {
            message: Some("Product created successfully".to_string()),
            ..Self::new(product)
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductListEnvelope {
    pub success: bool,
    pub data: ProductListResponse,
}

#[derive(Debug, Clone, Object)]
pub struct ImageEnvelope {
    pub success: bool,
    pub message: String,
    pub data: ImageResponse,
}
