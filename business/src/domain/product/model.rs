use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::value_objects::{FieldUpdate, ProductStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub status: ProductStatus,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Stored image reference, treating an empty string as no image.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// A validated product ready to be inserted. Id and timestamps are assigned by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub status: ProductStatus,
}

/// A validated partial update. Only `Set` fields are written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductChanges {
    pub id: i64,
    pub sku: FieldUpdate<String>,
    pub name: FieldUpdate<String>,
    pub description: FieldUpdate<Option<String>>,
    pub price: FieldUpdate<BigDecimal>,
    pub stock: FieldUpdate<i32>,
    pub category: FieldUpdate<String>,
    pub status: FieldUpdate<ProductStatus>,
    pub image_url: FieldUpdate<Option<String>>,
}

impl ProductChanges {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn image_url(id: i64, image_url: Option<String>) -> Self {
        Self {
            id,
            image_url: FieldUpdate::Set(image_url),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.sku.is_set()
            || self.name.is_set()
            || self.description.is_set()
            || self.price.is_set()
            || self.stock.is_set()
            || self.category.is_set()
            || self.status.is_set()
            || self.image_url.is_set())
    }
}

/// One page of a filtered product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    /// `Showing X to Y of Z products`, absent when the page holds no rows.
    pub showing: Option<String>,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, total_count: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_count + limit - 1) / limit
        } else {
            0
        };

        let showing = if products.is_empty() || total_count == 0 {
            None
        } else {
            let start = (page - 1) * limit + 1;
            let end = start + products.len() as i64 - 1;
            Some(format!(
                "Showing {} to {} of {} products",
                start, end, total_count
            ))
        };

        Self {
            products,
            total_count,
            page,
            limit,
            total_pages,
            showing,
        }
    }
}
