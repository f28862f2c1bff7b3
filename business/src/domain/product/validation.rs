//! Request-shape rules for products.
//!
//! Every check runs; violations are collected per field so a client gets the
//! complete list in one response. A successful validation returns the typed
//! value the store works with.

use std::collections::BTreeMap;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::filter::{DEFAULT_LIMIT, DEFAULT_PAGE, ListProductsParams, MAX_LIMIT, ProductFilter};
use super::model::{NewProduct, ProductChanges};
use super::use_cases::create::CreateProductParams;
use super::use_cases::update::UpdateProductParams;
use super::value_objects::{FieldUpdate, ProductStatus, SortField, SortOrder};

pub const MAX_SKU_LENGTH: usize = 100;
pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MAX_IMAGE_URL_LENGTH: usize = 2048;
pub const MAX_PRICE_SCALE: i64 = 2;

/// Largest price a NUMERIC(10,2) column holds: 99,999,999.99.
pub fn max_price() -> BigDecimal {
    BigDecimal::new(9_999_999_999_i64.into(), MAX_PRICE_SCALE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("validation.failed")]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Field to message; when a field has several violations the first wins.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_insert_with(|| error.message.clone());
        }
        map
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    max_len: Option<usize>,
    blank_message: &str,
) {
    if is_blank(value) {
        errors.add(field, blank_message);
    }
    if let Some(max) = max_len
        && value.chars().count() > max
    {
        errors.add(field, format!("{field} must not exceed {max} characters"));
    }
}

fn check_price(errors: &mut ValidationErrors, raw: &str) -> Option<BigDecimal> {
    let Ok(price) = BigDecimal::from_str(raw.trim()) else {
        errors.add("price", "price must be a valid decimal number");
        return None;
    };

    let before = errors.errors().len();
    if price < BigDecimal::zero() {
        errors.add("price", "price must be greater than or equal to 0");
    }
    if price > max_price() {
        errors.add("price", "price must not exceed 99,999,999.99");
    }
    if price.normalized().as_bigint_and_exponent().1 > MAX_PRICE_SCALE {
        errors.add("price", "price must have at most 2 decimal places");
    }

    (errors.errors().len() == before).then_some(price)
}

fn check_stock(errors: &mut ValidationErrors, stock: i64) -> Option<i32> {
    if stock < 0 {
        errors.add("stock", "stock must be greater than or equal to 0");
        return None;
    }
    match i32::try_from(stock) {
        Ok(stock) => Some(stock),
        Err(_) => {
            errors.add("stock", format!("stock must not exceed {}", i32::MAX));
            None
        }
    }
}

fn check_status(errors: &mut ValidationErrors, raw: &str) -> Option<ProductStatus> {
    match raw.parse::<ProductStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.add("status", "status must be either 'Active' or 'Inactive'");
            None
        }
    }
}

pub fn validate_create(params: &CreateProductParams) -> Result<NewProduct, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_required_text(
        &mut errors,
        "sku",
        &params.sku,
        Some(MAX_SKU_LENGTH),
        "sku is required",
    );
    check_required_text(&mut errors, "name", &params.name, None, "name is required");
    let price = check_price(&mut errors, &params.price);
    let stock = check_stock(&mut errors, params.stock);
    check_required_text(
        &mut errors,
        "category",
        &params.category,
        Some(MAX_CATEGORY_LENGTH),
        "category is required",
    );
    let status = check_status(&mut errors, &params.status);

    match (price, stock, status) {
        (Some(price), Some(stock), Some(status)) => errors.into_result(|| NewProduct {
            sku: params.sku.clone(),
            name: params.name.clone(),
            description: params.description.clone(),
            price,
            stock,
            category: params.category.clone(),
            status,
        }),
        _ => Err(errors),
    }
}

pub fn validate_update(params: &UpdateProductParams) -> Result<ProductChanges, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut changes = ProductChanges::new(params.id);

    if params.id <= 0 {
        errors.add("id", "id must be a positive integer");
    }

    if let FieldUpdate::Set(sku) = &params.sku {
        check_required_text(
            &mut errors,
            "sku",
            sku,
            Some(MAX_SKU_LENGTH),
            "sku must not be empty",
        );
        changes.sku = FieldUpdate::Set(sku.clone());
    }

    if let FieldUpdate::Set(name) = &params.name {
        check_required_text(&mut errors, "name", name, None, "name must not be empty");
        changes.name = FieldUpdate::Set(name.clone());
    }

    changes.description = params.description.clone();

    if let FieldUpdate::Set(raw) = &params.price
        && let Some(price) = check_price(&mut errors, raw)
    {
        changes.price = FieldUpdate::Set(price);
    }

    if let FieldUpdate::Set(stock) = params.stock
        && let Some(stock) = check_stock(&mut errors, stock)
    {
        changes.stock = FieldUpdate::Set(stock);
    }

    if let FieldUpdate::Set(category) = &params.category {
        check_required_text(
            &mut errors,
            "category",
            category,
            Some(MAX_CATEGORY_LENGTH),
            "category must not be empty",
        );
        changes.category = FieldUpdate::Set(category.clone());
    }

    if let FieldUpdate::Set(raw) = &params.status
        && let Some(status) = check_status(&mut errors, raw)
    {
        changes.status = FieldUpdate::Set(status);
    }

    if let FieldUpdate::Set(Some(url)) = &params.image_url
        && url.chars().count() > MAX_IMAGE_URL_LENGTH
    {
        errors.add(
            "image_url",
            format!("image_url must not exceed {MAX_IMAGE_URL_LENGTH} characters"),
        );
    }
    changes.image_url = params.image_url.clone();

    errors.into_result(|| changes)
}

fn check_price_bound(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<BigDecimal> {
    let Ok(value) = BigDecimal::from_str(raw.trim()) else {
        errors.add(field, format!("{field} must be a valid decimal number"));
        return None;
    };
    if value < BigDecimal::zero() {
        errors.add(field, format!("{field} must be greater than or equal to 0"));
        return None;
    }
    Some(value)
}

/// Validates a listing query and applies its defaults.
pub fn validate_filter(params: &ListProductsParams) -> Result<ProductFilter, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let limit = match params.limit {
        l if l < 0 => {
            errors.add("limit", "limit must be a positive number");
            DEFAULT_LIMIT
        }
        0 => DEFAULT_LIMIT,
        l if l > MAX_LIMIT => {
            errors.add("limit", format!("limit must not exceed {MAX_LIMIT}"));
            DEFAULT_LIMIT
        }
        l => l,
    };

    let page = match params.page {
        p if p < 0 => {
            errors.add("page", "page must be a positive number");
            DEFAULT_PAGE
        }
        0 => DEFAULT_PAGE,
        p if (p - 1).checked_mul(limit).is_none() => {
            errors.add("page", "page is too large");
            DEFAULT_PAGE
        }
        p => p,
    };

    let min_price = params
        .min_price
        .as_deref()
        .and_then(|raw| check_price_bound(&mut errors, "min_price", raw));
    let max_price = params
        .max_price
        .as_deref()
        .and_then(|raw| check_price_bound(&mut errors, "max_price", raw));
    if let (Some(min), Some(max)) = (&min_price, &max_price)
        && min > max
    {
        errors.add("price", "min_price must be less than or equal to max_price");
    }

    let sort_by = match params.sort_by.as_deref() {
        None => SortField::default(),
        Some(raw) => raw.parse::<SortField>().unwrap_or_else(|_| {
            let allowed: Vec<&str> = SortField::ALL.iter().map(SortField::column).collect();
            errors.add(
                "sort_by",
                format!("sort_by must be one of: {}", allowed.join(", ")),
            );
            SortField::default()
        }),
    };

    let sort_order = match params.sort_order.as_deref() {
        None => SortOrder::default(),
        Some(raw) => raw.parse::<SortOrder>().unwrap_or_else(|_| {
            errors.add("sort_order", "sort_order must be one of: asc, desc");
            SortOrder::default()
        }),
    };

    let status = params
        .status
        .as_deref()
        .and_then(|raw| check_status(&mut errors, raw));

    errors.into_result(|| ProductFilter {
        name: params.name.clone(),
        sku: params.sku.clone(),
        category: params.category.clone(),
        status,
        min_price,
        max_price,
        page,
        limit,
        sort_by,
        sort_order,
    })
}
