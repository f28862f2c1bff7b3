//! SQL construction for the dynamic product queries.
//!
//! Every value is bound as a parameter. The only identifiers interpolated into
//! the text are the static strings returned by [`SortField::column`] and
//! [`SortOrder::keyword`].
//!
//! [`SortField::column`]: business::domain::product::value_objects::SortField::column
//! [`SortOrder::keyword`]: business::domain::product::value_objects::SortOrder::keyword

use sqlx::{Postgres, QueryBuilder};

use business::domain::product::filter::ProductFilter;
use business::domain::product::model::ProductChanges;
use business::domain::product::value_objects::FieldUpdate;

pub const PRODUCT_COLUMNS: &str =
    "id, sku, name, description, price, stock, category, status, image_url, created_at, updated_at";

/// Escapes LIKE metacharacters so user input only ever matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn push_filters(qb: &mut QueryBuilder<'static, Postgres>, filter: &ProductFilter) {
    qb.push(" WHERE 1=1");

    if let Some(name) = present(&filter.name) {
        qb.push(" AND name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
    }
    if let Some(sku) = present(&filter.sku) {
        qb.push(" AND sku ILIKE ")
            .push_bind(format!("%{}%", escape_like(sku)));
    }
    if let Some(category) = present(&filter.category) {
        qb.push(" AND LOWER(category) = LOWER(")
            .push_bind(category.to_string())
            .push(")");
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.to_string());
    }
    if let Some(min_price) = &filter.min_price {
        qb.push(" AND price >= ").push_bind(min_price.clone());
    }
    if let Some(max_price) = &filter.max_price {
        qb.push(" AND price <= ").push_bind(max_price.clone());
    }
}

/// Counts every row matching the filter, ignoring pagination.
pub fn count_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filters(&mut qb, filter);
    qb
}

/// Selects one sorted page of rows matching the filter.
pub fn page_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
    push_filters(&mut qb, filter);

    qb.push(" ORDER BY ")
        .push(filter.sort_by.column())
        .push(" ")
        .push(filter.sort_order.keyword())
        .push(", id ASC LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset());
    qb
}

/// Builds the UPDATE for the fields present in `changes`, or `None` when
/// nothing was supplied.
pub fn update_query(changes: &ProductChanges) -> Option<QueryBuilder<'static, Postgres>> {
    if changes.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::new("UPDATE products SET ");
    {
        let mut assignments = qb.separated(", ");
        if let FieldUpdate::Set(sku) = &changes.sku {
            assignments.push("sku = ").push_bind_unseparated(sku.clone());
        }
        if let FieldUpdate::Set(name) = &changes.name {
            assignments.push("name = ").push_bind_unseparated(name.clone());
        }
        if let FieldUpdate::Set(description) = &changes.description {
            assignments
                .push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let FieldUpdate::Set(price) = &changes.price {
            assignments.push("price = ").push_bind_unseparated(price.clone());
        }
        if let FieldUpdate::Set(stock) = changes.stock {
            assignments.push("stock = ").push_bind_unseparated(stock);
        }
        if let FieldUpdate::Set(category) = &changes.category {
            assignments
                .push("category = ")
                .push_bind_unseparated(category.clone());
        }
        if let FieldUpdate::Set(status) = changes.status {
            assignments
                .push("status = ")
                .push_bind_unseparated(status.to_string());
        }
        if let FieldUpdate::Set(image_url) = &changes.image_url {
            assignments
                .push("image_url = ")
                .push_bind_unseparated(image_url.clone());
        }
        assignments.push("updated_at = NOW()");
    }
    qb.push(" WHERE id = ").push_bind(changes.id);

    Some(qb)
}
