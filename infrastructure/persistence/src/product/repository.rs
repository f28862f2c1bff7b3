use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use business::domain::errors::RepositoryError;
use business::domain::product::filter::ProductFilter;
use business::domain::product::model::{NewProduct, Product, ProductChanges};
use business::domain::product::repository::ProductRepository;

use super::entity::ProductEntity;
use super::query::{count_query, page_query, update_query};

pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(operation: &'static str, e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_error) = &e
        && db_error.is_unique_violation()
    {
        return RepositoryError::duplicated();
    }
    error!(operation, error = %e, "Product query failed");
    RepositoryError::database_error()
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(
            r#"INSERT INTO products (sku, name, description, price, stock, category, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, sku, name, description, price, stock, category, status, image_url, created_at, updated_at"#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.price)
        .bind(product.stock)
        .bind(&product.category)
        .bind(product.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        entity.into_domain()
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(
            "SELECT id, sku, name, description, price, stock, category, status, image_url, created_at, updated_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_by_id", e))?
        .ok_or(RepositoryError::NotFound)?;

        entity.into_domain()
    }

    async fn get_by_sku(&self, sku: &str) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(
            "SELECT id, sku, name, description, price, stock, category, status, image_url, created_at, updated_at FROM products WHERE sku = $1",
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_by_sku", e))?
        .ok_or(RepositoryError::NotFound)?;

        entity.into_domain()
    }

    async fn list(&self, filter: &ProductFilter) -> Result<(Vec<Product>, i64), RepositoryError> {
        let total: i64 = count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count", e))?;

        let entities = page_query(filter)
            .build_query_as::<ProductEntity>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        let products = entities
            .into_iter()
            .map(ProductEntity::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((products, total))
    }

    async fn update(&self, changes: &ProductChanges) -> Result<(), RepositoryError> {
        let Some(mut query) = update_query(changes) else {
            return Ok(());
        };

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bigdecimal::BigDecimal;
    use business::domain::product::value_objects::{FieldUpdate, ProductStatus, SortField, SortOrder};

    use super::*;

    fn new_product(sku: &str, price: i64, category: &str) -> NewProduct {
        NewProduct {
            sku: sku.to_string(),
            name: format!("Product {sku}"),
            description: Some("A product".to_string()),
            price: BigDecimal::from(price),
            stock: 5,
            category: category.to_string(),
            status: ProductStatus::Active,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn should_report_duplicated_sku_once(pool: PgPool) {
        let repository = ProductRepositoryPostgres::new(pool);

        let first = repository.create(&new_product("SKU-1", 10, "Books")).await;
        let second = repository.create(&new_product("SKU-1", 20, "Books")).await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(RepositoryError::Duplicated)));
        let (_, total) = repository.list(&ProductFilter::default()).await.unwrap();
        assert_eq!(total, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn should_combine_category_and_price_filters(pool: PgPool) {
        let repository = ProductRepositoryPostgres::new(pool);
        repository.create(&new_product("A", 100, "Electronics")).await.unwrap();
        let b = repository.create(&new_product("B", 300, "Electronics")).await.unwrap();
        repository.create(&new_product("C", 500, "Books")).await.unwrap();

        let filter = ProductFilter {
            category: Some("electronics".to_string()),
            min_price: Some(BigDecimal::from(200)),
            ..Default::default()
        };
        let (products, total) = repository.list(&filter).await.unwrap();

        assert_eq!(total, 1);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, b.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn should_return_requested_page_window(pool: PgPool) {
        let repository = ProductRepositoryPostgres::new(pool);
        let mut ids = Vec::new();
        for n in 0..7 {
            let product = repository
                .create(&new_product(&format!("P-{n}"), 10 + n, "Tools"))
                .await
                .unwrap();
            ids.push(product.id);
        }

        for page in 1..=4 {
            let filter = ProductFilter {
                page,
                limit: 3,
                sort_by: SortField::Price,
                sort_order: SortOrder::Asc,
                ..Default::default()
            };
            let (products, total) = repository.list(&filter).await.unwrap();

            let start = ((page - 1) * 3) as usize;
            let end = (page * 3).min(7) as usize;
            let expected = ids.get(start..end).unwrap_or(&[]).to_vec();
            let actual: Vec<i64> = products.iter().map(|p| p.id).collect();
            assert_eq!(total, 7);
            assert_eq!(actual, expected, "page {page}");
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn should_update_only_supplied_fields(pool: PgPool) {
        let repository = ProductRepositoryPostgres::new(pool);
        let before = repository.create(&new_product("UPD-1", 50, "Garden")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let changes = ProductChanges {
            name: FieldUpdate::Set("Renamed".to_string()),
            ..ProductChanges::new(before.id)
        };
        repository.update(&changes).await.unwrap();
        let after = repository.get_by_id(before.id).await.unwrap();

        assert_eq!(after.name, "Renamed");
        assert!(after.updated_at > before.updated_at);
        assert_eq!(
            Product {
                name: before.name.clone(),
                updated_at: before.updated_at,
                ..after
            },
            before
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn should_leave_row_untouched_on_empty_update(pool: PgPool) {
        let repository = ProductRepositoryPostgres::new(pool);
        let before = repository.create(&new_product("UPD-2", 50, "Garden")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        repository.update(&ProductChanges::new(before.id)).await.unwrap();

        assert_eq!(repository.get_by_id(before.id).await.unwrap(), before);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn should_not_find_deleted_product(pool: PgPool) {
        let repository = ProductRepositoryPostgres::new(pool);
        let product = repository.create(&new_product("DEL-1", 5, "Toys")).await.unwrap();

        repository.delete(product.id).await.unwrap();

        assert!(matches!(
            repository.get_by_id(product.id).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            repository.delete(product.id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
