use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::filter::ListProductsParams;
use crate::domain::product::model::ProductPage;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::list::ListProductsUseCase;
use crate::domain::product::validation::validate_filter;

pub struct ListProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListProductsUseCase for ListProductsUseCaseImpl {
    async fn execute(&self, params: ListProductsParams) -> Result<ProductPage, ProductError> {
        let filter = validate_filter(&params)?;

        self.logger.debug(&format!(
            "Listing products: page={} limit={} sort={} {}",
            filter.page,
            filter.limit,
            filter.sort_by.column(),
            filter.sort_order.keyword()
        ));

        let (products, total) = self
            .repository
            .list(&filter)
            .await
            .map_err(ProductError::from_repository)?;

        Ok(ProductPage::new(products, total, filter.page, filter.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::product::test_support::{MockProductRepo, mock_logger};
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::fixtures;
    use crate::domain::product::value_objects::{SortField, SortOrder};

    fn use_case(mock_repo: MockProductRepo) -> ListProductsUseCaseImpl {
        ListProductsUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_pass_defaulted_filter_to_store() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_list()
            .withf(|filter| {
                filter.page == 1
                    && filter.limit == 20
                    && filter.sort_by == SortField::CreatedAt
                    && filter.sort_order == SortOrder::Desc
            })
            .times(1)
            .returning(|_| Ok((vec![fixtures::product(1), fixtures::product(2)], 2)));

        let page = use_case(mock_repo)
            .execute(ListProductsParams::default())
            .await
            .unwrap();

        assert_eq!(page.products.len(), 2);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.showing.as_deref(), Some("Showing 1 to 2 of 2 products"));
    }

    #[tokio::test]
    async fn should_compute_page_metadata_from_total() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_list()
            .returning(|_| Ok(((21..=30).map(fixtures::product).collect(), 45)));

        let params = ListProductsParams {
            page: 3,
            limit: 10,
            ..Default::default()
        };
        let page = use_case(mock_repo).execute(params).await.unwrap();

        assert_eq!(page.total_pages, 5);
        assert_eq!(page.page, 3);
        assert_eq!(
            page.showing.as_deref(),
            Some("Showing 21 to 30 of 45 products")
        );
    }

    #[tokio::test]
    async fn should_reject_sort_field_outside_allow_list_before_querying() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_list().never();

        let params = ListProductsParams {
            sort_by: Some("description".to_string()),
            ..Default::default()
        };

        match use_case(mock_repo).execute(params).await {
            Err(ProductError::Validation(errors)) => assert!(errors.has_field("sort_by")),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_omit_showing_for_empty_result() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_list().returning(|_| Ok((Vec::new(), 0)));

        let params = ListProductsParams {
            page: 4,
            ..Default::default()
        };
        let page = use_case(mock_repo).execute(params).await.unwrap();
        assert_eq!(page.showing, None);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn should_surface_store_failure() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_list()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let result = use_case(mock_repo)
            .execute(ListProductsParams::default())
            .await;
        assert!(matches!(result, Err(ProductError::Repository(_))));
    }
}
