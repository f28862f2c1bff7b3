use std::sync::Arc;

use logger::TracingLogger;
use persistence::product::repository::ProductRepositoryPostgres;

use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::delete_image::DeleteImageUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::get_by_sku::GetProductBySkuUseCaseImpl;
use business::application::product::list::ListProductsUseCaseImpl;
use business::application::product::update::UpdateProductUseCaseImpl;
use business::application::product::upload_image::UploadImageUseCaseImpl;
use business::domain::logger::Logger;
use business::domain::product::repository::ProductRepository;
use business::domain::storage::blob_store::BlobStore;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub product_api: crate::api::product::routes::ProductApi,
    pub blob_store: Arc<dyn BlobStore>,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, blob_store: Arc<dyn BlobStore>) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new(pool.clone());

        // Infrastructure adapters
        let product_repository: Arc<dyn ProductRepository> =
            Arc::new(ProductRepositoryPostgres::new(pool));

        // Product use cases
        let create_use_case = Arc::new(CreateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let list_use_case = Arc::new(ListProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_by_sku_use_case = Arc::new(GetProductBySkuUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let update_use_case = Arc::new(UpdateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository.clone(),
            blob_store: blob_store.clone(),
            logger: logger.clone(),
        });

        // Image use cases
        let upload_image_use_case = Arc::new(UploadImageUseCaseImpl {
            repository: product_repository.clone(),
            blob_store: blob_store.clone(),
            logger: logger.clone(),
        });
        let delete_image_use_case = Arc::new(DeleteImageUseCaseImpl {
            repository: product_repository,
            blob_store: blob_store.clone(),
            logger,
        });

        let product_api = crate::api::product::routes::ProductApi::new(
            create_use_case,
            list_use_case,
            get_by_id_use_case,
            get_by_sku_use_case,
            update_use_case,
            delete_use_case,
            upload_image_use_case,
            delete_image_use_case,
        );

        Self {
            health_api,
            product_api,
            blob_store,
        }
    }
}
