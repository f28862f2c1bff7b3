use poem::{
    EndpointExt, Route, Server as PoemServer, get,
    listener::TcpListener,
    middleware::{SizeLimit, Tracing},
};
use poem_openapi::OpenApiService;
use tracing::info;

use crate::{
    api::uploads::serve_upload,
    config::app_config::AppConfig,
    setup::{dependency_injection::DependencyContainer, timeout::with_timeout},
};

/// Upper bound on request bodies; the image size rule itself lives in the domain.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct Server;

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let request_timeout = config.server.request_timeout;

        let api_service = OpenApiService::new(
            (container.health_api, container.product_api),
            "Product Management API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("http://{}", addr));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();

        let app = Route::new()
            .at("/uploads/*path", get(serve_upload).data(container.blob_store))
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .nest("/", api_service)
            .with(SizeLimit::new(MAX_BODY_BYTES))
            .around(move |ep, req| with_timeout(ep, req, request_timeout))
            .with(config.cors)
            .with(Tracing);

        info!("Server running at http://{}", addr);
        info!("Swagger UI at http://{}/docs", addr);
        info!("OpenAPI JSON at http://{}/openapi.json", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}
