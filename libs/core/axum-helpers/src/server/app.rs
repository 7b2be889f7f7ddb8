use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Creates the top-level router with documentation and common middleware.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI at `/docs`, ReDoc, RapiDoc, Scalar)
/// - API routes nested under `/api`
/// - Tracing, security headers, CORS and compression
/// - JSON 404 fallback
///
/// Health endpoints are merged by the app with `health_router()` and its
/// own readiness handler.
///
/// ```ignore
/// let api_routes = Router::new().nest("/products", products_router);
/// let router = create_router::<ApiDoc>(api_routes, create_permissive_cors_layer());
/// ```
pub fn create_router<T>(apis: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        // gzip, br, deflate, zstd based on Accept-Encoding
        .layer(CompressionLayer::new())
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup`.
///
/// In-flight requests finish before cleanup starts. Cleanup is bounded by
/// `shutdown_timeout`; when it overruns the process exits anyway.
///
/// ```ignore
/// let db = state.db.clone();
/// create_production_app(router, &config.server, config.server.shutdown_timeout(), async move {
///     db.close().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
