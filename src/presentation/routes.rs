//! Route definitions and router setup

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::presentation::controllers::{
    AppState, get_results, root, start_full_scan, start_scan, start_subdomain_scan,
};
use crate::presentation::models::*;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::start_scan,
        crate::presentation::controllers::start_full_scan,
        crate::presentation::controllers::start_subdomain_scan,
        crate::presentation::controllers::get_results,
        crate::presentation::controllers::root
    ),
    components(
        schemas(
            ScanRequest,
            FullScanRequest,
            SubdomainScanRequest,
            JobAcceptedResponse,
            JobStatusResponse,
            ErrorResponse,
            MessageResponse,
            crate::domain::entities::JobResult,
            crate::domain::entities::StageReport,
            crate::domain::entities::SubdomainReport,
            crate::domain::value_objects::JobStatus
        )
    ),
    tags(
        (name = "scans", description = "Scan submission and result polling"),
        (name = "health", description = "Service liveness")
    ),
    info(
        title = "Sentinelle API",
        version = "0.1.0",
        description = "Asynchronous security-scan orchestration: submit a target, poll for the combined output of port, vulnerability, web-server, and subdomain scans."
    )
)]
pub struct ApiDoc;

/// Create the application router with CORS, tracing, and timeout layers
pub fn create_router(state: AppState, config: Arc<Config>) -> Router {
    // With wildcard origins the browser rejects credentialed requests, but
    // this API is cookie-free so the permissive default is acceptable for
    // development deployments.
    let cors_layer = if config.server.allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                axum::http::HeaderValue::from_str(origin)
                    .map_err(|_| {
                        tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    })
                    .ok()
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers(Any)
    };

    let mut router = Router::new()
        .route("/", get(root))
        .route("/scan/", post(start_scan))
        .route("/scan/full/", post(start_full_scan))
        .route("/scan/subdomains/", post(start_subdomain_scan))
        .route("/results/{task_id}", get(get_results));

    // Conditionally expose Swagger UI based on configuration (avoid leaking docs in production).
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer)
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(config.server.request_timeout_seconds),
                )),
        )
        .with_state(state)
}
