//! Router configuration for the API.
//!
//! Mounts every handler group under `/api`, the OpenAPI document and
//! Swagger UI, and the static front end with its SPA fallback.

use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::dto::ErrorResponse;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, rate_limit_middleware, request_id_middleware};
use crate::config::Settings;
use crate::state::AppState;

pub const NOT_FOUND: &str = "not_found";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_PATH: &str = "/swagger-ui";

/// All `/api` routes together with their OpenAPI description.
pub fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi()).nest(
        "/api",
        OpenApiRouter::new()
            .merge(handlers::health::health_routes())
            .merge(handlers::quotes::quote_routes())
            .merge(handlers::coach::coach_routes())
            .merge(handlers::savings::savings_routes())
            .merge(handlers::community::community_routes())
            .nest("/competition", handlers::competition::competition_routes()),
    )
}

async fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(NOT_FOUND))).into_response()
}

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Outermost first: request id, logging, rate limit, CORS, compression,
/// request timeout. The rate limiter also covers static files.
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    let (api, openapi) = api_router().split_for_parts();

    let static_dir = ServeDir::new(&settings.server.static_dir)
        .fallback(ServeFile::new(settings.server.index_file()));

    let mut router = api
        .route("/api", any(api_not_found))
        .route("/api/{*rest}", any(api_not_found))
        .with_state(state.clone())
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_PATH, openapi))
        .fallback_service(static_dir)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(settings.server.request_timeout),
        ))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    if settings.rate_limit.enabled {
        router = router.layer(middleware::from_fn_with_state(
            state.rate_limiter,
            rate_limit_middleware,
        ));
    }

    // Last added runs first, so request ids exist before logging reads them.
    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
}
