//! Converts `AppError` and `RouteError` into HTTP responses.
//!
//! Client errors keep their own status and message. Server errors are
//! logged with their full cause chain and answered with a bare code.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::{AppError, RouteError};

pub const INTERNAL_ERROR: &str = "internal_error";
pub const SERVICE_UNAVAILABLE: &str = "service_unavailable";
pub const RATE_LIMITED: &str = "rate_limited";

fn client_status(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn client_response(error: &AppError) -> Response {
    if let AppError::RateLimited { retry_after_secs } = error {
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse::new(RATE_LIMITED)),
        )
            .into_response();
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(*retry_after_secs));
        return response;
    }

    (
        client_status(error),
        Json(ErrorResponse::new(error.client_message())),
    )
        .into_response()
}

impl IntoResponse for AppError {
    /// # Status Code Mapping
    /// - Validation, ValidationErrors, BadRequest → 400
    /// - NotFound → 404
    /// - RateLimited → 429 `rate_limited` with `Retry-After`
    /// - ConnectionPool → 503 `service_unavailable`
    /// - everything else → 500 `internal_error`
    fn into_response(self) -> Response {
        if self.is_client_error() {
            return client_response(&self);
        }

        tracing::error!(error = ?self, "Request failed");

        let (status, code) = match self {
            AppError::ConnectionPool { .. } => (StatusCode::SERVICE_UNAVAILABLE, SERVICE_UNAVAILABLE),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR),
        };

        (status, Json(ErrorResponse::new(code))).into_response()
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        if self.source.is_client_error() {
            return client_response(&self.source);
        }

        tracing::error!(code = self.code, error = ?self.source, "Request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(self.code)),
        )
            .into_response()
    }
}
