//! Stock quote proxy.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::QUOTES_TAG;
use crate::api::dto::{ErrorResponse, QuotesQuery, QuotesResponse};
use crate::error::{RouteError, RouteResultExt};
use crate::state::AppState;
use crate::utils::ValidatedQuery;

const QUOTE_FAILED: &str = "quote_failed";

pub fn quote_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_quotes))
}

/// GET /api/quotes - Latest prices for a comma-separated symbol list.
///
/// Symbols the provider rejects come back as `{"symbol", "error": true}`
/// items; only transport failures fail the whole request.
#[utoipa::path(
    get,
    path = "/quotes",
    tag = QUOTES_TAG,
    params(QuotesQuery),
    responses(
        (status = 200, description = "Quotes in request order", body = QuotesResponse),
        (status = 400, description = "No symbols given", body = ErrorResponse),
        (status = 500, description = "Quote provider unreachable", body = ErrorResponse)
    )
)]
async fn get_quotes(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<QuotesQuery>,
) -> Result<Json<QuotesResponse>, RouteError> {
    let quotes = state
        .services
        .quotes
        .quotes(query.symbols.as_deref())
        .await
        .or_route(QUOTE_FAILED)?;

    Ok(Json(QuotesResponse::new(quotes)))
}
