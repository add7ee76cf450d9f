//! Save recording.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::SAVINGS_TAG;
use crate::api::dto::{ErrorResponse, SaveRequest, SaveResponse};
use crate::error::{RouteError, RouteResultExt};
use crate::services::SaveInput;
use crate::state::AppState;
use crate::utils::ValidatedJson;

const SAVE_FAILED: &str = "save_failed";

pub fn savings_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(record_save))
}

/// POST /api/save - Record money a user chose not to spend.
///
/// Updates the user's totals, their competition score (members only) and
/// the community total.
#[utoipa::path(
    post,
    path = "/save",
    tag = SAVINGS_TAG,
    request_body = SaveRequest,
    responses(
        (status = 200, description = "Save recorded", body = SaveResponse),
        (status = 400, description = "Invalid save", body = ErrorResponse),
        (status = 500, description = "Save could not be stored", body = ErrorResponse)
    )
)]
async fn record_save(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SaveRequest>,
) -> Result<Json<SaveResponse>, RouteError> {
    let input = SaveInput::from(request);
    let outcome = state
        .services
        .savings
        .record(&input)
        .await
        .or_route(SAVE_FAILED)?;

    Ok(Json(outcome.into()))
}
