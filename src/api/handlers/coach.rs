//! Savings coach chat.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COACH_TAG;
use crate::api::dto::{CoachRequest, CoachResponse, ErrorResponse};
use crate::error::{RouteError, RouteResultExt};
use crate::state::AppState;
use crate::utils::ValidatedJson;

const COACH_FAILED: &str = "coach_failed";

pub fn coach_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(ask_coach))
}

/// POST /api/coach - Ask the coach a question.
#[utoipa::path(
    post,
    path = "/coach",
    tag = COACH_TAG,
    request_body = CoachRequest,
    responses(
        (status = 200, description = "Coach reply", body = CoachResponse),
        (status = 400, description = "Invalid message or history", body = ErrorResponse),
        (status = 500, description = "Chat provider failed or not configured", body = ErrorResponse)
    )
)]
async fn ask_coach(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CoachRequest>,
) -> Result<Json<CoachResponse>, RouteError> {
    let history = request.history_messages();
    let reply = state
        .services
        .coach
        .ask(&request.message, &history, request.context.as_ref())
        .await
        .or_route(COACH_FAILED)?;

    Ok(Json(reply.into()))
}
