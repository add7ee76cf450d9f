//! Savings competitions: joining and leaderboards.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COMPETITION_TAG;
use crate::api::dto::{
    ErrorResponse, JoinRequest, JoinResponse, LeaderboardQuery, LeaderboardResponse,
};
use crate::error::{RouteError, RouteResultExt};
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery, non_blank};

const JOIN_FAILED: &str = "join_failed";
const LEADERBOARD_FAILED: &str = "leaderboard_failed";

pub fn competition_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(join_competition))
        .routes(routes!(get_leaderboard))
}

/// POST /api/competition/join - Join a competition. Joining twice keeps the score.
#[utoipa::path(
    post,
    path = "/join",
    tag = COMPETITION_TAG,
    request_body = JoinRequest,
    responses(
        (status = 200, description = "Membership", body = JoinResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Join failed", body = ErrorResponse)
    )
)]
async fn join_competition(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<JoinRequest>,
) -> Result<Json<JoinResponse>, RouteError> {
    let member = state
        .services
        .competitions
        .join(
            request.competition_id.as_deref(),
            &request.user_id,
            non_blank(request.display_name.as_deref()),
        )
        .await
        .or_route(JOIN_FAILED)?;

    Ok(Json(member.into()))
}

/// GET /api/competition/leaderboard - Top members by score.
#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = COMPETITION_TAG,
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Ranked members", body = LeaderboardResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 500, description = "Leaderboard unavailable", body = ErrorResponse)
    )
)]
async fn get_leaderboard(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, RouteError> {
    let (competition_id, entries) = state
        .services
        .competitions
        .leaderboard(query.competition_id.as_deref(), query.limit)
        .await
        .or_route(LEADERBOARD_FAILED)?;

    Ok(Json(LeaderboardResponse::new(competition_id, entries)))
}
