//! Community wide savings total.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COMMUNITY_TAG;
use crate::api::dto::{CommunityResponse, ErrorResponse};
use crate::error::{RouteError, RouteResultExt};
use crate::state::AppState;

const COMMUNITY_FAILED: &str = "community_failed";

pub fn community_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_community))
}

#[utoipa::path(
    get,
    path = "/community",
    tag = COMMUNITY_TAG,
    responses(
        (status = 200, description = "Running total of all saves", body = CommunityResponse),
        (status = 500, description = "Total unavailable", body = ErrorResponse)
    )
)]
async fn get_community(
    State(state): State<AppState>,
) -> Result<Json<CommunityResponse>, RouteError> {
    let snapshot = state
        .services
        .community
        .snapshot()
        .await
        .or_route(COMMUNITY_FAILED)?;

    Ok(Json(snapshot.into()))
}
