use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const QUOTES_TAG: &str = "Quotes";
pub const COACH_TAG: &str = "Coach";
pub const SAVINGS_TAG: &str = "Savings";
pub const COMPETITION_TAG: &str = "Competition";
pub const COMMUNITY_TAG: &str = "Community";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Money Mind",
        description = "Savings tracker API: stock quotes, an AI savings coach, competitions and a community total",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::QuoteItem,
            crate::api::dto::CoachTurn,
            crate::api::dto::TurnRole,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = QUOTES_TAG, description = "Stock quote proxy"),
        (name = COACH_TAG, description = "AI savings coach"),
        (name = SAVINGS_TAG, description = "Recording saves"),
        (name = COMPETITION_TAG, description = "Savings competitions and leaderboards"),
        (name = COMMUNITY_TAG, description = "Community wide totals"),
    )
)]
pub struct ApiDoc;
