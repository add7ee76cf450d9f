//! Save endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::services::{SaveInput, SaveOutcome};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "userId": "u-123",
    "amount": 12.5,
    "note": "Skipped takeout",
    "category": "food",
    "displayName": "Sam",
    "competitionId": "global"
}))]
pub struct SaveRequest {
    #[validate(length(min = 1, max = 128, message = "userId must be 1-128 characters"))]
    pub user_id: String,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1_000_000.0,
        message = "amount must be greater than 0 and at most 1000000"
    ))]
    pub amount: f64,
    #[validate(length(max = 280, message = "note must be at most 280 characters"))]
    pub note: Option<String>,
    #[validate(length(max = 64, message = "category must be at most 64 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 64, message = "displayName must be at most 64 characters"))]
    pub display_name: Option<String>,
    #[validate(length(max = 64, message = "competitionId must be at most 64 characters"))]
    pub competition_id: Option<String>,
}

impl From<SaveRequest> for SaveInput {
    fn from(request: SaveRequest) -> Self {
        Self {
            user_id: request.user_id,
            amount: request.amount,
            note: request.note,
            category: request.category,
            display_name: request.display_name,
            competition_id: request.competition_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "ok": true,
    "saveId": "7d4c1f9e-1c2b-4b8e-9a51-0c3f2d9b6a11",
    "totalSaved": 112.5,
    "saveCount": 9,
    "competitionScore": 80.0,
    "communityTotal": 40210.75
}))]
pub struct SaveResponse {
    pub ok: bool,
    pub save_id: String,
    pub total_saved: f64,
    pub save_count: i64,
    pub competition_score: Option<f64>,
    pub community_total: f64,
}

impl From<SaveOutcome> for SaveResponse {
    fn from(outcome: SaveOutcome) -> Self {
        Self {
            ok: true,
            save_id: outcome.save_id.to_string(),
            total_saved: outcome.total_saved,
            save_count: outcome.save_count,
            competition_score: outcome.competition_score,
            community_total: outcome.community_total,
        }
    }
}
