//! Competition DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::CompetitionMember;
use crate::services::LeaderboardEntry;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"userId": "u-123", "displayName": "Sam", "competitionId": "global"}))]
pub struct JoinRequest {
    #[validate(length(min = 1, max = 128, message = "userId must be 1-128 characters"))]
    pub user_id: String,
    #[validate(length(max = 64, message = "displayName must be at most 64 characters"))]
    pub display_name: Option<String>,
    #[validate(length(max = 64, message = "competitionId must be at most 64 characters"))]
    pub competition_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub user_id: String,
    pub display_name: Option<String>,
    pub score: f64,
    #[schema(value_type = String, format = DateTime)]
    pub joined_at: String,
}

impl From<CompetitionMember> for MemberView {
    fn from(member: CompetitionMember) -> Self {
        Self {
            user_id: member.user_id,
            display_name: member.display_name,
            score: member.score,
            joined_at: member.joined_at.to_jiff().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub ok: bool,
    pub competition_id: String,
    pub member: MemberView,
}

impl From<CompetitionMember> for JoinResponse {
    fn from(member: CompetitionMember) -> Self {
        Self {
            ok: true,
            competition_id: member.competition_id.clone(),
            member: member.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Defaults to `global`
    #[validate(length(max = 64, message = "competitionId must be at most 64 characters"))]
    pub competition_id: Option<String>,
    /// Defaults to 10, clamped to 1..=100
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderView {
    pub rank: usize,
    pub user_id: String,
    pub display_name: Option<String>,
    pub score: f64,
}

impl From<LeaderboardEntry> for LeaderView {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            user_id: entry.member.user_id,
            display_name: entry.member.display_name,
            score: entry.member.score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "competitionId": "global",
    "leaders": [{"rank": 1, "userId": "u-9", "displayName": "Ari", "score": 420.0}]
}))]
pub struct LeaderboardResponse {
    pub competition_id: String,
    pub leaders: Vec<LeaderView>,
}

impl LeaderboardResponse {
    pub fn new(competition_id: String, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            competition_id,
            leaders: entries.into_iter().map(LeaderView::from).collect(),
        }
    }
}
