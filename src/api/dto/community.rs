//! Community total DTO.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::CommunitySnapshot;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"total": 40210.75, "saveCount": 1312, "updatedAt": "2026-03-01T10:00:00Z"}))]
pub struct CommunityResponse {
    pub total: f64,
    pub save_count: i64,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub updated_at: Option<String>,
}

impl From<CommunitySnapshot> for CommunityResponse {
    fn from(snapshot: CommunitySnapshot) -> Self {
        Self {
            total: snapshot.total,
            save_count: snapshot.save_count,
            updated_at: snapshot.updated_at.map(|ts| ts.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_snapshot() {
        let response = CommunityResponse::from(CommunitySnapshot::empty());
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"total": 0.0, "saveCount": 0, "updatedAt": null})
        );
    }
}
