//! Community wide savings total.

use crate::error::AppResult;
use crate::repositories::CommunityRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct CommunitySnapshot {
    pub total: f64,
    pub save_count: i64,
    /// `None` before the first save
    pub updated_at: Option<jiff::Timestamp>,
}

impl CommunitySnapshot {
    pub fn empty() -> Self {
        Self {
            total: 0.0,
            save_count: 0,
            updated_at: None,
        }
    }
}

#[derive(Clone)]
pub struct CommunityService {
    community: CommunityRepository,
}

impl CommunityService {
    pub fn new(community: CommunityRepository) -> Self {
        Self { community }
    }

    pub async fn snapshot(&self) -> AppResult<CommunitySnapshot> {
        let snapshot = self
            .community
            .get()
            .await?
            .map(|row| CommunitySnapshot {
                total: row.total,
                save_count: row.save_count,
                updated_at: Some(row.updated_at.to_jiff()),
            })
            .unwrap_or_else(CommunitySnapshot::empty);

        Ok(snapshot)
    }
}
