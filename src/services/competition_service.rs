//! Competition membership and leaderboard.

use crate::error::{AppError, AppResult};
use crate::models::{CompetitionMember, DEFAULT_COMPETITION_ID};
use crate::repositories::CompetitionRepository;

pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;
pub const MAX_LEADERBOARD_LIMIT: i64 = 100;

/// A member with its 1-based position on the leaderboard
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub member: CompetitionMember,
}

#[derive(Clone)]
pub struct CompetitionService {
    competitions: CompetitionRepository,
}

impl CompetitionService {
    pub fn new(competitions: CompetitionRepository) -> Self {
        Self { competitions }
    }

    /// Blank or missing ids fall back to `"global"`.
    pub fn resolve_id(competition_id: Option<&str>) -> &str {
        competition_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_COMPETITION_ID)
    }

    /// Missing limit defaults to 10; anything else is clamped to `1..=100`.
    pub fn clamp_limit(limit: Option<i64>) -> i64 {
        limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT)
    }

    pub async fn join(
        &self,
        competition_id: Option<&str>,
        user_id: &str,
        display_name: Option<&str>,
    ) -> AppResult<CompetitionMember> {
        let competition_id = Self::resolve_id(competition_id);
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::validation("userId", "userId required"));
        }

        let member = self
            .competitions
            .join(competition_id, user_id, display_name)
            .await?;

        tracing::info!(competition_id, user_id, "Competition joined");

        Ok(member)
    }

    pub async fn leaderboard(
        &self,
        competition_id: Option<&str>,
        limit: Option<i64>,
    ) -> AppResult<(String, Vec<LeaderboardEntry>)> {
        let competition_id = Self::resolve_id(competition_id);
        let members = self
            .competitions
            .leaderboard(competition_id, Self::clamp_limit(limit))
            .await?;

        let entries = members
            .into_iter()
            .enumerate()
            .map(|(i, member)| LeaderboardEntry { rank: i + 1, member })
            .collect();

        Ok((competition_id.to_string(), entries))
    }
}
