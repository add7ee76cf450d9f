//! Recording savings.
//!
//! A save touches four records, each in its own transaction: the save event,
//! the user's totals, the user's competition score and the community total.
//! A failure part way leaves the earlier steps applied.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::NewSave;
use crate::repositories::{
    CommunityRepository, CompetitionRepository, SaveRepository, UserRepository,
};
use crate::utils::non_blank;

/// Upper bound for a single save
pub const MAX_SAVE_AMOUNT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Default)]
pub struct SaveInput {
    pub user_id: String,
    pub amount: f64,
    pub note: Option<String>,
    pub category: Option<String>,
    pub display_name: Option<String>,
    pub competition_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub save_id: Uuid,
    pub total_saved: f64,
    pub save_count: i64,
    /// `None` when no competition was named or the user is not a member
    pub competition_score: Option<f64>,
    pub community_total: f64,
}

#[derive(Clone)]
pub struct SavingsService {
    users: UserRepository,
    saves: SaveRepository,
    competitions: CompetitionRepository,
    community: CommunityRepository,
}

impl SavingsService {
    pub fn new(
        users: UserRepository,
        saves: SaveRepository,
        competitions: CompetitionRepository,
        community: CommunityRepository,
    ) -> Self {
        Self {
            users,
            saves,
            competitions,
            community,
        }
    }

    pub fn check_amount(amount: f64) -> AppResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::validation("amount", "amount must be a positive number"));
        }
        if amount > MAX_SAVE_AMOUNT {
            return Err(AppError::validation(
                "amount",
                format!("amount must not exceed {}", MAX_SAVE_AMOUNT),
            ));
        }
        Ok(())
    }

    pub async fn record(&self, input: &SaveInput) -> AppResult<SaveOutcome> {
        let user_id = input.user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::validation("userId", "userId required"));
        }
        Self::check_amount(input.amount)?;

        let amount = input.amount;
        let display_name = non_blank(input.display_name.as_deref());
        let competition_id = non_blank(input.competition_id.as_deref());

        let save = self
            .saves
            .create(NewSave {
                id: Uuid::new_v4(),
                user_id,
                amount,
                note: non_blank(input.note.as_deref()),
                category: non_blank(input.category.as_deref()),
                competition_id,
            })
            .await?;

        let user = self.users.add_save(user_id, amount, display_name).await?;

        let competition_score = match competition_id {
            Some(competition_id) => {
                let member = self
                    .competitions
                    .add_to_score(competition_id, user_id, amount)
                    .await?;
                if member.is_none() {
                    tracing::debug!(competition_id, user_id, "Not a member, score unchanged");
                }
                member.map(|m| m.score)
            }
            None => None,
        };

        let community = self.community.add_save(amount).await?;

        tracing::info!(
            save_id = %save.id,
            user_id,
            amount,
            total_saved = user.total_saved,
            "Save recorded"
        );

        Ok(SaveOutcome {
            save_id: save.id,
            total_saved: user.total_saved,
            save_count: user.save_count,
            competition_score,
            community_total: community.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount_bounds() {
        assert!(SavingsService::check_amount(0.01).is_ok());
        assert!(SavingsService::check_amount(MAX_SAVE_AMOUNT).is_ok());

        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY, MAX_SAVE_AMOUNT + 0.01] {
            let err = SavingsService::check_amount(bad).unwrap_err();
            assert!(matches!(err, AppError::Validation { ref field, .. } if field == "amount"));
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_record_updates_every_total() {
        use crate::repositories::Repositories;
        use crate::repositories::test_support::{COMMUNITY_LOCK, test_pool};

        let _guard = COMMUNITY_LOCK.lock().await;
        let repos = Repositories::new(test_pool().await);

        let user_id = format!("test-{}", Uuid::new_v4());
        let competition_id = format!("comp-{}", Uuid::new_v4());
        repos
            .competitions
            .join(&competition_id, &user_id, Some("Tester"))
            .await
            .unwrap();

        let service = SavingsService::new(
            repos.users.clone(),
            repos.saves.clone(),
            repos.competitions.clone(),
            repos.community.clone(),
        );

        let first = service
            .record(&SaveInput {
                user_id: user_id.clone(),
                amount: 12.5,
                competition_id: Some(competition_id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(first.total_saved, 12.5);
        assert_eq!(first.save_count, 1);
        assert_eq!(first.competition_score, Some(12.5));
        assert!(first.community_total >= 12.5);

        let second = service
            .record(&SaveInput {
                user_id: user_id.clone(),
                amount: 7.5,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.total_saved, 20.0);
        assert_eq!(second.save_count, 2);
        assert_eq!(second.competition_score, None);

        let stranger = service
            .record(&SaveInput {
                user_id: format!("test-{}", Uuid::new_v4()),
                amount: 1.0,
                competition_id: Some(competition_id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(stranger.competition_score, None);

        let board = repos.competitions.leaderboard(&competition_id, 10).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].score, 12.5);
        assert_eq!(board[0].display_name.as_deref(), Some("Tester"));
    }
}
