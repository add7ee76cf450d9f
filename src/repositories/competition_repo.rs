//! Competition membership and leaderboard repository.

use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{CompetitionMember, NewCompetitionMember};
use crate::schema::competition_members::{self, dsl};

#[derive(Clone)]
pub struct CompetitionRepository {
    pool: AsyncDbPool,
}

impl CompetitionRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Insert the member at score 0, or return the existing member with its
    /// score untouched. A supplied `display_name` always wins.
    pub async fn join(
        &self,
        competition_id: &str,
        user_id: &str,
        display_name: Option<&str>,
    ) -> AppResult<CompetitionMember> {
        let mut conn = self.pool.get().await?;

        let new_member = NewCompetitionMember {
            competition_id,
            user_id,
            display_name,
        };

        let insert = diesel::insert_into(competition_members::table)
            .values(&new_member)
            .on_conflict((dsl::competition_id, dsl::user_id))
            .do_update();

        let result = match display_name {
            Some(name) => {
                insert
                    .set((dsl::display_name.eq(name), dsl::updated_at.eq(now)))
                    .returning(CompetitionMember::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            None => {
                insert
                    .set(dsl::updated_at.eq(now))
                    .returning(CompetitionMember::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        };

        result.map_err(DatabaseErrorConverter::during("join competition"))
    }

    /// Add `amount` to a member's score. Returns `None` when the user has not
    /// joined the competition.
    pub async fn add_to_score(
        &self,
        competition_id: &str,
        user_id: &str,
        amount: f64,
    ) -> AppResult<Option<CompetitionMember>> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let key = (competition_id, user_id);

                let member = competition_members::table
                    .find(key)
                    .select(CompetitionMember::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                let Some(member) = member else {
                    return Ok(None);
                };

                diesel::update(competition_members::table.find(key))
                    .set((dsl::score.eq(member.score + amount), dsl::updated_at.eq(now)))
                    .returning(CompetitionMember::as_returning())
                    .get_result(conn)
                    .await
                    .map(Some)
            }
            .scope_boxed()
        })
        .await
        .map_err(DatabaseErrorConverter::during("update competition score"))
    }

    /// Top `limit` members by score, earlier joiners first on ties.
    pub async fn leaderboard(
        &self,
        competition_id: &str,
        limit: i64,
    ) -> AppResult<Vec<CompetitionMember>> {
        let mut conn = self.pool.get().await?;

        competition_members::table
            .filter(dsl::competition_id.eq(competition_id))
            .order((dsl::score.desc(), dsl::joined_at.asc(), dsl::user_id.asc()))
            .limit(limit)
            .select(CompetitionMember::as_select())
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::during("load leaderboard"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::test_pool;
    use uuid::Uuid;

    fn new_competition_id() -> String {
        format!("comp-{}", &Uuid::new_v4().simple().to_string()[..20])
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_rejoin_keeps_score() {
        let repo = CompetitionRepository::new(test_pool().await);
        let competition_id = new_competition_id();

        let joined = repo.join(&competition_id, "u1", Some("A")).await.unwrap();
        assert_eq!(joined.score, 0.0);

        let scored = repo
            .add_to_score(&competition_id, "u1", 5.0)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(scored.score, 5.0);

        let again = repo.join(&competition_id, "u1", None).await.unwrap();
        assert_eq!(again.score, 5.0);
        assert_eq!(again.display_name.as_deref(), Some("A"));
        assert_eq!(again.joined_at.to_jiff(), joined.joined_at.to_jiff());

        let renamed = repo.join(&competition_id, "u1", Some("B")).await.unwrap();
        assert_eq!(renamed.score, 5.0);
        assert_eq!(renamed.display_name.as_deref(), Some("B"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_add_to_score_skips_non_members() {
        let repo = CompetitionRepository::new(test_pool().await);
        let competition_id = new_competition_id();

        let result = repo.add_to_score(&competition_id, "ghost", 3.0).await.unwrap();
        assert!(result.is_none());
        assert!(repo.leaderboard(&competition_id, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_leaderboard_tie_breaks() {
        let pool = test_pool().await;
        let repo = CompetitionRepository::new(pool.clone());
        let competition_id = new_competition_id();

        repo.join(&competition_id, "z", None).await.unwrap();

        // One statement, so both rows share the same joined_at.
        let mut conn = pool.get().await.unwrap();
        diesel::insert_into(competition_members::table)
            .values(&vec![
                NewCompetitionMember {
                    competition_id: &competition_id,
                    user_id: "b",
                    display_name: None,
                },
                NewCompetitionMember {
                    competition_id: &competition_id,
                    user_id: "a",
                    display_name: None,
                },
            ])
            .execute(&mut conn)
            .await
            .unwrap();
        drop(conn);

        repo.join(&competition_id, "c", None).await.unwrap();
        for user_id in ["z", "a", "b"] {
            repo.add_to_score(&competition_id, user_id, 5.0)
                .await
                .unwrap()
                .unwrap();
        }

        let board: Vec<(String, f64)> = repo
            .leaderboard(&competition_id, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|m| (m.user_id, m.score))
            .collect();
        assert_eq!(
            board,
            vec![
                ("z".to_string(), 5.0),
                ("a".to_string(), 5.0),
                ("b".to_string(), 5.0),
                ("c".to_string(), 0.0),
            ]
        );

        let top_two = repo.leaderboard(&competition_id, 2).await.unwrap();
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[1].user_id, "a");
    }
}
