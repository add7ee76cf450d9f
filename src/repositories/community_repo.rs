//! Community total repository (a single `"global"` row).

use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{CommunityTotal, GLOBAL_COMMUNITY_ID, NewCommunityTotal};
use crate::schema::community_totals::{self, dsl};

#[derive(Clone)]
pub struct CommunityRepository {
    pool: AsyncDbPool,
}

impl CommunityRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn add_save(&self, amount: f64) -> AppResult<CommunityTotal> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let current = community_totals::table
                    .find(GLOBAL_COMMUNITY_ID)
                    .select(CommunityTotal::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                match current {
                    Some(row) => {
                        diesel::update(community_totals::table.find(GLOBAL_COMMUNITY_ID))
                            .set((
                                dsl::total.eq(row.total + amount),
                                dsl::save_count.eq(row.save_count + 1),
                                dsl::updated_at.eq(now),
                            ))
                            .returning(CommunityTotal::as_returning())
                            .get_result(conn)
                            .await
                    }
                    None => {
                        diesel::insert_into(community_totals::table)
                            .values(NewCommunityTotal {
                                id: GLOBAL_COMMUNITY_ID,
                                total: amount,
                                save_count: 1,
                            })
                            .on_conflict(dsl::id)
                            .do_update()
                            .set((
                                dsl::total.eq(dsl::total + amount),
                                dsl::save_count.eq(dsl::save_count + 1),
                                dsl::updated_at.eq(now),
                            ))
                            .returning(CommunityTotal::as_returning())
                            .get_result(conn)
                            .await
                    }
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(DatabaseErrorConverter::during("update community total"))
    }

    /// `None` until the first save is recorded.
    pub async fn get(&self) -> AppResult<Option<CommunityTotal>> {
        let mut conn = self.pool.get().await?;

        community_totals::table
            .find(GLOBAL_COMMUNITY_ID)
            .select(CommunityTotal::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DatabaseErrorConverter::during("load community total"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{COMMUNITY_LOCK, test_pool};
    use crate::services::CommunityService;
    use futures::future::join_all;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_concurrent_saves_increment_total() {
        let _guard = COMMUNITY_LOCK.lock().await;
        let repo = CommunityRepository::new(test_pool().await);
        let service = CommunityService::new(repo.clone());

        // A missing row reads as zeros.
        let before = service.snapshot().await.unwrap();

        let results = join_all((0..20).map(|_| repo.add_save(1.0))).await;
        assert!(results.iter().all(Result::is_ok));

        let after = repo.get().await.unwrap().unwrap();
        assert_eq!(after.save_count, before.save_count + 20);
        assert!((after.total - (before.total + 20.0)).abs() < 1e-6);

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(snapshot.save_count, after.save_count);
        assert!(snapshot.updated_at.is_some());
    }
}
