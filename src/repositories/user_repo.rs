//! User totals repository.

use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, User};
use crate::schema::users;

#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Add one save of `amount` to the user's totals, creating the row on
    /// first use. `display_name` replaces the stored name when given.
    pub async fn add_save(
        &self,
        user_id: &str,
        amount: f64,
        display_name: Option<&str>,
    ) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let existing = users::table
                    .find(user_id)
                    .select(User::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                match existing {
                    Some(user) => {
                        diesel::update(users::table.find(user_id))
                            .set((user.with_save(amount, display_name), users::updated_at.eq(now)))
                            .returning(User::as_returning())
                            .get_result(conn)
                            .await
                    }
                    // No row to lock yet; a concurrent first save lands on the conflict arm.
                    None => {
                        let insert = diesel::insert_into(users::table)
                            .values(NewUser {
                                id: user_id,
                                display_name,
                                total_saved: amount,
                                save_count: 1,
                            })
                            .on_conflict(users::id)
                            .do_update();

                        let increment = (
                            users::total_saved.eq(users::total_saved + amount),
                            users::save_count.eq(users::save_count + 1),
                            users::updated_at.eq(now),
                        );

                        match display_name {
                            Some(name) => {
                                insert
                                    .set((increment, users::display_name.eq(name)))
                                    .returning(User::as_returning())
                                    .get_result(conn)
                                    .await
                            }
                            None => {
                                insert
                                    .set(increment)
                                    .returning(User::as_returning())
                                    .get_result(conn)
                                    .await
                            }
                        }
                    }
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(DatabaseErrorConverter::during("update user totals"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::test_pool;
    use futures::future::join_all;
    use uuid::Uuid;

    fn new_user_id() -> String {
        format!("test-{}", Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_add_save_keeps_name_when_none_given() {
        let repo = UserRepository::new(test_pool().await);
        let user_id = new_user_id();

        let first = repo.add_save(&user_id, 2.0, Some("Ada")).await.unwrap();
        assert_eq!(first.save_count, 1);
        assert_eq!(first.display_name.as_deref(), Some("Ada"));

        let second = repo.add_save(&user_id, 3.0, None).await.unwrap();
        assert_eq!(second.total_saved, 5.0);
        assert_eq!(second.save_count, 2);
        assert_eq!(second.display_name.as_deref(), Some("Ada"));

        let renamed = repo.add_save(&user_id, 1.0, Some("Ada L.")).await.unwrap();
        assert_eq!(renamed.display_name.as_deref(), Some("Ada L."));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_concurrent_first_saves_all_count() {
        let repo = UserRepository::new(test_pool().await);
        let user_id = new_user_id();

        let results =
            join_all((0..20).map(|_| repo.add_save(&user_id, 1.0, Some("Racer")))).await;
        assert!(results.iter().all(Result::is_ok));

        let user = repo.add_save(&user_id, 1.0, None).await.unwrap();
        assert_eq!(user.save_count, 21);
        assert_eq!(user.total_saved, 21.0);
        assert_eq!(user.display_name.as_deref(), Some("Racer"));
    }
}
