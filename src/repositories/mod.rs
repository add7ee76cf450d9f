//! Repository layer for data access operations.
//!
//! Every write that reads a row before changing it runs inside its own
//! transaction with the row locked `FOR UPDATE`.

mod community_repo;
mod competition_repo;
mod save_repo;
mod user_repo;

pub use community_repo::CommunityRepository;
pub use competition_repo::CompetitionRepository;
pub use save_repo::SaveRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub saves: SaveRepository,
    pub competitions: CompetitionRepository,
    pub community: CommunityRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            saves: SaveRepository::new(pool.clone()),
            competitions: CompetitionRepository::new(pool.clone()),
            community: CommunityRepository::new(pool),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use tokio::sync::{Mutex, OnceCell};

    use crate::config::DatabaseConfig;
    use crate::db::{AsyncDbPool, establish_async_connection_pool, run_pending_migrations};

    static MIGRATED: OnceCell<()> = OnceCell::const_new();

    /// Held by tests that assert exact changes to the shared community row.
    pub static COMMUNITY_LOCK: Mutex<()> = Mutex::const_new(());

    /// Pool on `DATABASE_URL` with migrations applied once per test binary.
    pub async fn test_pool() -> AsyncDbPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        MIGRATED
            .get_or_init(|| async {
                run_pending_migrations(&url)
                    .await
                    .expect("migrations should apply");
            })
            .await;

        establish_async_connection_pool(&DatabaseConfig {
            url,
            ..Default::default()
        })
        .await
        .expect("pool should connect")
    }
}
