//! Save event repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{NewSave, Save};
use crate::schema::saves;

#[derive(Clone)]
pub struct SaveRepository {
    pool: AsyncDbPool,
}

impl SaveRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_save: NewSave<'_>) -> AppResult<Save> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(saves::table)
            .values(&new_save)
            .returning(Save::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::during("insert save"))
    }
}
