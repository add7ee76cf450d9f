use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

/// One reported saving. Rows are append-only.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::saves)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Save {
    pub id: Uuid,
    pub user_id: String,
    pub amount: f64,
    pub note: Option<String>,
    pub category: Option<String>,
    pub competition_id: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::saves)]
pub struct NewSave<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub amount: f64,
    pub note: Option<&'a str>,
    pub category: Option<&'a str>,
    pub competition_id: Option<&'a str>,
}
