use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// Key of the single community total row
pub const GLOBAL_COMMUNITY_ID: &str = "global";

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::community_totals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommunityTotal {
    pub id: String,
    pub total: f64,
    pub save_count: i64,
    pub updated_at: Timestamp,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::community_totals)]
pub struct NewCommunityTotal<'a> {
    pub id: &'a str,
    pub total: f64,
    pub save_count: i64,
}
