use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// Competition used when a request does not name one
pub const DEFAULT_COMPETITION_ID: &str = "global";

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::competition_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompetitionMember {
    pub competition_id: String,
    pub user_id: String,
    pub display_name: Option<String>,
    pub score: f64,
    pub joined_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New members always start at a score of zero
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::competition_members)]
pub struct NewCompetitionMember<'a> {
    pub competition_id: &'a str,
    pub user_id: &'a str,
    pub display_name: Option<&'a str>,
}
