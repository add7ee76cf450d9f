use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// Running savings totals for one client-supplied user id
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub total_saved: f64,
    pub save_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// First save of a user not seen before
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub display_name: Option<&'a str>,
    pub total_saved: f64,
    pub save_count: i64,
}

/// Totals written back after a locked read.
/// `display_name: None` leaves the stored name alone.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUserTotals<'a> {
    pub total_saved: f64,
    pub save_count: i64,
    pub display_name: Option<&'a str>,
}

impl User {
    /// Totals after adding one save of `amount`.
    pub fn with_save<'a>(&self, amount: f64, display_name: Option<&'a str>) -> UpdateUserTotals<'a> {
        UpdateUserTotals {
            total_saved: self.total_saved + amount,
            save_count: self.save_count + 1,
            display_name,
        }
    }
}
