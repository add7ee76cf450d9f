//! HTTP request handlers, one module per resource.

pub mod coach;
pub mod community;
pub mod competition;
pub mod health;
pub mod quotes;
pub mod savings;
