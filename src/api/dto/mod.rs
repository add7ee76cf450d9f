//! Data Transfer Objects for API requests and responses.
//!
//! Wire format is JSON with camelCase fields; every error body is
//! `{"error": ...}`.

mod coach;
mod community;
mod competition;
mod error;
mod health;
mod quote;
mod savings;

pub use coach::{CoachRequest, CoachResponse, CoachTurn, TurnRole};
pub use community::CommunityResponse;
pub use competition::{
    JoinRequest, JoinResponse, LeaderView, LeaderboardQuery, LeaderboardResponse, MemberView,
};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus, SERVICE_NAME, ServiceInfo};
pub use quote::{QuoteItem, QuotesQuery, QuotesResponse};
pub use savings::{SaveRequest, SaveResponse};
