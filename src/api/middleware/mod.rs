//! Middleware components for request processing.
//!
//! Request id tracking, access logging, rate limiting and the
//! error-to-response conversions.

mod error_handler;
mod logging;
mod rate_limit;
mod request_id;

pub use error_handler::{INTERNAL_ERROR, RATE_LIMITED, SERVICE_UNAVAILABLE};
pub use logging::logging_middleware;
pub use rate_limit::{RateDecision, RateLimiter, rate_limit_middleware, spawn_purge_task};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
