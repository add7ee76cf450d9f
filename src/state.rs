//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::api::middleware::RateLimiter;
use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared state handed to every handler.
///
/// Cloning is cheap: the pool, providers and limiter are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Direct pool access for the readiness check
    pub db_pool: AsyncDbPool,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Builds repositories and services on top of `pool`, using the
    /// configured upstream providers.
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let services = Services::new(Repositories::new(pool.clone()), settings);
        Self::from_parts(pool, services, settings)
    }

    pub fn from_parts(pool: AsyncDbPool, services: Services, settings: &Settings) -> Self {
        Self {
            services,
            db_pool: pool,
            rate_limiter: Arc::new(RateLimiter::new(&settings.rate_limit)),
        }
    }
}
