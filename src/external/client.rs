use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every upstream request
pub const USER_AGENT: &str = concat!("money-mind/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for all upstream providers.
///
/// Initialized on first access and reused so connections and DNS lookups
/// are pooled across requests. Timeouts: 30s per request, 10s to connect.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .http2_adaptive_window(true)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});

/// Join a base URL and a path without doubling or dropping the slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
