use crate::error::AppResult;
use async_trait::async_trait;

/// Outcome of looking up one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteLookup {
    /// Upstream answered 2xx; `None` when it omitted the current price
    Price(Option<f64>),
    /// Upstream answered with a non-2xx status
    Rejected { status: u16 },
}

/// A source of current prices.
///
/// Transport failures (connect, timeout, undecodable body) are errors;
/// an upstream refusal is a [`QuoteLookup::Rejected`] value.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn lookup(&self, symbol: &str) -> AppResult<QuoteLookup>;
}
