//! Quote batch lookups.

use std::sync::Arc;

use futures::future::join_all;

use crate::error::{AppError, AppResult};
use crate::external::{QuoteLookup, QuoteProvider};

/// One symbol of a batch with its lookup outcome
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolQuote {
    pub symbol: String,
    pub lookup: QuoteLookup,
}

#[derive(Clone)]
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    max_symbols: usize,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProvider>, max_symbols: usize) -> Self {
        Self {
            provider,
            max_symbols,
        }
    }

    /// Split a comma separated `symbols` parameter. Entries are trimmed,
    /// empty entries dropped and the list cut to `max_symbols`. Order and
    /// duplicates are preserved.
    ///
    /// Blank entries are dropped before the cut, so they never take up one
    /// of the `max_symbols` slots.
    pub fn parse_symbols(raw: Option<&str>, max_symbols: usize) -> AppResult<Vec<String>> {
        let symbols: Vec<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(max_symbols)
            .map(String::from)
            .collect();

        if symbols.is_empty() {
            return Err(AppError::BadRequest {
                message: "symbols required".to_string(),
            });
        }

        Ok(symbols)
    }

    /// Look up every symbol concurrently. Results keep request order; any
    /// transport failure fails the whole batch.
    pub async fn quotes(&self, raw_symbols: Option<&str>) -> AppResult<Vec<SymbolQuote>> {
        let symbols = Self::parse_symbols(raw_symbols, self.max_symbols)?;

        tracing::debug!(
            provider = self.provider.name(),
            count = symbols.len(),
            "Fetching quotes"
        );

        let lookups = join_all(symbols.iter().map(|s| self.provider.lookup(s))).await;

        symbols
            .into_iter()
            .zip(lookups)
            .map(|(symbol, lookup)| Ok(SymbolQuote { symbol, lookup: lookup? }))
            .collect()
    }
}
