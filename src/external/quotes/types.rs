use serde::Deserialize;

/// Finnhub `/quote` payload. Only the current price is used; the other
/// fields are kept for logging.
#[derive(Debug, Clone, Deserialize)]
pub struct FinnhubQuote {
    /// Current price
    pub c: Option<f64>,
    /// Change
    pub d: Option<f64>,
    /// Percent change
    pub dp: Option<f64>,
    /// Previous close
    pub pc: Option<f64>,
    /// Unix timestamp of the quote
    pub t: Option<i64>,
}
