mod finnhub;
mod provider;
mod types;

pub use finnhub::FinnhubQuotes;
pub use provider::{QuoteLookup, QuoteProvider};
pub use types::FinnhubQuote;
