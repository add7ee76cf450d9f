//! Quote DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::external::QuoteLookup;
use crate::services::SymbolQuote;

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuotesQuery {
    /// Comma-separated ticker symbols, e.g. `AAPL,MSFT`
    pub symbols: Option<String>,
}

/// One entry of the quote batch. A symbol the provider rejected is
/// reported as `{"symbol": ..., "error": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QuoteItem {
    Priced { symbol: String, price: Option<f64> },
    Failed { symbol: String, error: bool },
}

impl From<SymbolQuote> for QuoteItem {
    fn from(quote: SymbolQuote) -> Self {
        match quote.lookup {
            QuoteLookup::Price(price) => QuoteItem::Priced {
                symbol: quote.symbol,
                price,
            },
            QuoteLookup::Rejected { .. } => QuoteItem::Failed {
                symbol: quote.symbol,
                error: true,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"data": [{"symbol": "AAPL", "price": 189.5}, {"symbol": "NOPE", "error": true}]}))]
pub struct QuotesResponse {
    pub data: Vec<QuoteItem>,
}

impl QuotesResponse {
    pub fn new(quotes: Vec<SymbolQuote>) -> Self {
        Self {
            data: quotes.into_iter().map(QuoteItem::from).collect(),
        }
    }
}
