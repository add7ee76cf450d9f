use super::provider::{QuoteLookup, QuoteProvider};
use super::types::FinnhubQuote;
use crate::config::QuotesConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::{HTTP_CLIENT, endpoint};
use async_trait::async_trait;

const PROVIDER: &str = "finnhub";

/// Finnhub compatible quote API (`GET {base_url}/quote?symbol=&token=`)
pub struct FinnhubQuotes {
    base_url: String,
    api_key: String,
}

impl FinnhubQuotes {
    pub fn new(config: &QuotesConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::ExternalApi {
            provider: PROVIDER.into(),
            message: message.into(),
            source,
        }
    }

    fn quote_url(&self, symbol: &str) -> AppResult<reqwest::Url> {
        reqwest::Url::parse_with_params(
            &endpoint(&self.base_url, "quote"),
            &[("symbol", symbol), ("token", self.api_key.as_str())],
        )
        .map_err(|e| Self::make_error(format!("invalid URL: {}", e), Some(e.into())))
    }
}

#[async_trait]
impl QuoteProvider for FinnhubQuotes {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn lookup(&self, symbol: &str) -> AppResult<QuoteLookup> {
        let url = self.quote_url(symbol)?;

        let resp = HTTP_CLIENT
            .get(url)
            .send()
            .await
            .map_err(|e| Self::make_error(format!("request failed: {}", e), Some(e.into())))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(symbol, status = status.as_u16(), "Quote rejected upstream");
            return Ok(QuoteLookup::Rejected {
                status: status.as_u16(),
            });
        }

        let quote: FinnhubQuote = resp
            .json()
            .await
            .map_err(|e| Self::make_error(format!("invalid JSON: {}", e), Some(e.into())))?;

        tracing::trace!(symbol, ?quote, "Quote received");

        Ok(QuoteLookup::Price(quote.c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> FinnhubQuotes {
        FinnhubQuotes::new(&QuotesConfig {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_quote_url_encodes_symbol() {
        let provider = FinnhubQuotes::new(&QuotesConfig::default());
        let url = provider.quote_url("BINANCE:BTC USDT").unwrap();
        assert_eq!(url.path(), "/api/v1/quote");
        assert!(url.as_str().contains("symbol=BINANCE%3ABTC+USDT"));
        assert!(url.as_str().ends_with("token="));
    }

    #[tokio::test]
    async fn test_lookup_returns_current_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .and(query_param("symbol", "AAPL"))
            .and(query_param("token", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "c": 189.5, "d": 1.2, "dp": 0.64, "pc": 188.3, "t": 1700000000
            })))
            .mount(&server)
            .await;

        let lookup = provider_for(&server).lookup("AAPL").await.unwrap();
        assert_eq!(lookup, QuoteLookup::Price(Some(189.5)));
    }

    #[tokio::test]
    async fn test_lookup_missing_price_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let lookup = provider_for(&server).lookup("NOPE").await.unwrap();
        assert_eq!(lookup, QuoteLookup::Price(None));
    }

    #[tokio::test]
    async fn test_lookup_non_success_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let lookup = provider_for(&server).lookup("AAPL").await.unwrap();
        assert_eq!(lookup, QuoteLookup::Rejected { status: 429 });
    }

    #[tokio::test]
    async fn test_lookup_invalid_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = provider_for(&server).lookup("AAPL").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi { ref provider, .. } if provider == "finnhub"));
    }

    #[tokio::test]
    async fn test_lookup_connection_failure_is_error() {
        let provider = FinnhubQuotes::new(&QuotesConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        });
        assert!(provider.lookup("AAPL").await.is_err());
    }
}
