//! CoinMarketCap price client
//!
//! One endpoint: `quotes/latest` for the USDT→KRW pair, authenticated with
//! a static API key header. Everything that can go wrong maps into
//! `UpstreamError` so the cache layer stays transport-agnostic.

use crate::config::UpstreamConfig;
use crate::errors::UpstreamError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const QUOTES_PATH: &str = "/v1/cryptocurrency/quotes/latest";

/// Source of the current USDT/KRW rate
///
/// Abstracted so tests can script responses instead of hitting the network.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_usdt_krw(&self) -> Result<f64, UpstreamError>;
}

/// HTTP client for the CoinMarketCap quotes API
pub struct CmcClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout_ms: u64,
}

impl CmcClient {
    /// Create a client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self, String> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("RateBot/{}", crate::version::VERSION))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout_ms: timeout.as_millis() as u64,
        })
    }
}

#[async_trait]
impl PriceSource for CmcClient {
    async fn fetch_usdt_krw(&self) -> Result<f64, UpstreamError> {
        let url = format!("{}{}", self.base_url, QUOTES_PATH);

        logger::debug(
            LogTag::Price,
            &format!("Fetching USDT/KRW quote from {}", url),
        );

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", "USDT"), ("convert", "KRW")])
            .header("Accepts", "application/json")
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    UpstreamError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

        extract_usdt_krw_price(&json)
    }
}

/// Pull the USDT→KRW price out of a quotes/latest payload
///
/// Expected path: `data.USDT.quote.KRW.price`. Anything absent, non-numeric,
/// non-finite, or non-positive is rejected.
fn extract_usdt_krw_price(json: &Value) -> Result<f64, UpstreamError> {
    let price = json["data"]["USDT"]["quote"]["KRW"]["price"]
        .as_f64()
        .ok_or(UpstreamError::MissingPrice)?;

    if !price.is_finite() || price <= 0.0 {
        return Err(UpstreamError::MissingPrice);
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quotes_payload(price: Value) -> Value {
        json!({
            "status": { "error_code": 0, "error_message": null },
            "data": {
                "USDT": {
                    "symbol": "USDT",
                    "quote": { "KRW": { "price": price } }
                }
            }
        })
    }

    #[test]
    fn test_extract_price() {
        let payload = quotes_payload(json!(1350.25));
        assert_eq!(extract_usdt_krw_price(&payload).unwrap(), 1350.25);
    }

    #[test]
    fn test_extract_rejects_missing_field() {
        let payload = json!({ "data": { "USDT": { "quote": {} } } });
        assert!(matches!(
            extract_usdt_krw_price(&payload),
            Err(UpstreamError::MissingPrice)
        ));
    }

    #[test]
    fn test_extract_rejects_non_numeric_price() {
        let payload = quotes_payload(json!("1350.25"));
        assert!(extract_usdt_krw_price(&payload).is_err());
    }

    #[test]
    fn test_extract_rejects_zero_and_negative() {
        assert!(extract_usdt_krw_price(&quotes_payload(json!(0.0))).is_err());
        assert!(extract_usdt_krw_price(&quotes_payload(json!(-1.0))).is_err());
    }
}
