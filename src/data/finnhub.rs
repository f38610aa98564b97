//! Finnhub `stock/candle` client.
//!
//! The client issues exactly one request per `fetch` and never retries or
//! caches. The API key travels in `FinnhubConfig`, not in process globals.
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use ohlc_chart::data::{CandleRequest, FinnhubClient, FinnhubConfig, Resolution};
//!
//! let client = FinnhubClient::new(FinnhubConfig::new("my-api-key"))?;
//! let request = CandleRequest::trailing_months("AAPL", Resolution::Day, Utc::now(), 11)?;
//! let dataset = client.fetch(&request).await?;
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Dataset;
use crate::data::{CandlePayload, CandleRequest, decode_candle_payload_str};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const API_KEY_ENV: &str = "FINNHUB_API_KEY";

/// Connection settings for the Finnhub API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinnhubConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for FinnhubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinnhubConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl FinnhubConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Reads the key from `FINNHUB_API_KEY` once, for hosts that keep it there.
    pub fn from_env() -> ChartResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            ChartError::InvalidData(format!("environment variable {API_KEY_ENV} is not set"))
        })?;
        Ok(Self::new(api_key))
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "finnhub api key must not be empty".to_owned(),
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ChartError::InvalidData(format!(
                "finnhub base url must be http(s), got `{}`",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ChartError::InvalidData(
                "finnhub timeout must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize finnhub config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse finnhub config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Async candle source backed by one `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct FinnhubClient {
    http: Client,
    config: FinnhubConfig,
}

impl FinnhubClient {
    pub fn new(config: FinnhubConfig) -> ChartResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &FinnhubConfig {
        &self.config
    }

    /// Endpoint URL for a request, without the token.
    #[must_use]
    pub fn candle_endpoint(&self) -> String {
        format!("{}/stock/candle", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetches and decodes candles for `request`.
    ///
    /// Fails with `Fetch`/`FetchStatus` on transport problems, `Decode` when
    /// the body matches neither accepted shape and `NoData` when the provider
    /// reports an empty range.
    pub async fn fetch(&self, request: &CandleRequest) -> ChartResult<Dataset> {
        let (from, to) = request.unix_range();
        debug!(
            symbol = %request.symbol,
            resolution = %request.resolution,
            from,
            to,
            "requesting candles"
        );

        let response = self
            .http
            .get(self.candle_endpoint())
            .query(&[
                ("symbol", request.symbol.as_str()),
                ("resolution", request.resolution.as_wire()),
                ("from", &from.to_string()),
                ("to", &to.to_string()),
                ("token", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(symbol = %request.symbol, status = status.as_u16(), "candle request rejected");
            return Err(ChartError::FetchStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload = decode_candle_payload_str(&body);
        match &payload {
            CandlePayload::Ok(dataset) => {
                debug!(symbol = %request.symbol, bars = dataset.len(), "decoded candles");
            }
            CandlePayload::NoData => {
                warn!(symbol = %request.symbol, "provider reported no candle data");
            }
            CandlePayload::Invalid(issues) => {
                warn!(symbol = %request.symbol, issues = issues.len(), "malformed candle payload");
            }
        }
        payload.into_result(&request.symbol)
    }
}
