//! HTTP client for the internal dashboard API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::MetricsError;
use crate::types::{AccountSnapshot, AnalyticsSummary, HistoricalRecord, Period};

const ANALYTICS_PATH: &str = "api/dashboard/analytics";
const ACCOUNTS_PATH: &str = "api/social-accounts";
const HISTORY_PATH: &str = "api/analytics/historical";

/// Read-only client for the three dashboard endpoints.
///
/// The base URL may carry a path prefix; endpoint paths are resolved relative
/// to it.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: Url,
}

impl DashboardClient {
    /// # Errors
    ///
    /// Returns [`MetricsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`MetricsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, MetricsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("reelpulse/0.1 (dashboard)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| MetricsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// `GET /api/dashboard/analytics`
    ///
    /// # Errors
    ///
    /// [`MetricsError::Http`] on transport failure or non-2xx status,
    /// [`MetricsError::Deserialize`] on an unexpected body.
    pub async fn analytics(&self) -> Result<AnalyticsSummary, MetricsError> {
        let url = self.endpoint(ANALYTICS_PATH)?;
        self.get_json(url).await
    }

    /// `GET /api/social-accounts`
    ///
    /// # Errors
    ///
    /// [`MetricsError::Http`] on transport failure or non-2xx status,
    /// [`MetricsError::Deserialize`] on an unexpected body.
    pub async fn social_accounts(&self) -> Result<Vec<AccountSnapshot>, MetricsError> {
        let url = self.endpoint(ACCOUNTS_PATH)?;
        self.get_json(url).await
    }

    /// `GET /api/analytics/historical?period={p}&days={7|30|90}`
    ///
    /// # Errors
    ///
    /// [`MetricsError::Http`] on transport failure or non-2xx status,
    /// [`MetricsError::Deserialize`] on an unexpected body.
    pub async fn historical(&self, period: Period) -> Result<Vec<HistoricalRecord>, MetricsError> {
        let url = self.history_url(period)?;
        self.get_json(url).await
    }

    fn history_url(&self, period: Period) -> Result<Url, MetricsError> {
        let mut url = self.endpoint(HISTORY_PATH)?;
        url.query_pairs_mut()
            .append_pair("period", period.as_str())
            .append_pair("days", &period.history_days().to_string());
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, MetricsError> {
        self.base_url
            .join(path)
            .map_err(|e| MetricsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, MetricsError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| MetricsError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}
