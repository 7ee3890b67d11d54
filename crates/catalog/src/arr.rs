//! Shared HTTP plumbing for the Radarr/Sonarr v3 APIs.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::CatalogError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_EXCERPT: usize = 200;

pub(crate) struct ArrClient {
    provider: &'static str,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ArrClient {
    pub(crate) fn new(
        provider: &'static str,
        base_url: &str,
        api_key: &str,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub(crate) fn provider(&self) -> &'static str {
        self.provider
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{path}", self.base_url);
        debug!(provider = self.provider, url = %url, "catalog request");

        let resp = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized {
                provider: self.provider,
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                provider: self.provider,
                status: status.as_u16(),
                body: body.chars().take(BODY_EXCERPT).collect(),
            });
        }

        resp.json()
            .await
            .map_err(|e| CatalogError::Provider(format!("{}: parse JSON: {e}", self.provider)))
    }

    pub(crate) async fn system_status(&self) -> Result<(), CatalogError> {
        let _: serde_json::Value = self.get_json("/api/v3/system/status").await?;
        Ok(())
    }
}

/// Providers report unknown ratings as 0.
pub(crate) fn normalize_rating(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0).map(|v| v.min(10.0))
}

/// Providers report unknown years as 0.
pub(crate) fn normalize_year(value: Option<i32>) -> Option<i32> {
    value.filter(|y| *y > 0)
}
