use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::CollectionError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_EXCERPT: usize = 200;

/// JSON-over-HTTP access to one collection service.
pub(crate) struct JsonService {
    service: &'static str,
    base_url: String,
    client: reqwest::Client,
}

impl JsonService {
    pub(crate) fn new(service: &'static str, base_url: &str) -> Result<Self, CollectionError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CollectionError::Client(e.to_string()))?;

        Ok(Self {
            service,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub(crate) fn service(&self) -> &'static str {
        self.service
    }

    pub(crate) async fn get<T>(&self, path: &str) -> Result<T, CollectionError>
    where
        T: DeserializeOwned + Default,
    {
        let req = self.client.get(self.url(path));
        self.send("GET", path, req).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, CollectionError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let req = self.client.post(self.url(path)).json(body);
        self.send("POST", path, req).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, CollectionError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let req = self.client.put(self.url(path)).json(body);
        self.send("PUT", path, req).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// An empty success body decodes as `T::default()`.
    async fn send<T>(
        &self,
        method: &'static str,
        path: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, CollectionError>
    where
        T: DeserializeOwned + Default,
    {
        debug!(service = self.service, method, path, "collection request");

        let resp = req
            .send()
            .await
            .map_err(|e| CollectionError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CollectionError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(
                service = self.service,
                method,
                path,
                status = status.as_u16(),
                "collection request rejected"
            );
            return Err(CollectionError::Status {
                service: self.service,
                status: status.as_u16(),
                body: body.chars().take(BODY_EXCERPT).collect(),
            });
        }

        if body.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&body).map_err(|e| CollectionError::Decode {
            service: self.service,
            message: e.to_string(),
        })
    }
}
