//! ErsatzTV smart collection client.
//!
//! Endpoints: `GET /api/collections/smart`, `POST /api/collections/smart/new`,
//! `PUT /api/collections/smart/{id}`.

use director_core::CollectionTarget;
use serde::Deserialize;
use serde_json::json;

use super::http::JsonService;
use super::{CollectionId, CollectionService, RemoteCollection, RemoteContent, SelectionPayload};
use crate::CollectionError;

pub struct ErsatztvClient {
    http: JsonService,
}

impl ErsatztvClient {
    pub fn new(base_url: &str) -> Result<Self, CollectionError> {
        Ok(Self {
            http: JsonService::new("ersatztv", base_url)?,
        })
    }

    fn query<'a>(&self, payload: &'a SelectionPayload) -> Result<&'a str, CollectionError> {
        match payload {
            SelectionPayload::Query(q) => Ok(q.as_str()),
            other => Err(CollectionError::PayloadMismatch {
                service: self.http.service(),
                payload: other.kind(),
            }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SmartCollection {
    #[serde(alias = "Id")]
    id: Option<i64>,
    #[serde(alias = "Name")]
    name: Option<String>,
    #[serde(alias = "Query")]
    query: Option<String>,
}

impl SmartCollection {
    /// Fields the service left out are taken from what was sent.
    fn into_remote(self, id: Option<i64>, name: &str, query: &str) -> RemoteCollection {
        RemoteCollection {
            id: CollectionId(self.id.or(id).unwrap_or(0).to_string()),
            name: self.name.unwrap_or_else(|| name.to_string()),
            content: RemoteContent::Query(self.query.unwrap_or_else(|| query.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl CollectionService for ErsatztvClient {
    fn target(&self) -> CollectionTarget {
        CollectionTarget::Ersatztv
    }

    async fn list_collections(&self) -> Result<Vec<RemoteCollection>, CollectionError> {
        let data: Vec<SmartCollection> = self.http.get("/api/collections/smart").await?;
        Ok(data
            .into_iter()
            .map(|c| c.into_remote(None, "", ""))
            .collect())
    }

    async fn create_collection(
        &self,
        name: &str,
        payload: &SelectionPayload,
    ) -> Result<RemoteCollection, CollectionError> {
        let query = self.query(payload)?;
        // The create endpoint binds capitalized field names.
        let body = json!({ "Name": name, "Query": query });
        let created: SmartCollection = self.http.post("/api/collections/smart/new", &body).await?;
        Ok(created.into_remote(None, name, query))
    }

    async fn update_collection(
        &self,
        id: &CollectionId,
        name: &str,
        payload: &SelectionPayload,
    ) -> Result<RemoteCollection, CollectionError> {
        let query = self.query(payload)?;
        let numeric: i64 = id.as_str().parse().map_err(|_| CollectionError::InvalidId {
            service: self.http.service(),
            id: id.to_string(),
        })?;
        let body = json!({ "id": numeric, "name": name, "query": query });
        let updated: SmartCollection = self
            .http
            .put(&format!("/api/collections/smart/{numeric}"), &body)
            .await?;
        Ok(updated.into_remote(Some(numeric), name, query))
    }
}
