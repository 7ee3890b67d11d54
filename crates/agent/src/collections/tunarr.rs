//! Tunarr custom show client.
//!
//! Endpoints: `GET /api/v2/custom-shows`, `POST /api/v2/custom-shows`,
//! `PUT /api/v2/custom-shows/{id}`.

use director_core::CollectionTarget;
use serde::{Deserialize, Serialize};

use super::http::JsonService;
use super::{CollectionId, CollectionService, RemoteCollection, RemoteContent, SelectionPayload};
use crate::CollectionError;

pub struct TunarrClient {
    http: JsonService,
}

/// A program entry in a custom show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomShowProgram {
    /// `content` or `custom`.
    #[serde(rename = "type")]
    pub program_type: String,
    /// `movie`, `episode` or `track`.
    pub subtype: String,
    pub title: String,
    pub duration: u64,
    pub external_source_type: String,
    pub external_source_name: String,
    pub external_key: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CustomShow {
    id: Option<String>,
    name: Option<String>,
    content_count: Option<u64>,
    total_duration: Option<u64>,
}

impl CustomShow {
    fn into_remote(self, id: Option<&CollectionId>, name: &str, programs: usize) -> RemoteCollection {
        RemoteCollection {
            id: self
                .id
                .map(CollectionId)
                .or_else(|| id.cloned())
                .unwrap_or_else(|| CollectionId(String::new())),
            name: self.name.unwrap_or_else(|| name.to_string()),
            content: RemoteContent::Programs {
                content_count: self.content_count.unwrap_or(programs as u64),
                total_duration_ms: self.total_duration.unwrap_or(0),
            },
        }
    }
}

#[derive(Serialize)]
struct CustomShowBody<'a> {
    name: &'a str,
    programs: &'a [CustomShowProgram],
}

impl TunarrClient {
    pub fn new(base_url: &str) -> Result<Self, CollectionError> {
        Ok(Self {
            http: JsonService::new("tunarr", base_url)?,
        })
    }

    fn programs<'a>(
        &self,
        payload: &'a SelectionPayload,
    ) -> Result<&'a [CustomShowProgram], CollectionError> {
        match payload {
            SelectionPayload::Programs(p) => Ok(p.as_slice()),
            other => Err(CollectionError::PayloadMismatch {
                service: self.http.service(),
                payload: other.kind(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl CollectionService for TunarrClient {
    fn target(&self) -> CollectionTarget {
        CollectionTarget::Tunarr
    }

    async fn list_collections(&self) -> Result<Vec<RemoteCollection>, CollectionError> {
        let data: Vec<CustomShow> = self.http.get("/api/v2/custom-shows").await?;
        Ok(data
            .into_iter()
            .map(|s| s.into_remote(None, "", 0))
            .collect())
    }

    async fn create_collection(
        &self,
        name: &str,
        payload: &SelectionPayload,
    ) -> Result<RemoteCollection, CollectionError> {
        let programs = self.programs(payload)?;
        let body = CustomShowBody { name, programs };
        let created: CustomShow = self.http.post("/api/v2/custom-shows", &body).await?;
        Ok(created.into_remote(None, name, programs.len()))
    }

    async fn update_collection(
        &self,
        id: &CollectionId,
        name: &str,
        payload: &SelectionPayload,
    ) -> Result<RemoteCollection, CollectionError> {
        let programs = self.programs(payload)?;
        let body = CustomShowBody { name, programs };
        let updated: CustomShow = self
            .http
            .put(&format!("/api/v2/custom-shows/{id}"), &body)
            .await?;
        Ok(updated.into_remote(Some(id), name, programs.len()))
    }
}
