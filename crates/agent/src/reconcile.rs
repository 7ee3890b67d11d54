//! Create-or-update of the remote collection for a suggestion.
//!
//! Collections are matched by exact (truncated) name. Renaming a theme's
//! collection between runs therefore creates a new remote collection and
//! leaves the old one in place.

use std::collections::HashMap;

use director_core::PlaylistSuggestion;
use serde::Serialize;
use tracing::{debug, info};

use crate::CollectionError;
use crate::collections::{
    CollectionId, CollectionService, RemoteCollection, SelectionPayload, flatten_titles,
    truncate_name,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ApplyOutcome {
    Created(RemoteCollection),
    Updated(RemoteCollection),
    /// Nothing was selected, so nothing was sent.
    Skipped,
}

impl ApplyOutcome {
    pub fn applied(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// Apply `suggestion` to `service`: one list call, then at most one write.
pub async fn reconcile(
    service: &dyn CollectionService,
    suggestion: &PlaylistSuggestion,
) -> Result<ApplyOutcome, CollectionError> {
    let titles = flatten_titles(suggestion);
    if titles.is_empty() {
        info!(collection = %suggestion.collection_name, "no titles selected, skipping collection");
        return Ok(ApplyOutcome::Skipped);
    }

    let payload = SelectionPayload::for_target(service.target(), &titles);
    let name = truncate_name(&suggestion.collection_name);

    let existing = service.list_collections().await?;
    // Later entries win when the service holds duplicate names.
    let by_name: HashMap<&str, &CollectionId> = existing
        .iter()
        .map(|c| (c.name.as_str(), &c.id))
        .collect();

    match by_name.get(name.as_str()) {
        Some(&id) => {
            debug!(collection = %name, id = %id, target = %service.target(), "updating collection");
            let updated = service.update_collection(id, &name, &payload).await?;
            Ok(ApplyOutcome::Updated(updated))
        }
        None => {
            debug!(collection = %name, target = %service.target(), "creating collection");
            let created = service.create_collection(&name, &payload).await?;
            Ok(ApplyOutcome::Created(created))
        }
    }
}
