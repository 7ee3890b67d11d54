use director_core::MediaItem;

use crate::CatalogError;

/// A catalog source that can list every item it manages.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch and normalize the full item list.
    async fn fetch_items(&self) -> Result<Vec<MediaItem>, CatalogError>;

    /// Verify the provider is reachable and accepts the API key.
    async fn health_check(&self) -> Result<(), CatalogError>;
}
