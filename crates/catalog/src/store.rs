use director_core::Catalog;
use tracing::{info, warn};

use crate::CatalogError;
use crate::provider::CatalogProvider;

/// Build the run's catalog from every provider, in order.
///
/// The first provider failure aborts the load: a run cannot proceed on a
/// partial library.
pub async fn load_catalog(providers: &[&dyn CatalogProvider]) -> Result<Catalog, CatalogError> {
    let mut items = Vec::new();
    for provider in providers {
        match provider.fetch_items().await {
            Ok(fetched) => {
                info!(provider = provider.name(), count = fetched.len(), "fetched catalog items");
                items.extend(fetched);
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "catalog fetch failed");
                return Err(e);
            }
        }
    }

    let catalog = Catalog::from_items(items);
    info!(
        total = catalog.len(),
        movies = catalog.movies.len(),
        shows = catalog.shows.len(),
        anime = catalog.anime.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use director_core::{MediaItem, Movie};

    use super::*;

    struct StaticProvider(Vec<MediaItem>);

    #[async_trait::async_trait]
    impl CatalogProvider for StaticProvider {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch_items(&self) -> Result<Vec<MediaItem>, CatalogError> {
            Ok(self.0.clone())
        }

        async fn health_check(&self) -> Result<(), CatalogError> {
            Ok(())
        }
    }

    struct DownProvider;

    #[async_trait::async_trait]
    impl CatalogProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        async fn fetch_items(&self) -> Result<Vec<MediaItem>, CatalogError> {
            Err(CatalogError::Network("connection refused".into()))
        }

        async fn health_check(&self) -> Result<(), CatalogError> {
            Err(CatalogError::Network("connection refused".into()))
        }
    }

    fn movie(title: &str) -> MediaItem {
        MediaItem::Movie(Movie {
            title: title.into(),
            year: Some(1999),
            genres: vec![],
            rating: None,
            runtime_minutes: 100,
        })
    }

    #[tokio::test]
    async fn merges_providers_in_order() {
        let a = StaticProvider(vec![movie("Alien")]);
        let b = StaticProvider(vec![movie("Brazil")]);
        let catalog = load_catalog(&[&a, &b]).await.unwrap();
        let titles: Vec<_> = catalog.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Alien", "Brazil"]);
    }

    #[tokio::test]
    async fn provider_failure_is_fatal() {
        let a = StaticProvider(vec![movie("Alien")]);
        let err = load_catalog(&[&a, &DownProvider]).await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }
}
