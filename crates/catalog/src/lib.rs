pub mod arr;
pub mod provider;
pub mod radarr;
pub mod sonarr;
pub mod store;
pub mod summary;

use thiserror::Error;

pub use provider::CatalogProvider;
pub use radarr::RadarrClient;
pub use sonarr::SonarrClient;
pub use store::load_catalog;
pub use summary::{GenreStats, SummaryOptions, genre_stats, summarize};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{provider} rejected the API key")]
    Unauthorized { provider: &'static str },
    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("provider error: {0}")]
    Provider(String),
    #[error("http client error: {0}")]
    Client(String),
}
