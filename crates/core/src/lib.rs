pub mod config;
pub mod error;
pub mod types;

pub use config::DirectorConfig;
pub use error::ConfigError;
pub use types::{
    Catalog, CollectionTarget, MediaItem, Movie, PlaylistSuggestion, Series, ThemeSpec,
};
