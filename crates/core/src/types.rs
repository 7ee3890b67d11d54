use serde::{Deserialize, Serialize};

/// Where generated collections are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionTarget {
    /// Smart collections driven by a search query.
    #[default]
    Ersatztv,
    /// Custom shows holding an explicit program list.
    Tunarr,
}

impl CollectionTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ersatztv => "ersatztv",
            Self::Tunarr => "tunarr",
        }
    }
}

impl std::fmt::Display for CollectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CollectionTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ersatztv" => Ok(Self::Ersatztv),
            "tunarr" => Ok(Self::Tunarr),
            other => Err(format!("unknown collection target: {other}")),
        }
    }
}

/// A movie as reported by the movie catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    /// IMDB rating on a 0-10 scale.
    pub rating: Option<f64>,
    pub runtime_minutes: u32,
}

/// A TV show or anime series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub title: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub episode_count: u32,
}

/// A normalized catalog record from any provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaItem {
    Movie(Movie),
    Show(Series),
    Anime(Series),
}

/// In-memory media library for one run.
///
/// Built once from the providers and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub movies: Vec<Movie>,
    pub shows: Vec<Series>,
    pub anime: Vec<Series>,
}

impl Catalog {
    /// Bucket provider items by category, keeping their relative order.
    pub fn from_items(items: impl IntoIterator<Item = MediaItem>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            match item {
                MediaItem::Movie(m) => catalog.movies.push(m),
                MediaItem::Show(s) => catalog.shows.push(s),
                MediaItem::Anime(s) => catalog.anime.push(s),
            }
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.shows.len() + self.anime.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Genre lists of every item: movies, then shows, then anime.
    pub fn genre_lists(&self) -> impl Iterator<Item = &[String]> {
        self.movies
            .iter()
            .map(|m| m.genres.as_slice())
            .chain(self.shows.iter().map(|s| s.genres.as_slice()))
            .chain(self.anime.iter().map(|s| s.genres.as_slice()))
    }
}

fn default_duration() -> u32 {
    180
}

/// A configured viewing theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "duration", default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Validated model output for one theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistSuggestion {
    pub theme_name: String,
    pub collection_name: String,
    pub selected_movies: Vec<String>,
    pub selected_shows: Vec<String>,
    pub selected_anime: Vec<String>,
    pub reasoning: String,
    #[serde(rename = "estimated_runtime")]
    pub estimated_runtime_minutes: u32,
}

impl PlaylistSuggestion {
    pub fn total_selections(&self) -> usize {
        self.selected_movies.len() + self.selected_shows.len() + self.selected_anime.len()
    }
}
