//! Radarr movie catalog client.
//!
//! Uses the Radarr v3 API: `GET /api/v3/movie`.

use director_core::{MediaItem, Movie};
use serde::Deserialize;

use crate::CatalogError;
use crate::arr::{ArrClient, normalize_rating, normalize_year};
use crate::provider::CatalogProvider;

pub struct RadarrClient {
    inner: ArrClient,
}

impl RadarrClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            inner: ArrClient::new("radarr", base_url, api_key)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RadarrMovie {
    title: String,
    year: Option<i32>,
    runtime: Option<u32>,
    genres: Option<Vec<String>>,
    ratings: Option<RadarrRatings>,
}

#[derive(Debug, Deserialize)]
struct RadarrRatings {
    imdb: Option<RatingValue>,
}

#[derive(Debug, Deserialize)]
struct RatingValue {
    value: Option<f64>,
}

impl From<RadarrMovie> for Movie {
    fn from(m: RadarrMovie) -> Self {
        Movie {
            title: m.title,
            year: normalize_year(m.year),
            genres: m.genres.unwrap_or_default(),
            rating: normalize_rating(m.ratings.and_then(|r| r.imdb).and_then(|r| r.value)),
            runtime_minutes: m.runtime.unwrap_or(0),
        }
    }
}

fn parse_movies(data: Vec<RadarrMovie>) -> Vec<MediaItem> {
    data.into_iter()
        .map(|m| MediaItem::Movie(m.into()))
        .collect()
}

#[async_trait::async_trait]
impl CatalogProvider for RadarrClient {
    fn name(&self) -> &str {
        self.inner.provider()
    }

    async fn fetch_items(&self) -> Result<Vec<MediaItem>, CatalogError> {
        let data: Vec<RadarrMovie> = self.inner.get_json("/api/v3/movie").await?;
        Ok(parse_movies(data))
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        self.inner.system_status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_movie_list_from_json() {
        let json = serde_json::json!([
            {
                "id": 1,
                "title": "Inception",
                "year": 2010,
                "runtime": 148,
                "genres": ["Action", "Science Fiction", "Adventure"],
                "hasFile": true,
                "ratings": {
                    "imdb": { "value": 8.8, "votes": 2400000 },
                    "tmdb": { "value": 8.4, "votes": 35000 }
                }
            },
            {
                "id": 2,
                "title": "Untitled Project",
                "year": 0,
                "genres": null,
                "ratings": { "tmdb": { "value": 0 } }
            }
        ]);

        let data: Vec<RadarrMovie> = serde_json::from_value(json).unwrap();
        let items = parse_movies(data);
        assert_eq!(items.len(), 2);

        let MediaItem::Movie(inception) = &items[0] else {
            panic!("expected movie");
        };
        assert_eq!(inception.title, "Inception");
        assert_eq!(inception.year, Some(2010));
        assert_eq!(inception.runtime_minutes, 148);
        assert_eq!(inception.genres.len(), 3);
        assert!((inception.rating.unwrap() - 8.8).abs() < 0.01);

        let MediaItem::Movie(untitled) = &items[1] else {
            panic!("expected movie");
        };
        assert_eq!(untitled.year, None);
        assert_eq!(untitled.rating, None);
        assert_eq!(untitled.runtime_minutes, 0);
        assert!(untitled.genres.is_empty());
    }
}
