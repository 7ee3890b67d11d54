//! Sonarr series catalog client.
//!
//! Uses the Sonarr v3 API: `GET /api/v3/series`. Anime is split out from
//! regular shows by series type or genre.

use director_core::{MediaItem, Series};
use serde::Deserialize;

use crate::CatalogError;
use crate::arr::{ArrClient, normalize_rating, normalize_year};
use crate::provider::CatalogProvider;

pub struct SonarrClient {
    inner: ArrClient,
}

impl SonarrClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            inner: ArrClient::new("sonarr", base_url, api_key)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SonarrSeries {
    title: String,
    year: Option<i32>,
    genres: Option<Vec<String>>,
    series_type: Option<String>,
    ratings: Option<SonarrRating>,
    statistics: Option<SonarrStatistics>,
}

#[derive(Debug, Deserialize)]
struct SonarrRating {
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SonarrStatistics {
    episode_count: Option<u32>,
}

fn parse_series(data: Vec<SonarrSeries>) -> Vec<MediaItem> {
    data.into_iter()
        .map(|s| {
            let anime = is_anime(s.series_type.as_deref(), s.genres.as_deref().unwrap_or(&[]));
            let series = Series {
                title: s.title,
                year: normalize_year(s.year),
                genres: s.genres.unwrap_or_default(),
                rating: normalize_rating(s.ratings.and_then(|r| r.value)),
                episode_count: s.statistics.and_then(|st| st.episode_count).unwrap_or(0),
            };
            if anime {
                MediaItem::Anime(series)
            } else {
                MediaItem::Show(series)
            }
        })
        .collect()
}

/// A series is anime when Sonarr says so, when it carries an "Anime" genre,
/// or when it is animation of Japanese origin.
pub fn is_anime(series_type: Option<&str>, genres: &[String]) -> bool {
    if series_type.is_some_and(|t| t.eq_ignore_ascii_case("anime")) {
        return true;
    }

    let lower: Vec<String> = genres.iter().map(|g| g.to_lowercase()).collect();
    if lower.iter().any(|g| g == "anime") {
        return true;
    }

    lower.iter().any(|g| g == "animation") && lower.iter().any(|g| g.contains("japan"))
}

#[async_trait::async_trait]
impl CatalogProvider for SonarrClient {
    fn name(&self) -> &str {
        self.inner.provider()
    }

    async fn fetch_items(&self) -> Result<Vec<MediaItem>, CatalogError> {
        let data: Vec<SonarrSeries> = self.inner.get_json("/api/v3/series").await?;
        Ok(parse_series(data))
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        self.inner.system_status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_series_splits_anime() {
        let json = serde_json::json!([
            {
                "title": "Breaking Bad",
                "year": 2008,
                "seriesType": "standard",
                "genres": ["Drama", "Crime"],
                "ratings": { "value": 9.5, "votes": 1000 },
                "statistics": { "seasonCount": 5, "episodeCount": 62 }
            },
            {
                "title": "Cowboy Bebop",
                "year": 1998,
                "seriesType": "anime",
                "genres": ["Animation", "Action"],
                "ratings": { "value": 8.9 },
                "statistics": { "episodeCount": 26 }
            },
            {
                "title": "Pilot Only",
                "year": 2024
            }
        ]);

        let data: Vec<SonarrSeries> = serde_json::from_value(json).unwrap();
        let items = parse_series(data);

        let MediaItem::Show(bb) = &items[0] else {
            panic!("expected show");
        };
        assert_eq!(bb.episode_count, 62);
        assert_eq!(bb.rating, Some(9.5));

        let MediaItem::Anime(bebop) = &items[1] else {
            panic!("expected anime");
        };
        assert_eq!(bebop.title, "Cowboy Bebop");
        assert_eq!(bebop.episode_count, 26);

        let MediaItem::Show(pilot) = &items[2] else {
            panic!("expected show");
        };
        assert_eq!(pilot.rating, None);
        assert_eq!(pilot.episode_count, 0);
    }

    #[test]
    fn anime_detection_rules() {
        assert!(is_anime(Some("Anime"), &[]));
        assert!(is_anime(Some("standard"), &genres(&["ANIME", "Drama"])));
        assert!(is_anime(None, &genres(&["Animation", "Japanese"])));
        assert!(!is_anime(None, &genres(&["Animation", "Comedy"])));
        assert!(!is_anime(Some("daily"), &genres(&["Talk Show"])));
    }
}
