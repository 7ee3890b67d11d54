//! Prompt-sized rendering of the catalog.
//!
//! Every item always gets a line; when the text exceeds the budget the
//! per-item genre list shrinks first, down to none.

use std::collections::HashMap;

use director_core::config::SummaryConfig;
use director_core::{Catalog, Movie, Series};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Soft character budget for the rendered text.
    pub max_chars: usize,
    /// Genres shown per item before degradation.
    pub max_genres: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryConfig::default().into()
    }
}

impl From<SummaryConfig> for SummaryOptions {
    fn from(c: SummaryConfig) -> Self {
        Self {
            max_chars: c.max_chars,
            max_genres: c.max_genres,
        }
    }
}

/// Render the catalog for prompt inclusion.
pub fn summarize(catalog: &Catalog, options: &SummaryOptions) -> String {
    // Limits above the longest genre list all render the same text.
    let longest = catalog.genre_lists().map(<[String]>::len).max().unwrap_or(0);
    let mut genres = options.max_genres.min(longest);
    loop {
        let text = render(catalog, genres);
        let len = text.chars().count();
        if len <= options.max_chars {
            return text;
        }
        if genres == 0 {
            debug!(
                chars = len,
                budget = options.max_chars,
                "catalog summary exceeds budget at minimum detail"
            );
            return text;
        }
        debug!(chars = len, genres, "catalog summary over budget, dropping a genre per item");
        genres -= 1;
    }
}

fn render(catalog: &Catalog, genres: usize) -> String {
    let mut sections = Vec::new();

    if !catalog.movies.is_empty() {
        let lines: Vec<String> = catalog.movies.iter().map(|m| movie_line(m, genres)).collect();
        sections.push(section("MOVIES", &lines));
    }
    if !catalog.shows.is_empty() {
        let lines: Vec<String> = catalog
            .shows
            .iter()
            .map(|s| series_line(s, genres, false))
            .collect();
        sections.push(section("TV SHOWS", &lines));
    }
    if !catalog.anime.is_empty() {
        let lines: Vec<String> = catalog
            .anime
            .iter()
            .map(|s| series_line(s, genres, true))
            .collect();
        sections.push(section("ANIME", &lines));
    }

    sections.join("\n\n")
}

fn section(header: &str, lines: &[String]) -> String {
    format!("{header} ({}):\n{}", lines.len(), lines.join("\n"))
}

fn movie_line(movie: &Movie, genres: usize) -> String {
    let mut line = format!("- {}{}", movie.title, year_suffix(movie.year));
    push_genres(&mut line, movie.genres.iter(), genres);
    line.push_str(&format!(
        " | {} | {} min",
        format_rating(movie.rating),
        movie.runtime_minutes
    ));
    line
}

fn series_line(series: &Series, genres: usize, anime: bool) -> String {
    let mut line = format!("- {}{}", series.title, year_suffix(series.year));
    // "Anime" is implied by the section.
    let shown = series
        .genres
        .iter()
        .filter(|g| !(anime && g.eq_ignore_ascii_case("anime")));
    push_genres(&mut line, shown, genres);
    line.push_str(&format!(
        " | {} | {} episodes",
        format_rating(series.rating),
        series.episode_count
    ));
    line
}

fn push_genres<'a>(line: &mut String, genres: impl Iterator<Item = &'a String>, limit: usize) {
    if limit == 0 {
        return;
    }
    let shown: Vec<&str> = genres.take(limit).map(String::as_str).collect();
    line.push_str(" | ");
    if shown.is_empty() {
        line.push('-');
    } else {
        line.push_str(&shown.join(", "));
    }
}

fn year_suffix(year: Option<i32>) -> String {
    year.map(|y| format!(" ({y})")).unwrap_or_default()
}

/// One decimal place, or `N/A`.
pub fn format_rating(rating: Option<f64>) -> String {
    rating
        .map(|r| format!("{r:.1}"))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Genre frequencies, most common first; ties keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreStats(Vec<(String, usize)>);

impl GenreStats {
    pub fn entries(&self) -> &[(String, usize)] {
        &self.0
    }

    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.0[..n.min(self.0.len())]
    }

    /// `Genre: count` pairs of the top `n`, comma-joined.
    pub fn format_top(&self, n: usize) -> String {
        self.top(n)
            .iter()
            .map(|(genre, count)| format!("{genre}: {count}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, c)| c).sum()
    }
}

/// Count every (item, genre) pair in the catalog.
pub fn genre_stats(catalog: &Catalog) -> GenreStats {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for genres in catalog.genre_lists() {
        for genre in genres {
            match index.get(genre.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(genre.as_str(), counts.len());
                    counts.push((genre.clone(), 1));
                }
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    GenreStats(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, year: Option<i32>, genres: &[&str], rating: Option<f64>) -> Movie {
        Movie {
            title: title.into(),
            year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating,
            runtime_minutes: 120,
        }
    }

    fn series(title: &str, genres: &[&str], episodes: u32) -> Series {
        Series {
            title: title.into(),
            year: Some(2001),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating: Some(8.3),
            episode_count: episodes,
        }
    }

    fn sample() -> Catalog {
        Catalog {
            movies: vec![
                movie("Mad Max", Some(1980), &["Action", "Adventure", "Thriller"], Some(8.1)),
                movie("Heat", None, &["Crime", "Action"], None),
            ],
            shows: vec![series("The Wire", &["Crime", "Drama"], 60)],
            anime: vec![series("Cowboy Bebop", &["Anime", "Action", "Sci-Fi"], 26)],
        }
    }

    #[test]
    fn empty_catalog_renders_nothing() {
        assert_eq!(summarize(&Catalog::default(), &SummaryOptions::default()), "");
        assert!(genre_stats(&Catalog::default()).entries().is_empty());
    }

    #[test]
    fn renders_grouped_lines() {
        let text = summarize(&sample(), &SummaryOptions::default());
        let expected = "\
MOVIES (2):
- Mad Max (1980) | Action, Adventure | 8.1 | 120 min
- Heat | Crime, Action | N/A | 120 min

TV SHOWS (1):
- The Wire (2001) | Crime, Drama | 8.3 | 60 episodes

ANIME (1):
- Cowboy Bebop (2001) | Action, Sci-Fi | 8.3 | 26 episodes";
        assert_eq!(text, expected);
    }

    #[test]
    fn over_budget_drops_genres_but_keeps_every_item() {
        let catalog = sample();
        let full = summarize(&catalog, &SummaryOptions::default());
        let tight = SummaryOptions {
            max_chars: full.chars().count() - 1,
            max_genres: 2,
        };
        let text = summarize(&catalog, &tight);
        assert!(text.contains("- Mad Max (1980) | Action | 8.1"));
        assert!(!text.contains("Adventure"));

        let minimal = summarize(
            &catalog,
            &SummaryOptions {
                max_chars: 10,
                max_genres: 2,
            },
        );
        for title in ["Mad Max", "Heat", "The Wire", "Cowboy Bebop"] {
            assert!(minimal.contains(title), "{title} missing from summary");
        }
        assert!(minimal.contains("- Heat | N/A | 120 min"));
    }

    #[test]
    fn huge_genre_limit_is_capped_by_the_catalog() {
        let movies: Vec<Movie> = (0..200)
            .map(|i| movie(&format!("Movie {i}"), Some(2000), &["Drama", "Crime"], Some(7.0)))
            .collect();
        let catalog = Catalog {
            movies,
            ..Default::default()
        };

        let huge = summarize(
            &catalog,
            &SummaryOptions {
                max_chars: 100,
                max_genres: usize::MAX,
            },
        );
        let bare = summarize(
            &catalog,
            &SummaryOptions {
                max_chars: 100,
                max_genres: 0,
            },
        );
        assert_eq!(huge, bare);
        assert!(huge.contains("- Movie 199 (2000) | 7.0 | 120 min"));

        let roomy = SummaryOptions {
            max_chars: usize::MAX,
            max_genres: usize::MAX,
        };
        assert!(summarize(&catalog, &roomy).contains("- Movie 0 (2000) | Drama, Crime | 7.0"));
    }

    #[test]
    fn genre_stats_sorted_with_first_seen_tiebreak() {
        let stats = genre_stats(&sample());
        let names: Vec<&str> = stats.entries().iter().map(|(g, _)| g.as_str()).collect();
        // Action 3, Crime 2, then the singles in the order they appeared.
        assert_eq!(
            names,
            ["Action", "Crime", "Adventure", "Thriller", "Drama", "Anime", "Sci-Fi"]
        );
        assert_eq!(stats.entries()[0].1, 3);
        assert_eq!(stats.entries()[1].1, 2);
    }

    #[test]
    fn genre_stats_count_every_pair() {
        let catalog = sample();
        let pairs: usize = catalog.genre_lists().map(|g| g.len()).sum();
        assert_eq!(genre_stats(&catalog).total(), pairs);
    }

    #[test]
    fn format_top_limits_entries() {
        let stats = genre_stats(&sample());
        assert_eq!(stats.format_top(2), "Action: 3, Crime: 2");
        assert_eq!(stats.top(100).len(), 7);
    }
}
