//! Console rendering for the CLI commands.

use director_agent::ThemeResult;
use director_catalog::GenreStats;
use director_catalog::summary::format_rating;
use director_core::{Catalog, PlaylistSuggestion, Series, ThemeSpec};

const TOP_MOVIES: usize = 15;
const TOP_SERIES: usize = 10;
const TOP_GENRES: usize = 10;
const LISTED_GENRES: usize = 3;
const LISTED_KEYWORDS: usize = 3;

pub fn suggestion(s: &PlaylistSuggestion) -> String {
    let mut out = format!(
        "Collection: {}\nEstimated runtime: {} min\n",
        s.collection_name, s.estimated_runtime_minutes
    );
    for (label, titles) in [
        ("Movies", &s.selected_movies),
        ("Shows", &s.selected_shows),
        ("Anime", &s.selected_anime),
    ] {
        if titles.is_empty() {
            continue;
        }
        out.push_str(&format!("{label} ({}):\n", titles.len()));
        for title in titles {
            out.push_str(&format!("  - {title}\n"));
        }
    }
    if !s.reasoning.is_empty() {
        out.push_str(&format!("Reasoning: {}\n", s.reasoning));
    }
    out
}

/// One status line per theme.
pub fn result_line(result: &ThemeResult, preview: bool) -> String {
    let status = match (&result.suggestion, preview) {
        (Some(_), true) => "PREVIEW",
        _ if result.success => "SUCCESS",
        _ => "FAILED",
    };
    format!("[{status}] {}", result.theme)
}

pub fn theme(t: &ThemeSpec) -> String {
    let mut line = format!("{} ({} min): {}", t.name, t.duration_minutes, t.description);
    if !t.keywords.is_empty() {
        let shown: Vec<&str> = t
            .keywords
            .iter()
            .take(LISTED_KEYWORDS)
            .map(String::as_str)
            .collect();
        line.push_str(&format!(" [{}]", shown.join(", ")));
    }
    line
}

/// Highest rated first; unrated items sort last.
fn by_rating<T>(items: &[T], rating: impl Fn(&T) -> Option<f64>, n: usize) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| {
        let (a, b) = (rating(a).unwrap_or(f64::MIN), rating(b).unwrap_or(f64::MIN));
        b.total_cmp(&a)
    });
    sorted.truncate(n);
    sorted
}

fn genre_column(genres: &[String], hide_anime: bool) -> String {
    genres
        .iter()
        .filter(|g| !(hide_anime && g.eq_ignore_ascii_case("anime")))
        .take(LISTED_GENRES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn series_rows(out: &mut String, header: &str, series: &[Series], hide_anime: bool) {
    out.push_str(&format!("\n{header} ({} total):\n", series.len()));
    for s in by_rating(series, |s| s.rating, TOP_SERIES) {
        out.push_str(&format!(
            "  {:>4}  {} [{}] {} episodes\n",
            format_rating(s.rating),
            s.title,
            genre_column(&s.genres, hide_anime),
            s.episode_count
        ));
    }
}

/// The `scan` report.
pub fn scan_report(catalog: &Catalog, stats: &GenreStats) -> String {
    let mut out = format!(
        "Library: {} movies, {} shows, {} anime\n",
        catalog.movies.len(),
        catalog.shows.len(),
        catalog.anime.len()
    );
    if catalog.is_empty() {
        return out;
    }

    out.push_str(&format!("\nTop movies ({} total):\n", catalog.movies.len()));
    for m in by_rating(&catalog.movies, |m| m.rating, TOP_MOVIES) {
        let year = m.year.map(|y| format!(" ({y})")).unwrap_or_default();
        out.push_str(&format!(
            "  {:>4}  {}{year} [{}] {} min\n",
            format_rating(m.rating),
            m.title,
            genre_column(&m.genres, false),
            m.runtime_minutes
        ));
    }
    series_rows(&mut out, "Top shows", &catalog.shows, false);
    series_rows(&mut out, "Top anime", &catalog.anime, true);

    out.push_str("\nTop genres:\n");
    for (genre, count) in stats.top(TOP_GENRES) {
        out.push_str(&format!("  {genre}: {count}\n"));
    }
    out
}
