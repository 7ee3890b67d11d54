//! Prompt construction for playlist selection.
//!
//! The system message is fixed and carries the whole output contract; only
//! the user message varies per theme.

use director_catalog::GenreStats;
use director_core::ThemeSpec;

/// Genres listed in the per-theme message.
pub const TOP_GENRES: usize = 10;

pub const SYSTEM_PROMPT: &str = r#"You are a media curator AI that creates themed playlists for a personal TV channel.

Your task is to select media titles that fit a specific theme for an evening viewing session.
You have access to a media library with movies, TV shows, and anime, with metadata including genres, ratings, and runtimes.

When creating a playlist:
1. Select titles that strongly match the theme based on genres and descriptions
2. Prioritize highly-rated content (7.0+ ratings)
3. Consider variety: mix movies and TV shows/anime if appropriate
4. Aim for the target duration by considering runtime
5. Prefer well-known, quality titles
6. Create a cohesive viewing experience

You MUST respond with valid JSON matching this exact schema:
{
    "theme_name": "the theme name",
    "collection_name": "Short collection name (max 50 chars)",
    "selected_movies": ["Movie Title 1 (Year)", "Movie Title 2 (Year)"],
    "selected_shows": ["Show Title 1", "Show Title 2"],
    "selected_anime": ["Anime Title 1", "Anime Title 2"],
    "reasoning": "Brief explanation of your selections and why they fit the theme",
    "estimated_runtime": 180
}

Field types: theme_name, collection_name and reasoning are strings; the three selected_* fields are arrays of strings; estimated_runtime is an integer number of minutes.

IMPORTANT:
- Only include titles that EXACTLY match titles in the provided media library
- Include the year in parentheses for movies
- Leave arrays empty if no matching content for that category
- Ensure estimated_runtime is calculated from the selected content
- Collection name MUST be 50 characters or less
- Respond with exactly one JSON object and nothing else"#;

/// A system + user message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn build_prompt(theme: &ThemeSpec, catalog_summary: &str, stats: &GenreStats) -> Prompt {
    let keywords = if theme.keywords.is_empty() {
        "none specified".to_string()
    } else {
        theme.keywords.join(", ")
    };

    let user = format!(
        "Create a playlist for the theme: \"{name}\"\n\
         Theme description: {description}\n\
         Theme keywords: {keywords}\n\
         Target duration: {duration} minutes\n\
         \n\
         Available genres in library: {genres}\n\
         \n\
         {catalog_summary}\n\
         \n\
         Select appropriate titles from the library above that best match the theme.\n\
         Calculate runtime based on movie runtimes and estimated episode lengths.\n\
         Respond with valid JSON only.",
        name = theme.name,
        description = theme.description,
        duration = theme.duration_minutes,
        genres = stats.format_top(TOP_GENRES),
    );

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
