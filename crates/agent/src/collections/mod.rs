//! Remote collection services and the selection payloads they accept.
//!
//! Two targets are supported: ErsatzTV smart collections, selected by a
//! search query, and Tunarr custom shows, which hold an explicit program list.

pub mod ersatztv;
mod http;
pub mod tunarr;

use director_core::{CollectionTarget, PlaylistSuggestion};
use serde::Serialize;

use crate::CollectionError;

pub use ersatztv::ErsatztvClient;
pub use tunarr::{CustomShowProgram, TunarrClient};

/// Remote-side limit on collection names, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Provider-assigned collection identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CollectionId(pub String);

impl CollectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a remote collection holds, as reported by its service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteContent {
    Query(String),
    Programs {
        content_count: u64,
        total_duration_ms: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteCollection {
    pub id: CollectionId,
    pub name: String,
    pub content: RemoteContent,
}

/// Selection sent on create/update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPayload {
    Query(String),
    Programs(Vec<CustomShowProgram>),
}

impl SelectionPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Query(_) => "query",
            Self::Programs(_) => "program-list",
        }
    }

    /// Build the payload the target expects for `titles`.
    ///
    /// Tunarr custom shows are submitted with an empty program list; programs
    /// are attached through Tunarr itself.
    pub fn for_target(target: CollectionTarget, titles: &[String]) -> Self {
        match target {
            CollectionTarget::Ersatztv => Self::Query(build_query(titles)),
            CollectionTarget::Tunarr => Self::Programs(Vec::new()),
        }
    }
}

/// List, create, and update named collections on one remote service.
#[async_trait::async_trait]
pub trait CollectionService: Send + Sync {
    fn target(&self) -> CollectionTarget;

    async fn list_collections(&self) -> Result<Vec<RemoteCollection>, CollectionError>;

    async fn create_collection(
        &self,
        name: &str,
        payload: &SelectionPayload,
    ) -> Result<RemoteCollection, CollectionError>;

    async fn update_collection(
        &self,
        id: &CollectionId,
        name: &str,
        payload: &SelectionPayload,
    ) -> Result<RemoteCollection, CollectionError>;
}

/// Drop a movie's ` (Year)` suffix: everything from the first ` (` on.
pub fn strip_year_suffix(title: &str) -> &str {
    title.split_once(" (").map_or(title, |(head, _)| head)
}

/// Movies (year stripped), then shows, then anime, in model order.
pub fn flatten_titles(suggestion: &PlaylistSuggestion) -> Vec<String> {
    suggestion
        .selected_movies
        .iter()
        .map(|t| strip_year_suffix(t).to_string())
        .chain(suggestion.selected_shows.iter().cloned())
        .chain(suggestion.selected_anime.iter().cloned())
        .collect()
}

/// `title contains "..."` clauses joined with ` OR `; empty for no titles.
pub fn build_query(titles: &[String]) -> String {
    titles
        .iter()
        .map(|t| format!("title contains \"{}\"", escape_quoted(t)))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Backslashes first, so the quote escapes are not doubled.
fn escape_quoted(title: &str) -> String {
    title.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Truncate to [`MAX_NAME_LEN`] characters.
pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn strips_parenthesized_year() {
        assert_eq!(strip_year_suffix("Inception (2010)"), "Inception");
        assert_eq!(strip_year_suffix("Cowboy Bebop"), "Cowboy Bebop");
        assert_eq!(strip_year_suffix("Blade Runner (Final Cut) (1982)"), "Blade Runner");
        assert_eq!(strip_year_suffix("M*A*S*H(1970)"), "M*A*S*H(1970)");
    }

    #[test]
    fn flatten_keeps_category_order() {
        let suggestion = PlaylistSuggestion {
            selected_movies: titles(&["Alien (1979)", "Heat (1995)"]),
            selected_shows: titles(&["The Expanse (2015)"]),
            selected_anime: titles(&["Planetes"]),
            ..Default::default()
        };
        assert_eq!(
            flatten_titles(&suggestion),
            ["Alien", "Heat", "The Expanse (2015)", "Planetes"]
        );
    }

    #[test]
    fn query_escapes_quotes() {
        assert_eq!(
            build_query(&titles(&[r#"The "Great" Escape"#, "Heat"])),
            r#"title contains "The \"Great\" Escape" OR title contains "Heat""#
        );
        assert_eq!(build_query(&[]), "");
        assert_eq!(build_query(&titles(&["Heat"])), r#"title contains "Heat""#);
    }

    #[test]
    fn query_escapes_backslashes() {
        assert_eq!(
            build_query(&titles(&[r"Trailing\", r#"Mixed \"Quote\""#])),
            r#"title contains "Trailing\\" OR title contains "Mixed \\\"Quote\\\"""#
        );
    }

    #[test]
    fn truncates_to_fifty_characters() {
        let long = "A Very Long Collection Name For A Marathon Evening!";
        assert_eq!(truncate_name(&long.repeat(2)).chars().count(), 50);
        assert_eq!(truncate_name("Short"), "Short");

        let accented = "é".repeat(60);
        assert_eq!(truncate_name(&accented), "é".repeat(50));
    }

    #[test]
    fn payload_follows_target() {
        let t = titles(&["Heat"]);
        assert_eq!(
            SelectionPayload::for_target(CollectionTarget::Ersatztv, &t),
            SelectionPayload::Query(r#"title contains "Heat""#.into())
        );
        assert_eq!(
            SelectionPayload::for_target(CollectionTarget::Tunarr, &t),
            SelectionPayload::Programs(vec![])
        );
    }
}
