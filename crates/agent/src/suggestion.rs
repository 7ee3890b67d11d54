//! Decoding of free-text model output into a [`PlaylistSuggestion`].
//!
//! The model is asked for a bare JSON object but routinely wraps it in prose
//! or code fences. Everything between the first `{` and the last `}` is
//! decoded; missing fields default, wrong shapes fail.

use director_core::PlaylistSuggestion;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::SuggestionError;

/// Slice from the first `{` through the last `}`.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

pub fn parse_suggestion(raw: &str) -> Result<PlaylistSuggestion, SuggestionError> {
    let json = extract_json_object(raw).ok_or(SuggestionError::NoJsonObject)?;
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(SuggestionError::Shape("expected a JSON object".into()));
    }
    let wire: WireSuggestion =
        serde_json::from_value(value).map_err(|e| SuggestionError::Shape(e.to_string()))?;
    Ok(wire.into())
}

#[derive(Debug, Default, Deserialize)]
struct WireSuggestion {
    #[serde(default, deserialize_with = "null_as_default")]
    theme_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    collection_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    selected_movies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    selected_shows: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    selected_anime: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    reasoning: String,
    #[serde(default, deserialize_with = "lenient_minutes")]
    estimated_runtime: u32,
}

impl From<WireSuggestion> for PlaylistSuggestion {
    fn from(w: WireSuggestion) -> Self {
        PlaylistSuggestion {
            theme_name: w.theme_name.trim().to_string(),
            collection_name: w.collection_name.trim().to_string(),
            selected_movies: clean_titles(w.selected_movies),
            selected_shows: clean_titles(w.selected_shows),
            selected_anime: clean_titles(w.selected_anime),
            reasoning: w.reasoning,
            estimated_runtime_minutes: w.estimated_runtime,
        }
    }
}

fn clean_titles(titles: Vec<String>) -> Vec<String> {
    titles
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Minutes {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Runtime is advisory: accept integers, floats, and strings like "180 min".
fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = match Option::<Minutes>::deserialize(deserializer)? {
        None => 0,
        Some(Minutes::Int(n)) => n.clamp(0, i64::from(u32::MAX)) as u32,
        Some(Minutes::Float(f)) if f.is_finite() => f.round().clamp(0.0, f64::from(u32::MAX)) as u32,
        Some(Minutes::Float(_)) => 0,
        Some(Minutes::Text(s)) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().unwrap_or(0)
        }
    };
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "theme_name": "Sci-Fi Night",
        "collection_name": "Space Odyssey",
        "selected_movies": ["Interstellar (2014)", "Alien (1979)"],
        "selected_shows": ["The Expanse"],
        "selected_anime": [],
        "reasoning": "Space exploration.",
        "estimated_runtime": 420
    }"#;

    #[test]
    fn parses_bare_object() {
        let s = parse_suggestion(FULL).unwrap();
        assert_eq!(s.theme_name, "Sci-Fi Night");
        assert_eq!(s.collection_name, "Space Odyssey");
        assert_eq!(s.selected_movies, ["Interstellar (2014)", "Alien (1979)"]);
        assert_eq!(s.selected_shows, ["The Expanse"]);
        assert!(s.selected_anime.is_empty());
        assert_eq!(s.estimated_runtime_minutes, 420);
    }

    #[test]
    fn surrounding_text_is_ignored() {
        let wrapped = format!("Sure! Here is your playlist:\n```json\n{FULL}\n```\nEnjoy!");
        assert_eq!(parse_suggestion(&wrapped).unwrap(), parse_suggestion(FULL).unwrap());
    }

    #[test]
    fn missing_fields_default() {
        let s = parse_suggestion(r#"{"collection_name":"Action Night","selected_movies":["Mad Max (1980)"]}"#)
            .unwrap();
        assert_eq!(s.theme_name, "");
        assert_eq!(s.collection_name, "Action Night");
        assert_eq!(s.selected_movies, ["Mad Max (1980)"]);
        assert!(s.selected_shows.is_empty());
        assert_eq!(s.reasoning, "");
        assert_eq!(s.estimated_runtime_minutes, 0);

        let empty = parse_suggestion("{}").unwrap();
        assert_eq!(empty, PlaylistSuggestion::default());
    }

    #[test]
    fn nulls_and_odd_runtimes_are_tolerated() {
        let s = parse_suggestion(
            r#"{"selected_shows": null, "reasoning": null, "estimated_runtime": "240 minutes"}"#,
        )
        .unwrap();
        assert!(s.selected_shows.is_empty());
        assert_eq!(s.estimated_runtime_minutes, 240);

        let s = parse_suggestion(r#"{"estimated_runtime": 179.6}"#).unwrap();
        assert_eq!(s.estimated_runtime_minutes, 180);

        let s = parse_suggestion(r#"{"estimated_runtime": -5}"#).unwrap();
        assert_eq!(s.estimated_runtime_minutes, 0);
    }

    #[test]
    fn blank_titles_are_dropped() {
        let s = parse_suggestion(r#"{"selected_anime": ["  Cowboy Bebop ", "", "   "]}"#).unwrap();
        assert_eq!(s.selected_anime, ["Cowboy Bebop"]);
    }

    #[test]
    fn no_braces_is_no_suggestion() {
        assert!(matches!(
            parse_suggestion("I could not find anything."),
            Err(SuggestionError::NoJsonObject)
        ));
        assert!(matches!(
            parse_suggestion("} reversed {"),
            Err(SuggestionError::NoJsonObject)
        ));
        assert!(matches!(parse_suggestion(""), Err(SuggestionError::NoJsonObject)));
    }

    #[test]
    fn malformed_json_fails() {
        assert!(matches!(
            parse_suggestion(r#"{"collection_name": "Oops",}"#),
            Err(SuggestionError::Malformed(_))
        ));
        assert!(matches!(
            parse_suggestion(r#"{"a": 1} and then {"b": 2}"#),
            Err(SuggestionError::Malformed(_))
        ));
    }

    #[test]
    fn wrong_field_types_fail() {
        assert!(matches!(
            parse_suggestion(r#"{"selected_movies": "Alien (1979)"}"#),
            Err(SuggestionError::Shape(_))
        ));
        assert!(matches!(
            parse_suggestion(r#"{"selected_movies": [1, 2]}"#),
            Err(SuggestionError::Shape(_))
        ));
        assert!(matches!(
            parse_suggestion(r#"{"collection_name": {"text": "x"}}"#),
            Err(SuggestionError::Shape(_))
        ));
    }

    #[test]
    fn extract_slices_outermost_braces() {
        assert_eq!(extract_json_object(r#"x {"a": {"b": 1}} y"#), Some(r#"{"a": {"b": 1}}"#));
        assert_eq!(extract_json_object("{"), None);
        assert_eq!(extract_json_object("}{"), None);
    }
}
