pub mod collections;
pub mod director;
pub mod llm;
pub mod ollama;
pub mod prompt;
pub mod reconcile;
pub mod suggestion;

use thiserror::Error;

pub use collections::{CollectionService, ErsatztvClient, TunarrClient};
pub use director::{Director, RunMode, ThemeResult};
pub use llm::ChatModel;
pub use ollama::OllamaClient;
pub use prompt::{Prompt, build_prompt};
pub use reconcile::{ApplyOutcome, reconcile};
pub use suggestion::parse_suggestion;

/// Failure talking to the language model endpoint.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("network error: {0}")]
    Network(String),
    #[error("model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unreadable model response: {0}")]
    Decode(String),
    #[error("model {0} is not installed")]
    ModelNotFound(String),
    #[error("http client error: {0}")]
    Client(String),
}

/// The model answered, but not with a usable suggestion.
#[derive(Error, Debug)]
pub enum SuggestionError {
    #[error("no JSON object in model response")]
    NoJsonObject,
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Why no suggestion was produced for a theme.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("model invocation failed: {0}")]
    Model(#[from] ModelError),
    #[error("could not parse suggestion: {0}")]
    Parse(#[from] SuggestionError),
}

/// Failure against the remote collection service.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
    #[error("{service}: unreadable response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
    #[error("{service} cannot use collection id {id}")]
    InvalidId { service: &'static str, id: String },
    #[error("{service} does not accept a {payload} payload")]
    PayloadMismatch {
        service: &'static str,
        payload: &'static str,
    },
    #[error("http client error: {0}")]
    Client(String),
}
