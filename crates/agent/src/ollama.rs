//! Ollama chat client.
//!
//! Uses the Ollama REST API: `POST /api/chat` (non-streaming) and
//! `GET /api/tags`.

use std::time::Duration;

use director_core::config::OllamaConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ModelError;
use crate::llm::ChatModel;
use crate::prompt::Prompt;

/// Generation on a local model can take minutes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub struct OllamaClient {
    base_url: String,
    model: String,
    temperature: f64,
    num_ctx: u32,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f64,
    num_ctx: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// An installed model as listed by `/api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub name: String,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ModelError::Client(e.to_string()))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            num_ctx: config.num_ctx,
            client,
        })
    }

    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;
        let tags: TagsResponse = decode(resp).await?;
        Ok(tags.models)
    }

    /// The endpoint is reachable and the configured model is installed.
    pub async fn health_check(&self) -> Result<(), ModelError> {
        let models = self.list_models().await?;
        if models.iter().any(|m| m.name == self.model) {
            Ok(())
        } else {
            Err(ModelError::ModelNotFound(self.model.clone()))
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ModelError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ModelError::Status {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        });
    }
    resp.json()
        .await
        .map_err(|e| ModelError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl ChatModel for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, ModelError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
                num_ctx: self.num_ctx,
            },
        };

        let url = format!("{}/api/chat", self.base_url);
        debug!(url = %url, model = %self.model, prompt_chars = prompt.user.len(), "model request");

        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        let chat: ChatResponse = decode(resp).await?;
        Ok(chat.message.content)
    }
}
