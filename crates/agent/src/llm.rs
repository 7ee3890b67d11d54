use crate::ModelError;
use crate::prompt::Prompt;

/// A chat-completion endpoint: submit a prompt, receive text.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    async fn complete(&self, prompt: &Prompt) -> Result<String, ModelError>;
}
