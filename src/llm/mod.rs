//! Language model abstraction.
//!
//! The composers depend on `LanguageModel`, not on a concrete provider, so
//! the two pipeline passes can run against different models and tests can
//! substitute deterministic fakes.

use crate::config::Credentials;
use crate::error::{PratError, Result};
use crate::openai::create_openrouter_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// A single-completion language model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a prompt. The user message is optional; the refinement pass
    /// sends only a system message, matching how the pipeline uses its
    /// second model.
    async fn complete(&self, system: &str, user: Option<&str>) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// A chat-completion model routed through OpenRouter.
pub struct ChatModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl ChatModel {
    /// Create a chat model with the given OpenRouter model id.
    pub fn new(credentials: &Credentials, model: &str, temperature: f32) -> Self {
        Self {
            client: create_openrouter_client(&credentials.openrouter_api_key),
            model: model.to_string(),
            temperature,
        }
    }
}

#[async_trait]
impl LanguageModel for ChatModel {
    #[instrument(skip(self, system, user), fields(model = %self.model))]
    async fn complete(&self, system: &str, user: Option<&str>) -> Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system.to_string())
                .build()
                .map_err(|e| PratError::Llm(e.to_string()))?
                .into(),
        ];

        if let Some(user) = user {
            messages.push(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user.to_string())
                    .build()
                    .map_err(|e| PratError::Llm(e.to_string()))?
                    .into(),
            );
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| PratError::Llm(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| PratError::OpenAI(format!("Chat completion failed: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| PratError::Llm("Empty response from model".to_string()))?
            .clone();

        debug!("Received {} characters from {}", answer.len(), self.model);
        Ok(answer)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_model_construction() {
        let creds = Credentials::new("sk-test", "or-test", "fal-test");
        let model = ChatModel::new(&creds, "deepseek/deepseek-chat", 0.7);
        assert_eq!(model.model_name(), "deepseek/deepseek-chat");
    }
}
