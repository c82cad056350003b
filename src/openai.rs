//! OpenAI-compatible client configuration with sensible defaults.
//!
//! Two clients are used: one against api.openai.com for embeddings, and one
//! against OpenRouter for chat completions (the draft and refine models are
//! both routed through it).

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// OpenRouter's OpenAI-compatible API base.
pub const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Default timeout for API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an embeddings client for api.openai.com.
pub fn create_embedding_client(api_key: &str) -> Client<OpenAIConfig> {
    create_client(OpenAIConfig::new().with_api_key(api_key))
}

/// Create a chat client pointed at OpenRouter.
pub fn create_openrouter_client(api_key: &str) -> Client<OpenAIConfig> {
    create_client(
        OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(OPENROUTER_API_BASE),
    )
}

/// Create a client with the configured timeout.
///
/// Uses a 5-minute timeout to prevent hung API calls.
fn create_client(config: OpenAIConfig) -> Client<OpenAIConfig> {
    create_client_with_timeout(config, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create a client with a custom timeout.
pub fn create_client_with_timeout(
    config: OpenAIConfig,
    timeout: Duration,
) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(config).with_http_client(http_client)
}
