//! Configuration module for Prat.
//!
//! Handles application settings, prompt templates, and service credentials.

mod credentials;
mod prompts;
mod settings;

pub use credentials::{check_all, Credentials, FAL_KEY, OPENAI_API_KEY, OPENROUTER_API_KEY};
#[cfg(test)]
pub(crate) use credentials::env_guard;
pub use prompts::{DialoguePrompts, Prompts};
pub use settings::{
    ChunkingSettings, ComposerSettings, EmbeddingSettings, GeneralSettings, PromptSettings,
    RetrievalSettings, Settings, SynthesisSettings,
};
