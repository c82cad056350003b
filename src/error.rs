//! Error types for Prat.

use thiserror::Error;

/// Library-level error type for Prat operations.
#[derive(Error, Debug)]
pub enum PratError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Language model error: {0}")]
    Llm(String),

    #[error("Audio synthesis failed: {0}")]
    Synthesis(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PratError {
    /// Whether this error terminates a request outright, before any
    /// pipeline stage runs. Stage failures are instead folded into the
    /// `PodcastResult` error field.
    pub fn is_fail_fast(&self) -> bool {
        matches!(
            self,
            PratError::Config(_) | PratError::UnsupportedInput(_) | PratError::InvalidInput(_)
        )
    }
}

/// Result type alias for Prat operations.
pub type Result<T> = std::result::Result<T, PratError>;
