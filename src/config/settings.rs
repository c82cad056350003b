//! Configuration settings for Prat.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub retrieval: RetrievalSettings,
    pub composer: ComposerSettings,
    pub synthesis: SynthesisSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary files (uploaded documents).
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/prat".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Source text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk length in characters.
    pub max_chunk_chars: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            max_chunk_chars: 1000,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of chunks to retrieve per query.
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}

/// Transcript composer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerSettings {
    /// Model for the grounded draft pass (knows the facts).
    pub draft_model: String,
    /// Model for the refinement pass (obeys the output format). Also used
    /// for ungrounded, topic-only generation.
    pub refine_model: String,
    /// Sampling temperature for the draft pass.
    pub draft_temperature: f32,
    /// Sampling temperature for the refinement pass.
    pub refine_temperature: f32,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            draft_model: "google/gemini-pro-1.5".to_string(),
            refine_model: "deepseek/deepseek-chat".to_string(),
            draft_temperature: 0.0,
            refine_temperature: 0.7,
        }
    }
}

/// Audio synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    /// TTS endpoint (fal.ai PlayHT dialogue model).
    pub endpoint: String,
    /// Voice for lines prefixed "Speaker 1:".
    pub voice_one: String,
    /// Voice for lines prefixed "Speaker 2:".
    pub voice_two: String,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://fal.run/fal-ai/playht/tts/ldm".to_string(),
            voice_one: "Jennifer (English (US)/American)".to_string(),
            voice_two: "Dexter (English (US)/American)".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::PratError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prat")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chunking.max_chunk_chars, 1000);
        assert_eq!(settings.retrieval.top_k, 10);
        assert_eq!(settings.embedding.dimensions, 1536);
        assert!(settings.synthesis.endpoint.starts_with("https://fal.run/"));
        assert_ne!(settings.composer.draft_model, settings.composer.refine_model);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml = r#"
            [retrieval]
            top_k = 4

            [composer]
            refine_model = "mistralai/mistral-small"
        "#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.retrieval.top_k, 4);
        assert_eq!(settings.composer.refine_model, "mistralai/mistral-small");
        assert_eq!(settings.chunking.max_chunk_chars, 1000);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.retrieval.top_k = 7;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.retrieval.top_k, 7);
    }
}
