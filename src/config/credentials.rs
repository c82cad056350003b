//! Service credentials for Prat.
//!
//! All three external services require an API key. Credentials are read from
//! the environment exactly once at startup, validated, and passed into
//! components at construction time. Nothing is ever written back into the
//! process environment, and no credential has a default.

use crate::error::{PratError, Result};

/// Environment variable holding the OpenAI key (embeddings).
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable holding the OpenRouter key (chat models).
pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";

/// Environment variable holding the fal.ai key (audio synthesis).
pub const FAL_KEY: &str = "FAL_KEY";

/// Validated API credentials for all external services.
#[derive(Clone)]
pub struct Credentials {
    /// OpenAI API key, used for embeddings.
    pub openai_api_key: String,
    /// OpenRouter API key, used for both language model passes.
    pub openrouter_api_key: String,
    /// fal.ai API key, used for audio synthesis.
    pub fal_api_key: String,
}

impl Credentials {
    /// Read and validate all credentials from the environment.
    ///
    /// Fails with a configuration error naming the first missing variable,
    /// before any external service is contacted.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openai_api_key: require_env(OPENAI_API_KEY)?,
            openrouter_api_key: require_env(OPENROUTER_API_KEY)?,
            fal_api_key: require_env(FAL_KEY)?,
        })
    }

    /// Build credentials from explicit values (tests, embedding callers).
    pub fn new(openai_api_key: &str, openrouter_api_key: &str, fal_api_key: &str) -> Self {
        Self {
            openai_api_key: openai_api_key.to_string(),
            openrouter_api_key: openrouter_api_key.to_string(),
            fal_api_key: fal_api_key.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    // Never print key material.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"***")
            .field("openrouter_api_key", &"***")
            .field("fal_api_key", &"***")
            .finish()
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(PratError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        Err(_) => Err(PratError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}

/// Report which credentials are present, without failing.
///
/// Used by `prat doctor`.
pub fn check_all() -> Vec<(&'static str, bool)> {
    [OPENAI_API_KEY, OPENROUTER_API_KEY, FAL_KEY]
        .into_iter()
        .map(|name| {
            let present = std::env::var(name)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false);
            (name, present)
        })
        .collect()
}

/// Serializes tests that read or mutate the credential environment
/// variables. The process environment is global, so every such test must
/// hold this guard for its whole body.
#[cfg(test)]
pub(crate) fn env_guard() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials::new("sk-secret", "or-secret", "fal-secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_from_env_reads_all_keys() {
        let _guard = env_guard();
        std::env::set_var(OPENAI_API_KEY, "sk-test");
        std::env::set_var(OPENROUTER_API_KEY, "or-test");
        std::env::set_var(FAL_KEY, "fal-test");

        let creds = Credentials::from_env().unwrap();
        assert_eq!(creds.openai_api_key, "sk-test");
        assert_eq!(creds.openrouter_api_key, "or-test");
        assert_eq!(creds.fal_api_key, "fal-test");
        assert!(check_all().iter().all(|(_, present)| *present));

        std::env::remove_var(OPENAI_API_KEY);
        std::env::remove_var(OPENROUTER_API_KEY);
        std::env::remove_var(FAL_KEY);
    }

    #[test]
    fn test_empty_key_is_a_config_error() {
        let _guard = env_guard();
        std::env::set_var(OPENAI_API_KEY, "  ");

        let err = Credentials::from_env().unwrap_err();
        assert!(matches!(err, PratError::Config(_)));

        std::env::remove_var(OPENAI_API_KEY);
    }
}
