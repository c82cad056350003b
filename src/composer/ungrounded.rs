//! Topic-only transcript composition.
//!
//! Used when the request supplies no source document: a single model call
//! with the topic-only prompt variant, no retrieval.

use super::Transcript;
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::LanguageModel;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Single-pass dialogue composer with no external context.
pub struct UngroundedComposer {
    model: Arc<dyn LanguageModel>,
    prompts: Prompts,
}

impl UngroundedComposer {
    /// Create a composer from a model and prompt templates.
    pub fn new(model: Arc<dyn LanguageModel>, prompts: Prompts) -> Self {
        Self { model, prompts }
    }

    /// Compose a transcript from the topic alone.
    #[instrument(skip(self), fields(topic = %topic))]
    pub async fn compose(&self, topic: &str) -> Result<Transcript> {
        info!("Composing transcript with {}", self.model.model_name());

        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), topic.to_string());
        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.dialogue.topic_only, &vars);

        let output = self.model.complete(&prompt, None).await?;
        Transcript::parse(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::test_support::{ScriptedModel, SAMPLE_DIALOGUE};

    #[tokio::test]
    async fn test_single_call_with_topic_prompt() {
        let model = Arc::new(ScriptedModel::returning("refine", SAMPLE_DIALOGUE));
        let composer = UngroundedComposer::new(model.clone(), Prompts::default());

        let transcript = composer.compose("Black holes").await.unwrap();
        assert!(!transcript.turns().is_empty());
        assert!(transcript.alternates());
        for line in transcript.to_text().lines() {
            assert!(line.starts_with("Speaker 1:") || line.starts_with("Speaker 2:"));
        }

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].system.contains("Black holes"));
        // Topic-only prompt carries no context block.
        assert!(!calls[0].system.contains("{{context}}"));
        assert!(calls[0].user.is_none());
    }
}
