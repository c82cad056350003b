//! Retrieval-grounded transcript composition.
//!
//! Two sequential model passes: a draft pass conditioned on retrieved
//! source-document context, then a refinement pass that re-applies the same
//! format instruction with the draft as context. The draft model knows the
//! facts; the refinement model enforces the strict dialogue format.

use super::Transcript;
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::retrieval::ScoredChunk;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Two-stage, context-grounded dialogue composer.
pub struct GroundedComposer {
    draft_model: Arc<dyn LanguageModel>,
    refine_model: Arc<dyn LanguageModel>,
    prompts: Prompts,
}

impl GroundedComposer {
    /// Create a composer from its two models and prompt templates.
    pub fn new(
        draft_model: Arc<dyn LanguageModel>,
        refine_model: Arc<dyn LanguageModel>,
        prompts: Prompts,
    ) -> Self {
        Self {
            draft_model,
            refine_model,
            prompts,
        }
    }

    /// Compose a transcript for the topic, grounded in the retrieved chunks.
    #[instrument(skip(self, context), fields(topic = %topic, chunks = context.len()))]
    pub async fn compose(&self, topic: &str, context: &[ScoredChunk]) -> Result<Transcript> {
        let context_text = context
            .iter()
            .map(|c| c.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        // Stage A: grounded draft from the retrieved context.
        info!("Drafting transcript with {}", self.draft_model.model_name());
        let draft_prompt = self.render(topic, &context_text);
        let draft = self.draft_model.complete(&draft_prompt, Some(topic)).await?;
        debug!("Draft is {} characters", draft.len());

        // Stage B: same instruction, draft substituted as context, formatted
        // by the refinement model.
        info!("Refining transcript with {}", self.refine_model.model_name());
        let refine_prompt = self.render(topic, &draft);
        let refined = self.refine_model.complete(&refine_prompt, None).await?;

        Transcript::parse(&refined)
    }

    fn render(&self, topic: &str, context: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), topic.to_string());
        vars.insert("context".to_string(), context.to_string());
        self.prompts
            .render_with_custom(&self.prompts.dialogue.grounded_system, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;
    use crate::composer::test_support::{ScriptedModel, SAMPLE_DIALOGUE};
    use crate::error::PratError;

    fn context_of(contents: &[&str]) -> Vec<ScoredChunk> {
        contents
            .iter()
            .enumerate()
            .map(|(order, content)| ScoredChunk {
                chunk: Chunk {
                    content: content.to_string(),
                    order,
                },
                score: 1.0 - order as f32 * 0.1,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_two_stage_composition() {
        let draft = Arc::new(ScriptedModel::returning(
            "draft-model",
            "Speaker 1: Draft fact one.\nSpeaker 2: Draft fact two.",
        ));
        let refine = Arc::new(ScriptedModel::returning("refine-model", SAMPLE_DIALOGUE));

        let composer =
            GroundedComposer::new(draft.clone(), refine.clone(), Prompts::default());
        let context = context_of(&["Chloroplasts capture light.", "Water is split."]);

        let transcript = composer.compose("Photosynthesis", &context).await.unwrap();

        assert_eq!(transcript.exchange_count(), 5);
        assert!(transcript.alternates());

        // Stage A saw the retrieved chunks and the topic as the question.
        let draft_calls = draft.calls.lock().unwrap();
        assert_eq!(draft_calls.len(), 1);
        assert!(draft_calls[0].system.contains("Chloroplasts capture light."));
        assert!(draft_calls[0].system.contains("Photosynthesis"));
        assert_eq!(draft_calls[0].user.as_deref(), Some("Photosynthesis"));

        // Stage B saw the Stage-A answer as its context, with no user turn.
        let refine_calls = refine.calls.lock().unwrap();
        assert_eq!(refine_calls.len(), 1);
        assert!(refine_calls[0].system.contains("Draft fact one."));
        assert!(refine_calls[0].user.is_none());
    }

    #[tokio::test]
    async fn test_every_line_labeled_and_alternating() {
        let draft = Arc::new(ScriptedModel::returning("draft", "Speaker 1: d\nSpeaker 2: d"));
        let refine = Arc::new(ScriptedModel::returning("refine", SAMPLE_DIALOGUE));
        let composer = GroundedComposer::new(draft, refine, Prompts::default());

        let context = context_of(&["Plants convert light into chemical energy."]);
        let transcript = composer.compose("Photosynthesis", &context).await.unwrap();

        let mut last_was_one = false;
        for (i, line) in transcript.to_text().lines().enumerate() {
            let is_one = line.starts_with("Speaker 1:");
            assert!(is_one || line.starts_with("Speaker 2:"));
            if i > 0 {
                assert_ne!(is_one, last_was_one, "turns must alternate");
            }
            last_was_one = is_one;
        }
    }

    #[tokio::test]
    async fn test_draft_failure_propagates_without_refining() {
        let draft = Arc::new(ScriptedModel::failing("draft", "provider unreachable"));
        let refine = Arc::new(ScriptedModel::returning("refine", SAMPLE_DIALOGUE));

        let composer =
            GroundedComposer::new(draft, refine.clone(), Prompts::default());
        let err = composer
            .compose("Photosynthesis", &context_of(&["ctx"]))
            .await
            .unwrap_err();

        assert!(matches!(err, PratError::Llm(_)));
        assert_eq!(refine.call_count(), 0);
    }
}
