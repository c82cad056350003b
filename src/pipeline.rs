//! Podcast generation pipeline.
//!
//! Coordinates the whole request: chunking, indexing, retrieval, the two
//! composition passes, and audio synthesis. Execution is strictly
//! sequential; every external call is attempted exactly once. The pipeline
//! owns no state beyond its components, and each request builds and drops
//! its own retrieval index.

use crate::chunking::TextChunker;
use crate::composer::{GroundedComposer, Transcript, UngroundedComposer};
use crate::config::{Credentials, Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::Result;
use crate::llm::{ChatModel, LanguageModel};
use crate::retrieval::EmbeddingIndex;
use crate::synthesis::{FalSynthesizer, Synthesizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The outcome of one podcast generation request.
///
/// Synthesis failure after a successful transcript is a partial success:
/// `conversation` is kept and only `error` is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastResult {
    /// The generated two-speaker transcript (empty if composition failed).
    pub conversation: String,
    /// URL of the synthesized audio, when synthesis succeeded.
    pub audio_url: Option<String>,
    /// Stage error, when composition or synthesis failed.
    pub error: Option<String>,
}

/// The main podcast generation pipeline.
pub struct PodcastPipeline {
    settings: Settings,
    chunker: TextChunker,
    embedder: Arc<dyn Embedder>,
    grounded: GroundedComposer,
    ungrounded: UngroundedComposer,
    synthesizer: Arc<dyn Synthesizer>,
}

impl PodcastPipeline {
    /// Create a pipeline from validated settings and credentials.
    pub fn new(settings: Settings, credentials: &Credentials) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::new(
            credentials,
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));

        let draft: Arc<dyn LanguageModel> = Arc::new(ChatModel::new(
            credentials,
            &settings.composer.draft_model,
            settings.composer.draft_temperature,
        ));
        let refine: Arc<dyn LanguageModel> = Arc::new(ChatModel::new(
            credentials,
            &settings.composer.refine_model,
            settings.composer.refine_temperature,
        ));

        let synthesizer: Arc<dyn Synthesizer> =
            Arc::new(FalSynthesizer::new(credentials, &settings.synthesis));

        Ok(Self::with_components(
            settings,
            prompts,
            embedder,
            draft,
            refine,
            synthesizer,
        ))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        embedder: Arc<dyn Embedder>,
        draft_model: Arc<dyn LanguageModel>,
        refine_model: Arc<dyn LanguageModel>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        let chunker = TextChunker::new(settings.chunking.max_chunk_chars);
        let grounded =
            GroundedComposer::new(draft_model, refine_model.clone(), prompts.clone());
        let ungrounded = UngroundedComposer::new(refine_model, prompts);

        Self {
            settings,
            chunker,
            embedder,
            grounded,
            ungrounded,
            synthesizer,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Generate a podcast: transcript first, then audio.
    ///
    /// Composition failure yields an empty conversation with the error;
    /// synthesis failure keeps the transcript and reports only the error.
    /// Neither becomes an `Err`, so callers always get a `PodcastResult`.
    #[instrument(skip(self, source_text), fields(topic = %topic, grounded = source_text.is_some()))]
    pub async fn generate(&self, topic: &str, source_text: Option<&str>) -> PodcastResult {
        info!("Generating podcast about: {}", topic);

        let transcript = match self.compose(topic, source_text).await {
            Ok(transcript) => transcript,
            Err(e) => {
                warn!("Transcript generation failed: {}", e);
                return PodcastResult {
                    conversation: String::new(),
                    audio_url: None,
                    error: Some(e.to_string()),
                };
            }
        };

        let conversation = transcript.to_text();
        info!(
            "Transcript ready ({} turns), converting to audio",
            transcript.turns().len()
        );

        match self.synthesizer.synthesize(&conversation).await {
            Ok(audio) => PodcastResult {
                conversation,
                audio_url: Some(audio.url),
                error: None,
            },
            Err(e) => {
                warn!("Audio synthesis failed: {}", e);
                PodcastResult {
                    conversation,
                    audio_url: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Compose the transcript, grounded when source text is available.
    async fn compose(&self, topic: &str, source_text: Option<&str>) -> Result<Transcript> {
        let chunks = match source_text {
            Some(text) => self.chunker.chunk(text),
            None => Vec::new(),
        };

        if chunks.is_empty() {
            info!("No source text, composing from topic alone");
            return self.ungrounded.compose(topic).await;
        }

        info!("Split source into {} chunks", chunks.len());
        let index = EmbeddingIndex::build(chunks, self.embedder.as_ref()).await?;
        let context = index
            .query(self.embedder.as_ref(), topic, self.settings.retrieval.top_k)
            .await?;
        info!("Retrieved {} context chunks", context.len());

        self.grounded.compose(topic, &context).await
    }
}
