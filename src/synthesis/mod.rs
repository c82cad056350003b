//! Audio synthesis abstraction.
//!
//! The transcript is handed to an external TTS service that parses the
//! speaker turn prefixes itself and returns a URL to the rendered audio.

mod fal;

pub use fal::FalSynthesizer;

use crate::error::Result;
use async_trait::async_trait;

/// Synthesized audio, addressable by URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    /// Playable URL of the generated audio.
    pub url: String,
}

/// Trait for transcript-to-audio synthesis.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize a two-speaker transcript into audio.
    ///
    /// The transcript must use "Speaker 1:" / "Speaker 2:" line prefixes;
    /// voice assignment per prefix is the implementation's concern.
    async fn synthesize(&self, transcript: &str) -> Result<SynthesizedAudio>;
}
