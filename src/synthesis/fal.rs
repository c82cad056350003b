//! fal.ai PlayHT dialogue synthesis.
//!
//! Calls the fal.run endpoint for the PlayHT large dialogue model. The
//! service splits the transcript on the configured turn prefixes and renders
//! each speaker with their assigned voice.

use super::{SynthesizedAudio, Synthesizer};
use crate::config::{Credentials, SynthesisSettings};
use crate::error::{PratError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// fal.ai-backed synthesizer.
pub struct FalSynthesizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    voice_one: String,
    voice_two: String,
}

#[derive(Deserialize)]
struct FalResponse {
    audio: FalAudio,
    #[serde(default)]
    logs: Vec<FalLog>,
}

#[derive(Deserialize)]
struct FalAudio {
    url: String,
}

#[derive(Deserialize)]
struct FalLog {
    #[serde(default)]
    message: String,
}

impl FalSynthesizer {
    /// Create a synthesizer from credentials and synthesis settings.
    pub fn new(credentials: &Credentials, settings: &SynthesisSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: settings.endpoint.clone(),
            api_key: credentials.fal_api_key.clone(),
            voice_one: settings.voice_one.clone(),
            voice_two: settings.voice_two.clone(),
        }
    }

    fn payload(&self, transcript: &str) -> serde_json::Value {
        serde_json::json!({
            "input": transcript,
            "voices": [
                {
                    "voice": self.voice_one,
                    "turn_prefix": "Speaker 1: ",
                },
                {
                    "voice": self.voice_two,
                    "turn_prefix": "Speaker 2: ",
                },
            ],
        })
    }
}

#[async_trait]
impl Synthesizer for FalSynthesizer {
    #[instrument(skip(self, transcript), fields(chars = transcript.len()))]
    async fn synthesize(&self, transcript: &str) -> Result<SynthesizedAudio> {
        info!("Synthesizing audio via {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Key {}", self.api_key))
            .json(&self.payload(transcript))
            .send()
            .await
            .map_err(|e| PratError::Synthesis(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PratError::Synthesis(format!(
                "TTS service returned {}: {}",
                status, body
            )));
        }

        let result: FalResponse = response
            .json()
            .await
            .map_err(|e| PratError::Synthesis(format!("Unexpected response: {}", e)))?;

        // Progress logs are observability only; they never affect control flow.
        for log in &result.logs {
            if !log.message.is_empty() {
                debug!("tts: {}", log.message);
            }
        }

        info!("Audio ready at {}", result.audio.url);
        Ok(SynthesizedAudio {
            url: result.audio.url,
        })
    }
}
