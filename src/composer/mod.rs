//! Two-speaker transcript composition.
//!
//! Composers turn a topic (plus optional retrieved context) into a strict
//! dialogue: alternating "Speaker 1:" / "Speaker 2:" turns. The model output
//! is parsed and lightly repaired here; the exchange-count and turn-length
//! contract stays prompt-level, as the generating models are trusted to
//! follow it for well-formed output.

mod grounded;
mod ungrounded;

pub use grounded::GroundedComposer;
pub use ungrounded::UngroundedComposer;

use crate::error::{PratError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// One of the two podcast voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    One,
    Two,
}

impl Speaker {
    /// The turn prefix as it appears in the transcript (and as the TTS
    /// service matches it).
    pub fn prefix(&self) -> &'static str {
        match self {
            Speaker::One => "Speaker 1:",
            Speaker::Two => "Speaker 2:",
        }
    }
}

/// A single labeled turn in the dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

/// A parsed two-speaker transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

fn turn_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*\**\s*speaker\s*([12])\s*\**\s*:\s*\**\s*(.*?)\s*\**\s*$")
            .expect("static regex")
    })
}

impl Transcript {
    /// Parse raw model output into labeled turns, repairing what can be
    /// repaired.
    ///
    /// Lines with a speaker prefix start a new turn. Unlabeled lines are
    /// treated as continuations of the previous turn; unlabeled text before
    /// the first turn (preambles, code fences) is dropped. If no labeled
    /// line survives, the model produced no dialogue and this is an error.
    pub fn parse(raw: &str) -> Result<Self> {
        let re = turn_prefix_regex();
        let mut turns: Vec<Turn> = Vec::new();

        for line in raw.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("```") {
                continue;
            }

            if let Some(captures) = re.captures(trimmed) {
                let speaker = match &captures[1] {
                    "1" => Speaker::One,
                    _ => Speaker::Two,
                };
                turns.push(Turn {
                    speaker,
                    text: captures[2].trim().to_string(),
                });
            } else if let Some(last) = turns.last_mut() {
                last.text.push(' ');
                last.text.push_str(trimmed);
            }
        }

        if turns.is_empty() {
            return Err(PratError::Llm("Model returned no dialogue".to_string()));
        }

        Ok(Self { turns })
    }

    /// The labeled turns, in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of back-and-forth exchanges (pairs of turns).
    pub fn exchange_count(&self) -> usize {
        self.turns.len() / 2
    }

    /// Whether turns alternate strictly between the two speakers.
    pub fn alternates(&self) -> bool {
        self.turns
            .windows(2)
            .all(|pair| pair[0].speaker != pair[1].speaker)
    }

    /// Render in the canonical line format the TTS service expects.
    pub fn to_text(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{} {}", turn.speaker.prefix(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
