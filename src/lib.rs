//! Prat - AI Podcast Generation
//!
//! Turns a topic, a URL, or a document into a two-speaker podcast.
//!
//! The name "Prat" comes from the Norwegian/Scandinavian word for "talk."
//!
//! # Overview
//!
//! Prat allows you to:
//! - Generate a podcast conversation about any topic
//! - Ground the conversation in a web page or an uploaded document (PDF,
//!   TXT, DOCX) via retrieval over its chunks
//! - Synthesize the conversation into spoken audio with two distinct voices
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings, prompts, and service credentials
//! - `extract` - Source text extraction (PDF, TXT, DOCX, web)
//! - `chunking` - Recursive character chunking of source text
//! - `embedding` - Embedding generation
//! - `retrieval` - Per-request in-memory retrieval index
//! - `llm` - Language model abstraction
//! - `composer` - Two-speaker transcript composition
//! - `synthesis` - Transcript-to-audio synthesis
//! - `pipeline` - Request orchestration
//!
//! # Example
//!
//! ```rust,no_run
//! use prat::config::{Credentials, Settings};
//! use prat::pipeline::PodcastPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env()?;
//!     let pipeline = PodcastPipeline::new(settings, &credentials)?;
//!
//!     let result = pipeline.generate("Black holes", None).await;
//!     println!("{}", result.conversation);
//!     if let Some(url) = result.audio_url {
//!         println!("Audio: {}", url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod composer;
pub mod config;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod llm;
pub mod openai;
pub mod pipeline;
pub mod retrieval;
pub mod synthesis;

pub use error::{PratError, Result};
pub use pipeline::{PodcastPipeline, PodcastResult};
