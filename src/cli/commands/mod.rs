//! CLI command implementations.

mod config;
mod doctor;
mod generate;
mod serve;

pub use config::run_config;
pub use doctor::run_doctor;
pub use generate::{run_document, run_topic, run_url};
pub use serve::run_serve;
