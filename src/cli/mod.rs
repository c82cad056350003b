//! CLI module for Prat.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Prat - AI Podcast Generation
///
/// Generates a two-speaker podcast from a topic, a URL, or a document.
/// The name "Prat" comes from the Norwegian/Scandinavian word for "talk."
#[derive(Parser, Debug)]
#[command(name = "prat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a podcast about a topic
    Topic {
        /// The topic to discuss
        topic: String,

        /// Print the result as JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Generate a podcast grounded in a web page
    Url {
        /// The page to ground the conversation in
        url: String,

        /// Podcast title, used as the retrieval query
        #[arg(short, long)]
        title: String,

        /// Print the result as JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Generate a podcast grounded in a document (pdf, txt, docx)
    Document {
        /// Path to the source document
        file: String,

        /// Podcast title, used as the retrieval query
        #[arg(short, long)]
        title: String,

        /// Print the result as JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Check credentials and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
