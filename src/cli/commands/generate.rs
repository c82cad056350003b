//! Podcast generation commands: topic, url, document.

use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::extract::{extract_file, fetch_url, SourceKind};
use crate::pipeline::{PodcastPipeline, PodcastResult};
use std::path::Path;

/// Generate a podcast from a topic alone.
pub async fn run_topic(topic: &str, json: bool, settings: Settings) -> anyhow::Result<()> {
    let pipeline = build_pipeline(settings)?;
    generate_and_print(&pipeline, topic, None, json).await
}

/// Generate a podcast grounded in a web page.
pub async fn run_url(url: &str, title: &str, json: bool, settings: Settings) -> anyhow::Result<()> {
    let pipeline = build_pipeline(settings)?;

    let spinner = Output::spinner(&format!("Fetching {}", url));
    let client = reqwest::Client::new();
    let text = fetch_url(&client, url).await?;
    spinner.finish_and_clear();
    Output::info(&format!("Fetched {} characters", text.len()));

    generate_and_print(&pipeline, title, Some(&text), json).await
}

/// Generate a podcast grounded in a local document.
pub async fn run_document(
    file: &str,
    title: &str,
    json: bool,
    settings: Settings,
) -> anyhow::Result<()> {
    // Unsupported extensions fail before the pipeline is even built.
    let kind = SourceKind::from_filename(file)?;

    let pipeline = build_pipeline(settings)?;
    let text = extract_file(Path::new(file), kind)?;
    Output::info(&format!("Extracted {} characters from {} source", text.len(), kind));

    generate_and_print(&pipeline, title, Some(&text), json).await
}

/// Validate credentials once, then construct the pipeline.
fn build_pipeline(settings: Settings) -> anyhow::Result<PodcastPipeline> {
    let credentials = Credentials::from_env()?;
    Ok(PodcastPipeline::new(settings, &credentials)?)
}

async fn generate_and_print(
    pipeline: &PodcastPipeline,
    topic: &str,
    source_text: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let spinner = Output::spinner(&format!("Generating podcast about: {}", topic));
    let result = pipeline.generate(topic, source_text).await;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_result(&result);
    Ok(())
}

fn print_result(result: &PodcastResult) {
    if !result.conversation.is_empty() {
        Output::header("Transcript");
        Output::transcript(&result.conversation);
    }

    match (&result.audio_url, &result.error) {
        (Some(url), _) => {
            Output::success("Audio generation complete!");
            Output::kv("Audio URL", url);
        }
        (None, Some(error)) if result.conversation.is_empty() => {
            Output::error(&format!("Transcript generation failed: {}", error));
        }
        (None, Some(error)) => {
            Output::warning(&format!("Audio synthesis failed: {}", error));
            Output::info("The transcript above was still generated.");
        }
        (None, None) => {}
    }
}
