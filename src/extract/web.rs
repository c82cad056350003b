//! Web page text extraction.

use crate::error::{PratError, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// Fetch a page and extract its main textual content.
///
/// Scripts and styles are stripped; the remaining body text is collected in
/// document order with whitespace collapsed.
#[instrument(skip(client))]
pub async fn fetch_url(client: &reqwest::Client, url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)
        .map_err(|e| PratError::InvalidInput(format!("Invalid URL '{}': {}", url, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(PratError::InvalidInput(format!(
            "Unsupported URL scheme '{}'",
            parsed.scheme()
        )));
    }

    let response = client.get(parsed).send().await?.error_for_status()?;
    let html = response.text().await?;

    let text = extract_body_text(&html);
    debug!("Extracted {} characters from {}", text.len(), url);
    Ok(text)
}

/// Extract visible text from an HTML document.
pub fn extract_body_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").expect("static selector");

    let mut fragments = Vec::new();
    if let Some(body) = document.select(&body_selector).next() {
        collect_text(body, &mut fragments);
    }

    // Collapse runs of whitespace the way rendered text reads.
    fragments
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_text(element: ElementRef, out: &mut Vec<String>) {
    const SKIPPED: [&str; 3] = ["script", "style", "noscript"];
    if SKIPPED.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        }
    }
}
