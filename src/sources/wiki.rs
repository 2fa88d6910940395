//! Random encyclopedia summaries, clamped for a story card.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::QuoteSource;
use crate::config::StoryConfig;
use crate::error::{StoryError, StoryResult};
use crate::net;

/// Display budget: 157 visible characters plus the marker.
const MAX_QUOTE_CHARS: usize = 160;
const ELLIPSIS: &str = "...";

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
    title: Option<String>,
}

/// Quote source backed by the random-summary REST endpoint.
pub struct WikiQuoteSource {
    client: Client,
    config: StoryConfig,
}

impl WikiQuoteSource {
    pub fn new(client: Client, config: StoryConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl QuoteSource for WikiQuoteSource {
    async fn random_quote(&self) -> StoryResult<String> {
        let response = net::get_within(
            &self.client,
            &self.config.summary_url,
            self.config.request_timeout,
        )
        .await?;
        let summary: SummaryResponse = response
            .json()
            .await
            .map_err(|e| StoryError::FetchFailed(e.to_string()))?;
        display_text(&summary)
    }
}

/// Prefer `extract`, fall back to `title`, then clamp. Blank everywhere is
/// `EmptyContent`.
fn display_text(summary: &SummaryResponse) -> StoryResult<String> {
    let text = non_blank(summary.extract.as_deref())
        .or_else(|| non_blank(summary.title.as_deref()))
        .ok_or(StoryError::EmptyContent)?;
    Ok(truncate_chars(text))
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|t| !t.is_empty())
}

// Counts characters, not bytes; the endpoint serves Cyrillic text.
fn truncate_chars(text: &str) -> String {
    if text.chars().count() <= MAX_QUOTE_CHARS {
        return text.to_string();
    }
    let visible: String = text.chars().take(MAX_QUOTE_CHARS - ELLIPSIS.len()).collect();
    format!("{visible}{ELLIPSIS}")
}
