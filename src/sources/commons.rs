//! Random images out of a media category listing.

use std::collections::HashMap;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::ImageSource;
use crate::config::StoryConfig;
use crate::error::{StoryError, StoryResult};
use crate::net;
use crate::random::Entropy;

const ACCEPTED_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

#[derive(Debug, Deserialize)]
struct ListingResponse {
    query: Option<ListingQuery>,
}

#[derive(Debug, Deserialize)]
struct ListingQuery {
    // keyed by opaque page ids
    pages: Option<HashMap<String, ListingPage>>,
}

#[derive(Debug, Deserialize)]
struct ListingPage {
    imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    thumburl: Option<String>,
    url: Option<String>,
}

/// Image source backed by a category listing: list, filter, pick one,
/// download, embed as a data URL.
pub struct CommonsImageSource {
    client: Client,
    config: StoryConfig,
}

impl CommonsImageSource {
    pub fn new(client: Client, config: StoryConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ImageSource for CommonsImageSource {
    async fn random_image(&self, entropy: &mut dyn Entropy) -> StoryResult<String> {
        let response = net::get_within(
            &self.client,
            &self.config.listing_url,
            self.config.request_timeout,
        )
        .await?;
        let listing: ListingResponse = response
            .json()
            .await
            .map_err(|e| StoryError::FetchFailed(e.to_string()))?;

        let candidates = candidate_urls(&listing);
        if candidates.is_empty() {
            return Err(StoryError::NoCandidates);
        }
        let chosen = &candidates[entropy.pick_index(candidates.len())];
        debug!(candidates = candidates.len(), %chosen, "downloading category image");

        let download =
            net::get_within(&self.client, chosen, self.config.request_timeout).await?;
        let mime = image_mime(&download, chosen);
        let bytes = download
            .bytes()
            .await
            .map_err(|e| StoryError::FetchFailed(e.to_string()))?;
        Ok(format!("data:{mime};base64,{}", BASE64.encode(&bytes)))
    }
}

/// First image-info entry per page, thumbnail preferred over the full URL,
/// known raster extensions only.
fn candidate_urls(listing: &ListingResponse) -> Vec<String> {
    let Some(pages) = listing.query.as_ref().and_then(|q| q.pages.as_ref()) else {
        return Vec::new();
    };
    pages
        .values()
        .filter_map(|page| {
            let info = page.imageinfo.as_ref()?.first()?;
            info.thumburl.as_deref().or(info.url.as_deref())
        })
        .filter(|candidate| has_accepted_extension(candidate))
        .map(str::to_string)
        .collect()
}

// Extension check runs on the URL path, so query strings don't defeat it.
fn has_accepted_extension(candidate: &str) -> bool {
    let path = match Url::parse(candidate) {
        Ok(parsed) => parsed.path().to_ascii_lowercase(),
        Err(_) => return false,
    };
    ACCEPTED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// The response header wins; the URL extension is the fallback.
fn image_mime(response: &Response, url: &str) -> String {
    let header = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|value| value.starts_with("image/"));
    if let Some(mime) = header {
        return mime.to_string();
    }
    if has_extension(url, ".png") {
        "image/png".to_string()
    } else {
        "image/jpeg".to_string()
    }
}

fn has_extension(candidate: &str, ext: &str) -> bool {
    Url::parse(candidate)
        .map(|parsed| parsed.path().to_ascii_lowercase().ends_with(ext))
        .unwrap_or(false)
}
