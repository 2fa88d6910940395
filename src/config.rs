//! Endpoints and deadlines for the two content APIs.

use std::time::Duration;

use url::Url;

// Production constants
const REQUEST_TIMEOUT: Duration = Duration::from_millis(7000);
const SUMMARY_URL: &str = "https://ru.wikipedia.org/api/rest_v1/page/random/summary";
const LISTING_API_URL: &str = "https://commons.wikimedia.org/w/api.php";
const LISTING_CATEGORY: &str = "Weapons";
const LISTING_LIMIT: u32 = 50;
const THUMB_WIDTH: u32 = 1080;

/// Where the builder fetches from and how long it waits. `Default` is the
/// live production wiring; tests point the URLs at a local mock server.
#[derive(Debug, Clone)]
pub struct StoryConfig {
    /// Random encyclopedia summary endpoint.
    pub summary_url: String,
    /// Category listing endpoint, query parameters included.
    pub listing_url: String,
    /// Per-request deadline; the request is aborted when it fires.
    pub request_timeout: Duration,
}

impl StoryConfig {
    /// Listing wired to `category`, returning up to `limit` files with
    /// thumbnails scaled to `thumb_width`.
    pub fn for_category(category: &str, limit: u32, thumb_width: u32) -> Self {
        Self {
            summary_url: SUMMARY_URL.to_string(),
            listing_url: listing_url(category, limit, thumb_width),
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self::for_category(LISTING_CATEGORY, LISTING_LIMIT, THUMB_WIDTH)
    }
}

fn listing_url(category: &str, limit: u32, thumb_width: u32) -> String {
    let params = [
        ("action", "query".to_string()),
        ("generator", "categorymembers".to_string()),
        ("gcmtitle", format!("Category:{category}")),
        ("gcmtype", "file".to_string()),
        ("gcmlimit", limit.to_string()),
        ("prop", "imageinfo".to_string()),
        ("iiprop", "url".to_string()),
        ("iiurlwidth", thumb_width.to_string()),
        ("format", "json".to_string()),
        ("origin", "*".to_string()),
    ];
    Url::parse_with_params(LISTING_API_URL, &params)
        .expect("listing endpoint URL is statically valid")
        .into()
}
