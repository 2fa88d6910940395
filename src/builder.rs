//! Story orchestration: mode pick, fetch, render, fallback.

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::StoryConfig;
use crate::error::{StoryError, StoryResult};
use crate::payload::StoryPayload;
use crate::random::{Entropy, Mode, ThreadEntropy};
use crate::raster::{render_quote_card, RasterBackend};
use crate::sources::commons::CommonsImageSource;
use crate::sources::wiki::WikiQuoteSource;
use crate::sources::{ImageSource, QuoteSource};

/// Rendered instead of a downloaded image when the image path fails.
pub const IMAGE_FALLBACK_TEXT: &str = "Random image is unavailable. Here is a quote instead.";

/// Builds one [`StoryPayload`] per call. Quote mode fetches a random summary
/// and renders it onto a gradient card; image mode downloads a random
/// category image, falling back to a rendered card on any failure.
pub struct StoryBuilder {
    quotes: Box<dyn QuoteSource>,
    images: Box<dyn ImageSource>,
    backend: Box<dyn RasterBackend>,
    entropy: Box<dyn Entropy>,
}

impl StoryBuilder {
    /// Production wiring against the live endpoints.
    pub fn new(config: StoryConfig, backend: Box<dyn RasterBackend>) -> StoryResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoryError::FetchFailed(e.to_string()))?;
        Ok(Self {
            quotes: Box::new(WikiQuoteSource::new(client.clone(), config.clone())),
            images: Box::new(CommonsImageSource::new(client, config)),
            backend,
            entropy: Box::new(ThreadEntropy),
        })
    }

    /// Fully injected wiring, for tests and embedders.
    pub fn with_parts(
        quotes: Box<dyn QuoteSource>,
        images: Box<dyn ImageSource>,
        backend: Box<dyn RasterBackend>,
        entropy: Box<dyn Entropy>,
    ) -> Self {
        Self {
            quotes,
            images,
            backend,
            entropy,
        }
    }

    /// Build one payload. Strictly sequential; the `&mut` receiver makes
    /// overlapping builds on one instance unrepresentable, so callers only
    /// have to refuse to start a new build while one is outstanding.
    pub async fn build(&mut self) -> StoryResult<StoryPayload> {
        match self.entropy.pick_mode() {
            Mode::Quote => {
                debug!("mode: quote");
                // quote-path failures propagate; the caller owns the notice
                let text = self.quotes.random_quote().await?;
                let url =
                    render_quote_card(self.backend.as_ref(), self.entropy.as_mut(), &text)?;
                Ok(StoryPayload::image(url))
            }
            Mode::Image => {
                debug!("mode: image");
                match self.images.random_image(self.entropy.as_mut()).await {
                    Ok(url) => Ok(StoryPayload::image(url)),
                    Err(err) => {
                        warn!(%err, "image path failed, rendering the fallback card");
                        let url = render_quote_card(
                            self.backend.as_ref(),
                            self.entropy.as_mut(),
                            IMAGE_FALLBACK_TEXT,
                        )?;
                        Ok(StoryPayload::image(url))
                    }
                }
            }
        }
    }
}
