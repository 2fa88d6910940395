//! Content sources feeding the story builder.

pub mod commons;
pub mod wiki;

use async_trait::async_trait;

use crate::error::StoryResult;
use crate::random::Entropy;

/// Supplies a short display string for rendered quote cards.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn random_quote(&self) -> StoryResult<String>;
}

/// Supplies a self-contained image reference (a data URL).
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn random_image(&self, entropy: &mut dyn Entropy) -> StoryResult<String>;
}
