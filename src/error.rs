//! Error surface shared by the payload pipeline.

use thiserror::Error;

pub type StoryResult<T> = Result<T, StoryError>;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Request timed out")]
    Timeout,
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    #[error("Random text is empty")]
    EmptyContent,
    #[error("No image candidates after filtering")]
    NoCandidates,
    #[error("Rendering is not available: {0}")]
    RenderingUnavailable(String),
}
