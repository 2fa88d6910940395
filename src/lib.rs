//! Random story background builder.
//!
//! Builds a [`StoryPayload`] for a host platform's story editor: either a
//! random encyclopedia quote rendered onto a 1080x1920 gradient card, or a
//! random image downloaded from a media category, with the rendered card as
//! the image path's fallback.
//!
//! ```text
//! caller → StoryBuilder → { quote source | image source } → raster backend
//! ```

pub mod builder;
pub mod config;
pub mod error;
mod net;
pub mod payload;
pub mod random;
pub mod raster;
pub mod sources;

pub use builder::{StoryBuilder, IMAGE_FALLBACK_TEXT};
pub use config::StoryConfig;
pub use error::{StoryError, StoryResult};
pub use payload::{BackgroundType, StoryPayload};
