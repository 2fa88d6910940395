//! Offscreen rendering of quote cards.
//!
//! The drawing capability is injected through [`RasterBackend`] and
//! [`Surface`], so the wrap/layout/encode pipeline runs the same against the
//! CPU backend and against test fakes.

pub mod cpu;
pub mod palette;

use tracing::debug;

use crate::error::StoryResult;
use crate::random::Entropy;
use palette::{Palette, PALETTES};

pub const STORY_WIDTH: u32 = 1080;
pub const STORY_HEIGHT: u32 = 1920;
/// Nominal bold-72 text; weight comes from the backend's font face.
pub const FONT_SIZE: f32 = 72.0;
pub const LINE_HEIGHT: f32 = 92.0;
pub const TEXT_ALPHA: f32 = 0.92;
/// JPEG quality on the encoder's 1..=100 scale.
pub const JPEG_QUALITY: u8 = 90;
/// Lines wrap inside 80% of the card width.
pub const MAX_LINE_WIDTH: f32 = STORY_WIDTH as f32 * 0.8;

/// One offscreen drawing target, sized at creation.
pub trait Surface {
    /// Width of `text` at the card's font and size.
    fn measure_text_width(&self, text: &str) -> f32;

    /// Full-surface vertical gradient through the palette's stops at
    /// offsets 0, 0.5, 1.
    fn fill_vertical_gradient(&mut self, palette: Palette);

    /// Draw `text` with its center anchored at (`x`, `y`).
    fn draw_centered_text(&mut self, text: &str, x: f32, y: f32);

    /// Encode the surface as a JPEG data URL.
    fn encode_jpeg_data_url(&self, quality: u8) -> StoryResult<String>;
}

/// Creates surfaces; failing here is `RenderingUnavailable` and is never
/// retried.
pub trait RasterBackend: Send + Sync {
    fn create_surface(&self, width: u32, height: u32) -> StoryResult<Box<dyn Surface>>;
}

/// Greedy word wrap against the surface's own measurement. A single word
/// wider than `max_width` occupies its own line, unsplit.
pub fn wrap_text(surface: &dyn Surface, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let next = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if surface.measure_text_width(&next) <= max_width {
            current = next;
            continue;
        }
        if !current.is_empty() {
            lines.push(current);
        }
        current = word.to_string();
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render `text` onto a fresh 1080x1920 gradient card, palette picked at
/// random, and encode it as a JPEG data URL.
pub fn render_quote_card(
    backend: &dyn RasterBackend,
    entropy: &mut dyn Entropy,
    text: &str,
) -> StoryResult<String> {
    let mut surface = backend.create_surface(STORY_WIDTH, STORY_HEIGHT)?;
    let palette = PALETTES[entropy.pick_index(PALETTES.len())];
    render_quote_card_with(surface.as_mut(), palette, text)
}

/// Deterministic inner pipeline, split out so tests can pin the palette.
pub fn render_quote_card_with(
    surface: &mut dyn Surface,
    palette: Palette,
    text: &str,
) -> StoryResult<String> {
    surface.fill_vertical_gradient(palette);

    let lines = wrap_text(&*surface, text, MAX_LINE_WIDTH);
    debug!(lines = lines.len(), "laying out quote card");

    let total_height = lines.len() as f32 * LINE_HEIGHT;
    let mut y = (STORY_HEIGHT as f32 - total_height) / 2.0 + LINE_HEIGHT / 2.0;
    for line in &lines {
        surface.draw_centered_text(line, STORY_WIDTH as f32 / 2.0, y);
        y += LINE_HEIGHT;
    }

    surface.encode_jpeg_data_url(JPEG_QUALITY)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Palette, RasterBackend, StoryResult, Surface};

    /// Fixed-advance measurement: every character is `char_width` wide.
    pub(crate) struct FakeBackend {
        pub char_width: f32,
    }

    impl FakeBackend {
        pub(crate) fn new(char_width: f32) -> Self {
            Self { char_width }
        }
    }

    impl RasterBackend for FakeBackend {
        fn create_surface(&self, width: u32, height: u32) -> StoryResult<Box<dyn Surface>> {
            Ok(Box::new(FakeSurface {
                char_width: self.char_width,
                width,
                height,
                ops: Vec::new(),
            }))
        }
    }

    /// Records draw calls; "encoding" serializes the op log so identical
    /// renders compare equal.
    pub(crate) struct FakeSurface {
        char_width: f32,
        pub width: u32,
        pub height: u32,
        pub ops: Vec<String>,
    }

    impl Surface for FakeSurface {
        fn measure_text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * self.char_width
        }

        fn fill_vertical_gradient(&mut self, palette: Palette) {
            self.ops.push(format!(
                "gradient {:02x}{:02x}{:02x}",
                palette.stops[0].r, palette.stops[0].g, palette.stops[0].b
            ));
        }

        fn draw_centered_text(&mut self, text: &str, x: f32, y: f32) {
            self.ops.push(format!("text {x} {y} {text}"));
        }

        fn encode_jpeg_data_url(&self, quality: u8) -> StoryResult<String> {
            Ok(format!(
                "data:image/jpeg;q={quality};{}x{};{}",
                self.width,
                self.height,
                self.ops.join("|")
            ))
        }
    }

    /// Backend whose surfaces cannot be created.
    pub(crate) struct BrokenBackend;

    impl RasterBackend for BrokenBackend {
        fn create_surface(&self, _width: u32, _height: u32) -> StoryResult<Box<dyn Surface>> {
            Err(crate::error::StoryError::RenderingUnavailable(
                "no drawing context".into(),
            ))
        }
    }
}
