//! CPU raster backend: `image` pixel buffer plus `rusttype` glyphs.
//!
//! No font ships with the crate; the caller supplies TrueType/OpenType
//! bytes (the demo binary reads them from `--font`).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use rusttype::{point, Font, Scale};

use super::palette::Palette;
use super::{RasterBackend, Surface, FONT_SIZE, TEXT_ALPHA};
use crate::error::{StoryError, StoryResult};

#[derive(Debug)]
pub struct CpuBackend {
    font: Font<'static>,
}

impl CpuBackend {
    /// Parse caller-supplied font bytes. Unparseable bytes mean no drawable
    /// surface can ever be produced, so this is `RenderingUnavailable`.
    pub fn from_font_bytes(bytes: Vec<u8>) -> StoryResult<Self> {
        let font = Font::try_from_vec(bytes).ok_or_else(|| {
            StoryError::RenderingUnavailable("font bytes did not parse".into())
        })?;
        Ok(Self { font })
    }
}

impl RasterBackend for CpuBackend {
    fn create_surface(&self, width: u32, height: u32) -> StoryResult<Box<dyn Surface>> {
        if width == 0 || height == 0 {
            return Err(StoryError::RenderingUnavailable(format!(
                "degenerate surface {width}x{height}"
            )));
        }
        Ok(Box::new(CpuSurface {
            font: self.font.clone(),
            pixels: RgbImage::new(width, height),
        }))
    }
}

struct CpuSurface {
    font: Font<'static>,
    pixels: RgbImage,
}

impl Surface for CpuSurface {
    fn measure_text_width(&self, text: &str) -> f32 {
        text_width(&self.font, text)
    }

    fn fill_vertical_gradient(&mut self, palette: Palette) {
        fill_gradient(&mut self.pixels, palette);
    }

    fn draw_centered_text(&mut self, text: &str, x: f32, y: f32) {
        let font = &self.font;
        let pixels = &mut self.pixels;

        let scale = Scale::uniform(FONT_SIZE);
        let v_metrics = font.v_metrics(scale);
        let origin_x = x - text_width(font, text) / 2.0;
        // middle anchor: shift the baseline so the glyph block straddles y
        let baseline = y + (v_metrics.ascent + v_metrics.descent) / 2.0;

        for glyph in font.layout(text, scale, point(origin_x, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= pixels.width() || py >= pixels.height() {
                    return;
                }
                blend_white(pixels.get_pixel_mut(px, py), coverage * TEXT_ALPHA);
            });
        }
    }

    fn encode_jpeg_data_url(&self, quality: u8) -> StoryResult<String> {
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality)
            .encode_image(&self.pixels)
            .map_err(|e| StoryError::RenderingUnavailable(format!("jpeg encode: {e}")))?;
        Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&jpeg)))
    }
}

fn text_width(font: &Font<'static>, text: &str) -> f32 {
    let scale = Scale::uniform(FONT_SIZE);
    let v_metrics = font.v_metrics(scale);
    font.layout(text, scale, point(0.0, v_metrics.ascent))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

fn fill_gradient(pixels: &mut RgbImage, palette: Palette) {
    let height = pixels.height();
    let denominator = height.saturating_sub(1).max(1) as f32;
    for row in 0..height {
        let color = palette.sample(row as f32 / denominator);
        for column in 0..pixels.width() {
            *pixels.get_pixel_mut(column, row) = image::Rgb([color.r, color.g, color.b]);
        }
    }
}

// Near-white fill over the gradient, alpha-weighted by glyph coverage.
fn blend_white(pixel: &mut image::Rgb<u8>, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    for channel in pixel.0.iter_mut() {
        let base = *channel as f32;
        *channel = (base + (255.0 - base) * alpha).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::palette::{Rgb, PALETTES};

    #[test]
    fn garbage_font_bytes_are_rendering_unavailable() {
        let err = CpuBackend::from_font_bytes(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, StoryError::RenderingUnavailable(_)));
    }

    #[test]
    fn gradient_spans_the_three_stops() {
        let mut pixels = RgbImage::new(4, 101);
        let palette = PALETTES[0];
        fill_gradient(&mut pixels, palette);

        let at = |row: u32| {
            let p = pixels.get_pixel(0, row);
            Rgb::new(p[0], p[1], p[2])
        };
        assert_eq!(at(0), palette.stops[0]);
        assert_eq!(at(50), palette.stops[1]);
        assert_eq!(at(100), palette.stops[2]);
    }

    #[test]
    fn full_coverage_blend_is_near_white() {
        let mut pixel = image::Rgb([0u8, 0, 0]);
        blend_white(&mut pixel, 0.92);
        assert_eq!(pixel, image::Rgb([235, 235, 235]));
    }

    #[test]
    fn zero_coverage_blend_is_untouched() {
        let mut pixel = image::Rgb([10u8, 20, 30]);
        blend_white(&mut pixel, 0.0);
        assert_eq!(pixel, image::Rgb([10, 20, 30]));
    }
}
