//! Rasterization capability: the shared strip and the text rasterizers that
//! draw into it.

use fontdue::{Font, FontSettings};
use tiny_skia::{
    ColorU8, Paint, Pixmap, PixmapPaint, PremultipliedColorU8, Rect, Transform,
};

use crate::error::Error;

/// Default strip edge in pixels.
pub const STRIP_SIZE: u32 = 2048;

// =============================================================================
// Strip
// =============================================================================

/// Off-screen buffer that a batch of words is drawn into before one pixel
/// readback.
pub struct Strip {
    pixmap: Pixmap,
}

impl Strip {
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::Render(format!("Failed to create {width}x{height} strip buffer"))
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Alpha of every pixel, row-major, `width()` bytes per row.
    pub fn read_pixels(&self) -> Vec<u8> {
        self.pixmap.data().chunks_exact(4).map(|p| p[3]).collect()
    }

    /// Alpha of the pixels inside a rectangle, clipped to the strip.
    pub fn read_rect(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u8> {
        let x1 = (x + width).min(self.width());
        let y1 = (y + height).min(self.height());
        let stride = self.width() as usize * 4;
        let data = self.pixmap.data();
        let mut out = Vec::with_capacity((x1.saturating_sub(x) * y1.saturating_sub(y)) as usize);
        for row in y..y1 {
            let base = row as usize * stride;
            for col in x..x1 {
                out.push(data[base + col as usize * 4 + 3]);
            }
        }
        out
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

impl std::fmt::Debug for Strip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strip")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

// =============================================================================
// Rasterizers
// =============================================================================

/// One word to draw into the strip.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRequest<'a> {
    pub text: &'a str,
    pub font_size: f32,
    pub rotation: f32,
    /// Outline stroke width on each side of the glyphs.
    pub padding: f32,
    /// Cell centre in strip pixels.
    pub center: (f32, f32),
}

pub trait TextRasterizer {
    /// Advance width of `text` set at `font_size`, in pixels.
    fn measure_text_width(&self, text: &str, font_size: f32) -> f32;

    fn line_height(&self, font_size: f32) -> f32 {
        font_size
    }

    /// Draws the request's text centred on its cell centre, rotated and
    /// outlined. Any non-zero alpha counts as occupied.
    fn draw_glyph(&self, strip: &mut Strip, glyph: &GlyphRequest<'_>);
}

fn ink() -> PremultipliedColorU8 {
    ColorU8::from_rgba(0, 0, 0, 255).premultiply()
}

fn centred(width: f32, height: f32, glyph: &GlyphRequest<'_>) -> Transform {
    Transform::from_translate(-width / 2.0, -height / 2.0)
        .post_concat(Transform::from_rotate(glyph.rotation))
        .post_concat(Transform::from_translate(glyph.center.0, glyph.center.1))
}

/// Font-free rasterizer drawing every character as its advance box.
#[derive(Debug, Clone, Copy)]
pub struct BoxRasterizer {
    /// Advance of one character as a fraction of the font size.
    pub advance: f32,
}

impl Default for BoxRasterizer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextRasterizer for BoxRasterizer {
    fn measure_text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().filter(|c| !c.is_whitespace()).count() as f32 * self.advance * font_size
    }

    fn draw_glyph(&self, strip: &mut Strip, glyph: &GlyphRequest<'_>) {
        let width = self.measure_text_width(glyph.text, glyph.font_size) + glyph.padding * 2.0;
        let height = self.line_height(glyph.font_size) + glyph.padding * 2.0;
        let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = false;

        let transform = centred(width, height, glyph);
        strip.pixmap_mut().fill_rect(rect, &paint, transform, None);
    }
}

/// Rasterizer backed by a TrueType/OpenType font.
pub struct FontRasterizer {
    font: Font,
}

impl FontRasterizer {
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| Error::Font(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    fn line_metrics(&self, size: f32) -> fontdue::LineMetrics {
        self.font
            .horizontal_line_metrics(size)
            .unwrap_or(fontdue::LineMetrics {
                ascent: size * 0.8,
                descent: size * -0.2,
                line_gap: 0.0,
                new_line_size: size,
            })
    }

    /// Renders the text unrotated into its own pixmap, dilated by `padding`
    /// pixels to stand in for the outline stroke.
    fn render_line(&self, glyph: &GlyphRequest<'_>) -> Option<Pixmap> {
        let size = glyph.font_size;
        let metrics = self.line_metrics(size);
        let pad = glyph.padding.max(0.0).ceil() as i32;

        let advance = self.measure_text_width(glyph.text, size);
        let width = advance.ceil() as i32 + pad * 2;
        let height = (metrics.ascent - metrics.descent).ceil() as i32 + pad * 2;
        let mut line = Pixmap::new(width.max(1) as u32, height.max(1) as u32)?;

        let color = ink();
        let pixels = line.pixels_mut();
        let baseline = pad as f32 + metrics.ascent;
        let mut pen = pad as f32;

        for ch in glyph.text.chars() {
            let (m, bitmap) = self.font.rasterize(ch, size);
            let left = (pen + m.xmin as f32).round() as i32;
            let top = (baseline - m.height as f32 - m.ymin as f32).round() as i32;

            for gy in 0..m.height {
                for gx in 0..m.width {
                    if bitmap[gy * m.width + gx] <= 10 {
                        continue;
                    }
                    let ox = left + gx as i32;
                    let oy = top + gy as i32;
                    for py in -pad..=pad {
                        for px in -pad..=pad {
                            let (x, y) = (ox + px, oy + py);
                            if x >= 0 && y >= 0 && x < width && y < height {
                                pixels[(y * width + x) as usize] = color;
                            }
                        }
                    }
                }
            }
            pen += m.advance_width;
        }
        Some(line)
    }
}

impl TextRasterizer for FontRasterizer {
    fn measure_text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, font_size).advance_width)
            .sum()
    }

    fn line_height(&self, font_size: f32) -> f32 {
        self.line_metrics(font_size).new_line_size
    }

    fn draw_glyph(&self, strip: &mut Strip, glyph: &GlyphRequest<'_>) {
        let Some(line) = self.render_line(glyph) else {
            log::warn!("Could not allocate a line buffer for {:?}", glyph.text);
            return;
        };
        let transform = centred(line.width() as f32, line.height() as f32, glyph);
        strip
            .pixmap_mut()
            .draw_pixmap(0, 0, line.as_ref(), &PixmapPaint::default(), transform, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(strip: &Strip) -> usize {
        strip.read_pixels().iter().filter(|&&a| a != 0).count()
    }

    #[test]
    fn new_strip_is_transparent() {
        let strip = Strip::new(64, 32).unwrap();
        assert_eq!(strip.read_pixels().len(), 64 * 32);
        assert_eq!(opaque(&strip), 0);
    }

    #[test]
    fn box_rasterizer_fills_advance_box() {
        let mut strip = Strip::new(128, 64).unwrap();
        let raster = BoxRasterizer::default();
        // 2 chars * 0.6 * 10 = 12 wide, 10 tall.
        raster.draw_glyph(
            &mut strip,
            &GlyphRequest {
                text: "ab",
                font_size: 10.0,
                rotation: 0.0,
                padding: 0.0,
                center: (32.0, 16.0),
            },
        );
        assert_eq!(opaque(&strip), 120);
        let cell = strip.read_rect(26, 11, 12, 10);
        assert!(cell.iter().all(|&a| a == 255));
        assert_eq!(strip.read_rect(25, 11, 1, 10), vec![0; 10]);
    }

    #[test]
    fn box_rasterizer_padding_grows_box() {
        let mut strip = Strip::new(128, 64).unwrap();
        let raster = BoxRasterizer::default();
        raster.draw_glyph(
            &mut strip,
            &GlyphRequest {
                text: "ab",
                font_size: 10.0,
                rotation: 0.0,
                padding: 2.0,
                center: (32.0, 16.0),
            },
        );
        assert_eq!(opaque(&strip), 16 * 14);
    }

    #[test]
    fn quarter_turn_swaps_box_extent() {
        let mut strip = Strip::new(128, 128).unwrap();
        let raster = BoxRasterizer::default();
        raster.draw_glyph(
            &mut strip,
            &GlyphRequest {
                text: "abcd",
                font_size: 10.0,
                rotation: 90.0,
                padding: 0.0,
                center: (64.0, 64.0),
            },
        );
        // 24 x 10 box turned upright: 10 wide, 24 tall.
        let column = strip.read_rect(64, 40, 1, 48);
        assert_eq!(column.iter().filter(|&&a| a != 0).count(), 24);
        let row = strip.read_rect(40, 64, 48, 1);
        assert_eq!(row.iter().filter(|&&a| a != 0).count(), 10);
    }

    #[test]
    fn clear_erases_drawn_glyphs() {
        let mut strip = Strip::new(64, 64).unwrap();
        BoxRasterizer::default().draw_glyph(
            &mut strip,
            &GlyphRequest {
                text: "x",
                font_size: 20.0,
                rotation: 0.0,
                padding: 0.0,
                center: (32.0, 32.0),
            },
        );
        assert!(opaque(&strip) > 0);
        strip.clear();
        assert_eq!(opaque(&strip), 0);
    }

    const FONT: &[u8] = include_bytes!("../testdata/fonts/DejaVuSansMono.ttf");

    fn draw_word(raster: &FontRasterizer, padding: f32, rotation: f32) -> Strip {
        let mut strip = Strip::new(256, 128).unwrap();
        raster.draw_glyph(
            &mut strip,
            &GlyphRequest {
                text: "Wordy",
                font_size: 32.0,
                rotation,
                padding,
                center: (128.0, 64.0),
            },
        );
        strip
    }

    #[test]
    fn font_rasterizer_measures_and_draws() {
        let raster = FontRasterizer::from_bytes(FONT).unwrap();
        // Monospaced: five advances of the same width.
        let one = raster.measure_text_width("W", 32.0);
        assert!(one > 10.0);
        assert!((raster.measure_text_width("Wordy", 32.0) - one * 5.0).abs() < 1e-3);
        assert!(raster.line_height(32.0) >= 32.0);

        let strip = draw_word(&raster, 0.0, 0.0);
        let inked = opaque(&strip);
        assert!(inked > 100);
        // Ink stays around the requested centre.
        let outside = opaque(&strip) - strip.read_rect(32, 16, 192, 96).iter().filter(|&&a| a != 0).count();
        assert_eq!(outside, 0);
    }

    #[test]
    fn font_rasterizer_padding_and_rotation() {
        let raster = FontRasterizer::from_bytes(FONT).unwrap();
        let plain = opaque(&draw_word(&raster, 0.0, 0.0));
        assert!(opaque(&draw_word(&raster, 2.0, 0.0)) > plain);

        // Turned upright, the word is taller than it is wide.
        let upright = draw_word(&raster, 0.0, 90.0);
        let column = upright.read_rect(128 - 30, 0, 60, 128);
        assert_eq!(column.iter().filter(|&&a| a != 0).count(), opaque(&upright));
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        assert!(matches!(
            FontRasterizer::from_bytes(b"not a font"),
            Err(Error::Font(_))
        ));
    }
}
