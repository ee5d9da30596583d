//! Sprite rasterization.
//!
//! Words are shelf-packed into the shared [`Strip`], drawn, and read back in
//! one pass per batch. Each word's cell is then packed into a [`Bitmap`]
//! sprite and trimmed to its inked rows.

use crate::bitmap::Bitmap;
use crate::canvas::{GlyphRequest, Strip, TextRasterizer};
use crate::word::{SpriteState, Word};

/// Cell size for a word: the rotated box of its measured text, width rounded
/// up to a multiple of 32.
pub fn cell_size<T: TextRasterizer + ?Sized>(word: &Word, rasterizer: &T) -> (u32, u32) {
    // The trailing "m" leaves room for the outline stroke and overhangs.
    let label = format!("{}m", word.text);
    let mut w = rasterizer.measure_text_width(&label, word.size) as f64 + word.padding as f64 * 2.0;
    let mut h = (word.size as f64 * 2.0).max(rasterizer.line_height(word.size) as f64)
        + word.padding as f64 * 2.0;

    if word.rotation != 0.0 {
        let (sr, cr) = (word.rotation as f64).to_radians().sin_cos();
        let (wcr, wsr, hcr, hsr) = (w * cr, w * sr, h * cr, h * sr);
        w = (wcr + hsr).abs().max((wcr - hsr).abs());
        h = (wsr + hcr).abs().max((wsr - hcr).abs());
    }

    // Absorb trig noise so a quarter turn does not gain a pixel.
    let w = ((w - 1e-6).ceil().max(1.0) / 32.0).ceil() * 32.0;
    let h = (h - 1e-6).ceil().max(1.0);
    (clamp_extent(w), clamp_extent(h))
}

/// Largest cell edge reported; anything bigger cannot fit a strip anyway.
const MAX_CELL: u32 = 1 << 30;

fn clamp_extent(px: f64) -> u32 {
    if px.is_nan() || px >= MAX_CELL as f64 {
        MAX_CELL
    } else {
        px as u32
    }
}

/// Rasterizes one batch of words starting at `start`.
///
/// Only pending words are drawn. The batch ends when the strip is full or the
/// list runs out; the return value is how many words were consumed, so the
/// next batch starts at `start + consumed`. Always consumes at least one word
/// while any remain.
pub fn rasterize_batch<T: TextRasterizer + ?Sized>(
    words: &mut [Word],
    start: usize,
    strip: &mut Strip,
    rasterizer: &T,
) -> usize {
    strip.clear();
    let strip_w = strip.width();
    let strip_h = strip.height();

    let (mut x, mut y, mut row_h) = (0u32, 0u32, 0u32);
    let mut drawn = Vec::new();
    let mut di = start;

    while di < words.len() {
        let word = &mut words[di];
        if !word.is_pending() {
            di += 1;
            continue;
        }

        let (w, h) = cell_size(word, rasterizer);
        if w > strip_w || h > strip_h {
            log::warn!(
                "Skipping {:?}: {}x{} cell does not fit the {}x{} strip",
                word.text,
                w,
                h,
                strip_w,
                strip_h
            );
            word.sprite = SpriteState::Skipped;
            di += 1;
            continue;
        }

        if x + w > strip_w {
            x = 0;
            y += row_h;
            row_h = 0;
        }
        if y + h > strip_h {
            break;
        }
        row_h = row_h.max(h);

        rasterizer.draw_glyph(
            strip,
            &GlyphRequest {
                text: &word.text,
                font_size: word.size,
                rotation: word.rotation,
                padding: word.padding,
                center: ((x + w / 2) as f32, (y + h / 2) as f32),
            },
        );

        word.width = w;
        word.height = h;
        word.x_off = x;
        word.y_off = y;
        word.x1 = (w >> 1) as i32;
        word.x0 = -word.x1;
        word.y0 = -((h >> 1) as i32);
        word.y1 = word.y0 + h as i32;
        drawn.push(di);

        x += w;
        di += 1;
    }

    let pixels = strip.read_pixels();
    for &i in &drawn {
        extract_sprite(&mut words[i], &pixels, strip_w);
    }

    log::trace!(
        "Rasterized {} of {} words in strip batch at {}",
        drawn.len(),
        di - start,
        start
    );
    di - start
}

/// Packs a drawn word's cell into its sprite and trims empty rows off both
/// ends, adjusting `y0`, `y1` and `height` to the inked extent.
fn extract_sprite(word: &mut Word, pixels: &[u8], strip_w: u32) {
    let mut cell = Bitmap::new(word.width, word.height);
    let mut first_row = None;
    let mut last_row = 0;
    let mut min_col = u32::MAX;
    let mut max_col = 0;

    for j in 0..word.height {
        let base = ((word.y_off + j) * strip_w + word.x_off) as usize;
        let mut seen = false;
        for i in 0..word.width {
            if pixels[base + i as usize] != 0 {
                cell.set(i as i32, j as i32);
                seen = true;
                min_col = min_col.min(i);
                max_col = max_col.max(i);
            }
        }
        if seen {
            first_row.get_or_insert(j);
            last_row = j;
        }
    }

    let Some(first_row) = first_row else {
        log::debug!("No ink rasterized for {:?}, skipping", word.text);
        word.sprite = SpriteState::Skipped;
        return;
    };

    let sprite = cell.crop_rows(first_row, last_row + 1);
    word.y0 += first_row as i32;
    word.height = sprite.height();
    word.y1 = word.y0 + word.height as i32;
    word.ink_x0 = word.x0 + min_col as i32;
    word.ink_x1 = word.x0 + max_col as i32 + 1;
    word.sprite = SpriteState::Ready(sprite);
}
