//! Running bounds of placed words and the fit-to-viewport transform.

use crate::word::Word;

// =============================================================================
// Bounds
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned box spanned by every placed word, in surface pixels.
/// `left` holds the minimum corner, `right` the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: Point,
    pub right: Point,
}

impl Bounds {
    /// Box of `word` when centred at `(x, y)`.
    pub fn of_word_at(word: &Word, x: i32, y: i32) -> Self {
        Self {
            left: Point {
                x: x + word.x0,
                y: y + word.y0,
            },
            right: Point {
                x: x + word.x1,
                y: y + word.y1,
            },
        }
    }

    /// Box of `word` at its current position.
    pub fn from_word(word: &Word) -> Self {
        Self::of_word_at(word, word.x, word.y)
    }

    /// Grows the bounds to cover `word`. A word already inside is a no-op.
    pub fn update(&mut self, word: &Word) {
        self.include(&Self::from_word(word));
    }

    pub fn include(&mut self, other: &Bounds) {
        self.left.x = self.left.x.min(other.left.x);
        self.left.y = self.left.y.min(other.left.y);
        self.right.x = self.right.x.max(other.right.x);
        self.right.y = self.right.y.max(other.right.y);
    }

    /// Strict overlap test; boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        other.right.x > self.left.x
            && other.left.x < self.right.x
            && other.right.y > self.left.y
            && other.left.y < self.right.y
    }

    pub fn width(&self) -> i32 {
        (self.right.x - self.left.x).abs()
    }

    pub fn height(&self) -> i32 {
        (self.right.y - self.left.y).abs()
    }

    pub fn to_rect(&self) -> Rect {
        Rect {
            x0: self.left.x as f32,
            y0: self.left.y as f32,
            x1: self.right.x as f32,
            y1: self.right.y as f32,
        }
    }
}

// =============================================================================
// Fit Transform
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

/// Uniform scale then translation mapping layout coordinates onto the
/// viewport: `screen = layout * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for FitTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl FitTransform {
    /// Uniform scale from the placed words' border, `min(vw / |border w|,
    /// vh / |border h|)`, then a translation centring the scaled `rendered`
    /// box inside the viewport minus margins. A zero border extent does not
    /// constrain the scale.
    pub fn fit(border: Rect, rendered: Rect, viewport: Viewport, margin: Margin) -> Self {
        let (bw, bh) = (border.width(), border.height());
        let scale_x = if bw > 0.0 { viewport.width / bw } else { f32::INFINITY };
        let scale_y = if bh > 0.0 { viewport.height / bh } else { f32::INFINITY };
        let mut scale = scale_x.min(scale_y);
        if !scale.is_finite() || scale <= 0.0 {
            scale = 1.0;
        }

        let avail_w = viewport.width - margin.left - margin.right;
        let avail_h = viewport.height - margin.top - margin.bottom;
        let left = rendered.x0.min(rendered.x1);
        let top = rendered.y0.min(rendered.y1);
        Self {
            scale,
            translate_x: margin.left + (avail_w - rendered.width() * scale) / 2.0 - left * scale,
            translate_y: margin.top + (avail_h - rendered.height() * scale) / 2.0 - top * scale,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn boxed(x: i32, y: i32, half_w: i32, half_h: i32) -> Word {
        let mut word = Word::new("w", 1, 10.0, 0.0, 0.0);
        word.x = x;
        word.y = y;
        word.x0 = -half_w;
        word.x1 = half_w;
        word.y0 = -half_h;
        word.y1 = half_h;
        word
    }

    #[test]
    fn update_grows_to_cover_words() {
        let mut bounds = Bounds::from_word(&boxed(100, 100, 16, 5));
        bounds.update(&boxed(150, 80, 32, 10));
        assert_eq!(
            bounds,
            Bounds {
                left: Point { x: 84, y: 70 },
                right: Point { x: 182, y: 105 },
            }
        );
        assert_eq!((bounds.width(), bounds.height()), (98, 35));
    }

    #[test]
    fn update_is_idempotent() {
        let word = boxed(40, 60, 16, 8);
        let mut bounds = Bounds::from_word(&boxed(0, 0, 16, 8));
        bounds.update(&word);
        let once = bounds;
        bounds.update(&word);
        bounds.update(&word);
        assert_eq!(bounds, once);
    }

    #[test]
    fn overlap_is_strict() {
        let a = Bounds::from_word(&boxed(50, 50, 10, 10));
        assert!(a.overlaps(&Bounds::from_word(&boxed(65, 55, 10, 10))));
        // Touching edges.
        assert!(!a.overlaps(&Bounds::from_word(&boxed(70, 50, 10, 10))));
        assert!(!a.overlaps(&Bounds::from_word(&boxed(50, 70, 10, 10))));
    }

    #[test]
    fn fit_scale_comes_from_border() {
        let border = Rect {
            x0: 0.0,
            y0: 0.0,
            x1: 100.0,
            y1: 50.0,
        };
        // Ink is narrower than the border; it only decides the centring.
        let rendered = Rect {
            x0: -40.0,
            y0: -10.0,
            x1: 40.0,
            y1: 10.0,
        };
        let viewport = Viewport {
            width: 210.0,
            height: 210.0,
        };
        let fit = FitTransform::fit(border, rendered, viewport, Margin::uniform(5.0));
        // min(210 / 100, 210 / 50)
        assert_eq!(fit.scale, 2.1);

        let (x0, y0) = fit.apply(rendered.x0, rendered.y0);
        let (x1, y1) = fit.apply(rendered.x1, rendered.y1);
        assert!(((x0 + x1) / 2.0 - 105.0).abs() < 1e-3);
        assert!(((y0 + y1) / 2.0 - 105.0).abs() < 1e-3);
    }

    #[test]
    fn uneven_margins_shift_the_centre() {
        let rect = Rect {
            x0: -10.0,
            y0: -10.0,
            x1: 10.0,
            y1: 10.0,
        };
        let margin = Margin {
            top: 0.0,
            right: 0.0,
            bottom: 20.0,
            left: 40.0,
        };
        let viewport = Viewport {
            width: 100.0,
            height: 100.0,
        };
        let fit = FitTransform::fit(rect, rect, viewport, margin);
        assert_eq!(fit.scale, 5.0);
        // Margin box is 40..100 by 0..80.
        assert_eq!(fit.apply(0.0, 0.0), (70.0, 40.0));
    }

    #[test]
    fn degenerate_border_keeps_unit_scale() {
        let rect = Rect {
            x0: 3.0,
            y0: 4.0,
            x1: 3.0,
            y1: 4.0,
        };
        let fit = FitTransform::fit(
            rect,
            rect,
            Viewport {
                width: 100.0,
                height: 100.0,
            },
            Margin::uniform(0.0),
        );
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.apply(3.0, 4.0), (50.0, 50.0));
    }

    proptest! {
        #[test]
        fn prop_update_is_idempotent(
            words in proptest::collection::vec(
                (-500i32..500, -500i32..500, 0i32..64, 0i32..64),
                1..12,
            ),
            repeat in 0usize..12,
        ) {
            let words: Vec<Word> = words
                .into_iter()
                .map(|(x, y, hw, hh)| boxed(x, y, hw, hh))
                .collect();
            let mut bounds = Bounds::from_word(&words[0]);
            for word in &words {
                bounds.update(word);
            }
            let grown = bounds;

            let again = &words[repeat % words.len()];
            bounds.update(again);
            bounds.update(again);
            prop_assert_eq!(bounds, grown);
            for word in &words {
                let b = Bounds::from_word(word);
                prop_assert!(grown.left.x <= b.left.x && grown.left.y <= b.left.y);
                prop_assert!(grown.right.x >= b.right.x && grown.right.y >= b.right.y);
            }
        }
    }
}
