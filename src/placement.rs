//! Spiral-search placement of word sprites on the shared surface.

use rand::Rng;

use crate::bitmap::Bitmap;
use crate::bounds::Bounds;
use crate::canvas::{Strip, STRIP_SIZE};
use crate::error::{Error, Result};
use crate::spiral::{max_iterations, ArchimedeanSpiral};
use crate::word::{SpriteState, Word};

/// All mutable state of one layout pass: the occupancy surface, the
/// rasterization strip and the running bounds.
#[derive(Debug)]
pub struct LayoutContext {
    width: u32,
    height: u32,
    surface: Bitmap,
    strip: Strip,
    bounds: Option<Bounds>,
    max_iterations: usize,
}

impl LayoutContext {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_strip(width, height, Strip::new(STRIP_SIZE, STRIP_SIZE)?)
    }

    pub fn with_strip(width: u32, height: u32, strip: Strip) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Input(format!(
                "Drawing area must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            surface: Bitmap::new(width, height),
            strip,
            bounds: None,
            max_iterations: max_iterations(width, height),
        })
    }

    /// Overrides the per-word spiral step ceiling.
    pub fn set_max_iterations(&mut self, steps: usize) {
        self.max_iterations = steps.max(1);
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn surface(&self) -> &Bitmap {
        &self.surface
    }

    pub fn strip_mut(&mut self) -> &mut Strip {
        &mut self.strip
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn reset(&mut self) {
        self.surface.clear();
        self.bounds = None;
    }

    /// Places a rasterized word.
    ///
    /// On success the sprite is stamped into the surface and dropped, the
    /// bounds grow to cover the word, and `word.x`/`word.y` hold its centre
    /// in surface pixels. Words without a ready sprite, or for which the
    /// spiral finds no free spot, return `false` and are left unplaced.
    pub fn place<R: Rng + ?Sized>(&mut self, word: &mut Word, rng: &mut R) -> bool {
        let Some(sprite) = word.sprite() else {
            return false;
        };

        let Some((x, y)) = self.find_position(word, sprite, rng) else {
            log::trace!("No position found for {:?}", word.text);
            return false;
        };

        self.surface.stamp(sprite, x + word.x0, y + word.y0);
        word.x = x;
        word.y = y;
        word.sprite = SpriteState::Placed;

        self.bounds = Some(match self.bounds {
            Some(mut bounds) => {
                bounds.update(word);
                bounds
            }
            None => Bounds::from_word(word),
        });
        true
    }

    fn find_position<R: Rng + ?Sized>(
        &self,
        word: &Word,
        sprite: &Bitmap,
        rng: &mut R,
    ) -> Option<(i32, i32)> {
        let (w, h) = (self.width as f64, self.height as f64);
        let start_x = (w * (rng.random::<f64>() + 0.5) / 2.0) as i32;
        let start_y = (h * (rng.random::<f64>() + 0.5) / 2.0) as i32;
        let max_delta = (w * w + h * h).sqrt();
        let dt = if rng.random_bool(0.5) { 1 } else { -1 };

        let spiral = ArchimedeanSpiral::new(self.width, self.height, dt);
        let mut steps = 0;
        for (dx, dy) in spiral.take(self.max_iterations) {
            steps += 1;
            if dx.abs().min(dy.abs()) as f64 >= max_delta {
                break;
            }

            let (x, y) = (start_x + dx, start_y + dy);
            if x + word.x0 < 0
                || y + word.y0 < 0
                || x + word.x1 > self.width as i32
                || y + word.y1 > self.height as i32
            {
                continue;
            }

            let free = match &self.bounds {
                // Nothing placed yet.
                None => true,
                // The bounds cover every stamped bit, so a box outside them
                // cannot collide.
                Some(bounds) => {
                    !bounds.overlaps(&Bounds::of_word_at(word, x, y))
                        || !self.surface.intersects(sprite, x + word.x0, y + word.y0)
                }
            };

            if free {
                log::trace!("Placed {:?} after {} spiral steps", word.text, steps);
                return Some((x, y));
            }
        }

        if steps == self.max_iterations {
            log::debug!(
                "{:?} reached the {}-step spiral ceiling",
                word.text,
                self.max_iterations
            );
        }
        None
    }
}
