use crate::bitmap::Bitmap;

/// Where a word is in its rasterize/place lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpriteState {
    /// Not rasterized yet.
    #[default]
    Pending,
    /// Rasterized and waiting for placement.
    Ready(Bitmap),
    /// Placed; the sprite has been stamped into the surface and dropped.
    Placed,
    /// Rasterization failed or produced no ink. Never placed.
    Skipped,
}

/// One unique token moving through a layout pass.
///
/// `x`/`y` are the word centre in surface pixels. `x0..x1` and `y0..y1` are
/// its box relative to that centre: horizontally `±width/2`, vertically the
/// trimmed ink rows.
#[derive(Debug, Clone)]
pub struct Word {
    pub text: String,
    pub count: u32,
    pub size: f32,
    pub rotation: f32,
    pub padding: f32,
    pub color: String,

    pub x: i32,
    pub y: i32,

    pub width: u32,
    pub height: u32,
    pub x_off: u32,
    pub y_off: u32,
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    /// Leftmost and one-past-rightmost ink column, relative to the centre.
    pub ink_x0: i32,
    pub ink_x1: i32,

    pub sprite: SpriteState,
}

impl Word {
    pub fn new(text: impl Into<String>, count: u32, size: f32, rotation: f32, padding: f32) -> Self {
        Self {
            text: text.into(),
            count: count.max(1),
            size,
            rotation,
            padding,
            color: String::new(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            x_off: 0,
            y_off: 0,
            x0: 0,
            y0: 0,
            x1: 0,
            y1: 0,
            ink_x0: 0,
            ink_x1: 0,
            sprite: SpriteState::Pending,
        }
    }

    pub fn sprite(&self) -> Option<&Bitmap> {
        match &self.sprite {
            SpriteState::Ready(sprite) => Some(sprite),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.sprite == SpriteState::Pending
    }

    pub fn is_placed(&self) -> bool {
        self.sprite == SpriteState::Placed
    }
}
