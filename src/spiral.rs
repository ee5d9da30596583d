// =============================================================================
// Archimedean Spiral
// =============================================================================

/// Angle advanced per spiral step, in radians.
pub const SPIRAL_STEP: f64 = 0.1;

/// Offset of spiral step `shift` from the spiral centre. The horizontal
/// radius is stretched by `aspect_ratio` so the search follows the canvas
/// shape.
pub fn archimedean_spiral(shift: i64, aspect_ratio: f64) -> (f64, f64) {
    let value = shift as f64 * SPIRAL_STEP;
    (
        aspect_ratio * value * value.cos(),
        value * value.sin(),
    )
}

/// Number of steps after which every spiral offset leaves the canvas.
///
/// An offset stays on the canvas only while `|dx| <= width` and
/// `|dy| <= height`. Since `|dx| = aspect * value * |cos value|`, both hold
/// only while `value <= sqrt(2) * height`. One extra pixel on each axis covers
/// the truncation to integer offsets.
pub fn max_iterations(width: u32, height: u32) -> usize {
    let (w, h) = (width.max(1) as f64, height.max(1) as f64);
    let aspect = w / h;
    let reach = (h + 1.0).max((w + 1.0) / aspect);
    (std::f64::consts::SQRT_2 * reach / SPIRAL_STEP).ceil() as usize + 1
}

/// Integer offsets along the spiral, starting at the centre and walking in
/// direction `dt` (`1` or `-1`).
#[derive(Debug, Clone)]
pub struct ArchimedeanSpiral {
    shift: i64,
    dt: i64,
    aspect_ratio: f64,
}

impl ArchimedeanSpiral {
    pub fn new(width: u32, height: u32, dt: i64) -> Self {
        Self {
            shift: 0,
            dt: if dt < 0 { -1 } else { 1 },
            aspect_ratio: width.max(1) as f64 / height.max(1) as f64,
        }
    }
}

impl Iterator for ArchimedeanSpiral {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let (dx, dy) = archimedean_spiral(self.shift, self.aspect_ratio);
        self.shift += self.dt;
        Some((dx as i32, dy as i32))
    }
}
