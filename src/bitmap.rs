//! Packed one-bit-per-pixel occupancy bitmaps.
//!
//! Both word sprites and the shared layout surface use this type. Pixels are
//! packed 32 to a `u32`, most significant bit first, so pixel `x` of a row
//! lives in word `x >> 5` at bit `31 - (x & 31)`.

// =============================================================================
// Bitmap
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    stride: usize, // u32 words per row
    data: Vec<u32>,
}

impl Bitmap {
    /// Creates an all-zero bitmap `width` pixels wide and `height` rows tall.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = ((width + 31) >> 5) as usize;
        Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of `u32` words in one row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn words(&self) -> &[u32] {
        &self.data
    }

    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.stride]
    }

    pub fn set(&mut self, x: i32, y: i32) {
        if self.contains(x, y) {
            let idx = y as usize * self.stride + (x as usize >> 5);
            self.data[idx] |= 1 << (31 - (x & 31));
        }
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let idx = y as usize * self.stride + (x as usize >> 5);
        self.data[idx] & (1 << (31 - (x & 31))) != 0
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&w| w == 0)
    }

    pub fn count_ones(&self) -> u32 {
        self.data.iter().map(|w| w.count_ones()).sum()
    }

    /// Returns a copy holding only rows `top..bottom`.
    pub fn crop_rows(&self, top: u32, bottom: u32) -> Bitmap {
        let bottom = bottom.min(self.height);
        let top = top.min(bottom);
        let start = top as usize * self.stride;
        let end = bottom as usize * self.stride;
        Bitmap {
            width: self.width,
            height: bottom - top,
            stride: self.stride,
            data: self.data[start..end].to_vec(),
        }
    }

    /// Tests whether `sprite`, with its top-left pixel at `(x, y)` on this
    /// bitmap, shares any set bit with it.
    ///
    /// Sprite bits that fall outside this bitmap count as a collision.
    pub fn intersects(&self, sprite: &Bitmap, x: i32, y: i32) -> bool {
        let shift = (x & 31) as u32;
        let col_start = (x >> 5) as isize;

        for sy in 0..sprite.height {
            let gy = y + sy as i32;
            let row = sprite.row(sy);

            for (i, mask) in shifted(row, shift) {
                if mask == 0 {
                    continue;
                }
                let gx = col_start + i as isize;
                if gy < 0 || gy >= self.height as i32 || gx < 0 || gx >= self.stride as isize {
                    return true;
                }
                let gx = gx as usize;
                if mask & !self.valid_bits(gx) != 0 {
                    return true;
                }
                if self.data[gy as usize * self.stride + gx] & mask != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// ORs `sprite` into this bitmap with its top-left pixel at `(x, y)`.
    /// Bits landing outside the bitmap are dropped.
    pub fn stamp(&mut self, sprite: &Bitmap, x: i32, y: i32) {
        let shift = (x & 31) as u32;
        let col_start = (x >> 5) as isize;

        for sy in 0..sprite.height {
            let gy = y + sy as i32;
            if gy < 0 || gy >= self.height as i32 {
                continue;
            }
            let row_idx = gy as usize * self.stride;

            for (i, mask) in shifted(sprite.row(sy), shift) {
                let gx = col_start + i as isize;
                if mask != 0 && gx >= 0 && gx < self.stride as isize {
                    let gx = gx as usize;
                    self.data[row_idx + gx] |= mask & self.valid_bits(gx);
                }
            }
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Mask of the bits in column word `gx` that map to real pixels.
    fn valid_bits(&self, gx: usize) -> u32 {
        let tail = self.width & 31;
        if gx + 1 == self.stride && tail != 0 {
            !0u32 << (32 - tail)
        } else {
            !0
        }
    }
}

/// Yields `(column, mask)` for a row shifted right by `shift` bits. One extra
/// column is produced to carry the bits spilling out of the last word.
fn shifted(row: &[u32], shift: u32) -> impl Iterator<Item = (usize, u32)> + '_ {
    let mut carry = 0u32;
    (0..=row.len()).map(move |i| {
        let word = row.get(i).copied().unwrap_or(0);
        let mask = if shift == 0 {
            word
        } else {
            (carry << (32 - shift)) | (word >> shift)
        };
        carry = word;
        (i, mask)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(width: u32, height: u32) -> Bitmap {
        let mut b = Bitmap::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                b.set(x, y);
            }
        }
        b
    }

    #[test]
    fn set_and_get_use_msb_first_packing() {
        let mut b = Bitmap::new(64, 2);
        b.set(0, 0);
        b.set(33, 1);
        assert_eq!(b.stride(), 2);
        assert_eq!(b.words()[0], 0x8000_0000);
        assert_eq!(b.words()[3], 0x4000_0000);
        assert!(b.get(33, 1));
        assert!(!b.get(32, 1));
        // Out of range writes are ignored.
        b.set(-1, 0);
        b.set(64, 0);
        assert_eq!(b.count_ones(), 2);
    }

    #[test]
    fn stamp_aligns_across_word_boundaries() {
        let sprite = block(3, 2);
        for x in [0, 5, 30, 31, 32, 61] {
            let mut surface = Bitmap::new(96, 4);
            surface.stamp(&sprite, x, 1);
            assert_eq!(surface.count_ones(), 6, "x = {x}");
            for dx in 0..3 {
                assert!(surface.get(x + dx, 1));
                assert!(surface.get(x + dx, 2));
            }
            assert!(!surface.get(x + 3, 1));
        }
    }

    #[test]
    fn intersects_detects_single_pixel_overlap() {
        let mut surface = Bitmap::new(128, 16);
        surface.set(40, 5);
        let sprite = block(8, 3);

        assert!(surface.intersects(&sprite, 33, 3));
        assert!(surface.intersects(&sprite, 40, 5));
        assert!(!surface.intersects(&sprite, 41, 5));
        assert!(!surface.intersects(&sprite, 32, 5));
        assert!(!surface.intersects(&sprite, 38, 6));
    }

    #[test]
    fn sprite_bits_outside_surface_collide() {
        let surface = Bitmap::new(40, 10);
        let sprite = block(4, 2);
        assert!(surface.intersects(&sprite, -1, 0));
        assert!(surface.intersects(&sprite, 0, -1));
        assert!(surface.intersects(&sprite, 37, 0));
        assert!(surface.intersects(&sprite, 0, 9));
        assert!(!surface.intersects(&sprite, 36, 8));
    }

    #[test]
    fn empty_sprite_columns_do_not_collide_out_of_range() {
        // A 64px wide sprite whose ink sits in its first word only.
        let mut sprite = Bitmap::new(64, 1);
        sprite.set(0, 0);
        let surface = Bitmap::new(40, 4);
        assert!(!surface.intersects(&sprite, 2, 1));
    }

    #[test]
    fn stamp_then_intersect_round_trip() {
        let mut surface = Bitmap::new(100, 50);
        let sprite = block(20, 10);
        assert!(!surface.intersects(&sprite, 13, 7));
        surface.stamp(&sprite, 13, 7);
        assert!(surface.intersects(&sprite, 13, 7));
        assert!(surface.intersects(&sprite, 32, 16));
        assert!(!surface.intersects(&sprite, 33, 7));
        assert!(!surface.intersects(&sprite, 13, 17));
    }

    #[test]
    fn crop_rows_keeps_selected_rows() {
        let mut b = Bitmap::new(32, 5);
        b.set(1, 1);
        b.set(2, 3);
        let cropped = b.crop_rows(1, 4);
        assert_eq!(cropped.height(), 3);
        assert!(cropped.get(1, 0));
        assert!(cropped.get(2, 2));
        assert_eq!(cropped.count_ones(), 2);
    }

    #[test]
    fn clear_resets_every_bit() {
        let mut b = block(70, 3);
        assert!(!b.is_empty());
        b.clear();
        assert!(b.is_empty());
    }
}
