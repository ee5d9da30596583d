use rand::Rng;

/// How each word's rotation is chosen before placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSettings {
    pub enabled: bool,
    pub min_angle: f32,
    pub max_angle: f32,
    /// Number of evenly spaced orientations between the two angles. `0`
    /// draws any angle in the range.
    pub quantity: u32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            min_angle: -60.0,
            max_angle: 90.0,
            quantity: 2,
        }
    }
}

impl RotationSettings {
    /// Angle range with a reversed pair swapped.
    pub fn range(&self) -> (f32, f32) {
        if self.min_angle > self.max_angle {
            (self.max_angle, self.min_angle)
        } else {
            (self.min_angle, self.max_angle)
        }
    }

    /// Picks a rotation in degrees.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        let (min, max) = self.range();
        match self.quantity {
            _ if min == max => min,
            0 => min + rng.random::<f32>() * (max - min),
            1 => min,
            n => {
                let step = (max - min) / (n - 1) as f32;
                min + rng.random_range(0..n) as f32 * step
            }
        }
    }
}
