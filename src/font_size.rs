/// Transform applied to counts before they are mapped to font sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScaleType {
    #[default]
    Value,
    Sqrt,
    Log,
}

impl ScaleType {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            ScaleType::Value => value,
            ScaleType::Sqrt => value.max(0.0).sqrt(),
            ScaleType::Log => value.max(1.0).ln(),
        }
    }
}

/// Maps word counts linearly onto `[min_font, max_font]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizeMapper {
    min_font: f32,
    max_font: f32,
    scale_type: ScaleType,
    min_weight: f64,
    max_weight: f64,
}

impl FontSizeMapper {
    /// A reversed font range is swapped.
    pub fn new(min_font: f32, max_font: f32, scale_type: ScaleType) -> Self {
        let (min_font, max_font) = if min_font > max_font {
            (max_font, min_font)
        } else {
            (min_font, max_font)
        };
        Self {
            min_font,
            max_font,
            scale_type,
            min_weight: 0.0,
            max_weight: 0.0,
        }
    }

    /// Captures the smallest and largest count of the word set.
    pub fn with_counts(mut self, counts: impl IntoIterator<Item = u32>) -> Self {
        let (lo, hi) = counts
            .into_iter()
            .fold((u32::MAX, 0), |(lo, hi), c| (lo.min(c), hi.max(c)));
        let (lo, hi) = if lo > hi { (1, 1) } else { (lo, hi) };
        self.min_weight = self.scale_type.apply(lo as f64);
        self.max_weight = self.scale_type.apply(hi as f64);
        self
    }

    pub fn min_font(&self) -> f32 {
        self.min_font
    }

    pub fn max_font(&self) -> f32 {
        self.max_font
    }

    pub fn size(&self, count: u32) -> f32 {
        let weight = self.scale_type.apply(count as f64);
        let (min_font, max_font) = (self.min_font as f64, self.max_font as f64);
        let range = self.max_weight - self.min_weight;

        // Raw size against max_font, floored at zero for the smallest count.
        let raw = if weight > self.min_weight && range > 0.0 {
            max_font * (weight - self.min_weight) / range
        } else {
            0.0
        };
        let fraction = if max_font > 0.0 { raw / max_font } else { 0.0 };

        (min_font + fraction.clamp(0.0, 1.0) * (max_font - min_font)) as f32
    }
}
