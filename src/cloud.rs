//! Layout orchestration and the builder-style public API.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bounds::{Bounds, FitTransform, Margin, Rect, Viewport};
use crate::canvas::{Strip, TextRasterizer, STRIP_SIZE};
use crate::color::{color_for_rank, ColorScheme};
use crate::error::{Error, Result};
use crate::font_size::{FontSizeMapper, ScaleType};
use crate::frequency::{reduce_words, top_words, CategoryValue, StopWords, TokenizeOptions};
use crate::placement::LayoutContext;
use crate::rotation::RotationSettings;
use crate::sprite::rasterize_batch;
use crate::word::Word;

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub scale_type: ScaleType,
    pub rotation: RotationSettings,
    pub padding: f32,
    pub max_words: usize,
    pub tokenize: TokenizeOptions,
    /// Overrides the spiral step ceiling derived from the canvas size.
    pub max_iterations: Option<usize>,
    /// Fit target; `None` fits to the drawing area.
    pub viewport: Option<Viewport>,
    pub margin: Margin,
    pub colors: Vec<String>,
    pub background: String,
    pub strip_size: u32,
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            min_font_size: 20.0,
            max_font_size: 100.0,
            scale_type: ScaleType::Value,
            rotation: RotationSettings::default(),
            padding: 1.0,
            max_words: 200,
            tokenize: TokenizeOptions::new(),
            max_iterations: None,
            viewport: None,
            margin: Margin::default(),
            colors: ColorScheme::Ocean.palette(),
            background: "#FFFFFF".into(),
            strip_size: STRIP_SIZE,
            seed: None,
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// A word that found a spot. `x`/`y` are its centre relative to the centre
/// of the drawing area; `x0..x1`, `y0..y1` its box around that centre.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: u32,
    pub font_size: f32,
    pub rotation: f32,
    pub x: f32,
    pub y: f32,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub color: String,
    ink_x0: f32,
    ink_x1: f32,
}

impl PlacedWord {
    /// Box in drawing-area pixels, origin at the top-left corner.
    pub fn surface_box(&self, width: u32, height: u32) -> Rect {
        let (cx, cy) = (self.x + (width / 2) as f32, self.y + (height / 2) as f32);
        Rect {
            x0: cx + self.x0,
            y0: cy + self.y0,
            x1: cx + self.x1,
            y1: cy + self.y1,
        }
    }

    /// Box of the drawn ink, centre-relative like `x`/`y`.
    pub fn ink_box(&self) -> Rect {
        Rect {
            x0: self.x + self.ink_x0,
            y0: self.y + self.y0,
            x1: self.x + self.ink_x1,
            y1: self.y + self.y1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub words: Vec<PlacedWord>,
    /// Extent of all placed words in drawing-area pixels. `None` when nothing
    /// was placed.
    pub bounds: Option<Bounds>,
    /// Extent of the drawn ink, centre-relative.
    pub rendered: Option<Rect>,
    pub viewport: Viewport,
    pub fit: FitTransform,
}

impl WordCloud {
    fn empty(width: u32, height: u32, background: String, viewport: Viewport) -> Self {
        Self {
            width,
            height,
            background,
            words: Vec::new(),
            bounds: None,
            rendered: None,
            viewport,
            fit: FitTransform::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct WordCloudBuilder {
    config: LayoutConfig,
}

impl WordCloudBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn font_size_range(mut self, min: f32, max: f32) -> Self {
        self.config.min_font_size = min;
        self.config.max_font_size = max;
        self
    }

    pub fn scale_type(mut self, scale_type: ScaleType) -> Self {
        self.config.scale_type = scale_type;
        self
    }

    pub fn rotate_text(mut self, enabled: bool) -> Self {
        self.config.rotation.enabled = enabled;
        self
    }

    pub fn angle_range(mut self, min: f32, max: f32) -> Self {
        self.config.rotation.min_angle = min;
        self.config.rotation.max_angle = max;
        self
    }

    pub fn quantity_angles(mut self, quantity: u32) -> Self {
        self.config.rotation.quantity = quantity;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.config.padding = padding.max(0.0);
        self
    }

    pub fn max_words(mut self, max: usize) -> Self {
        self.config.max_words = max;
        self
    }

    pub fn split_words(mut self, split: bool) -> Self {
        self.config.tokenize.split_words = split;
        self
    }

    pub fn strip_punctuation(mut self, strip: bool) -> Self {
        self.config.tokenize.strip_punctuation = strip;
        self
    }

    pub fn stop_words(mut self, stop_words: StopWords) -> Self {
        self.config.tokenize.stop_words = stop_words;
        self
    }

    pub fn max_iterations(mut self, steps: usize) -> Self {
        self.config.max_iterations = Some(steps);
        self
    }

    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.config.viewport = Some(Viewport { width, height });
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.config.margin = margin;
        self
    }

    pub fn color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.config.colors = scheme.palette();
        self
    }

    pub fn colors(mut self, colors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.colors = colors.into_iter().map(|c| c.into()).collect();
        if self.config.colors.is_empty() {
            self.config.colors = ColorScheme::Ocean.palette();
        }
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.config.background = color.into();
        self
    }

    pub fn strip_size(mut self, size: u32) -> Self {
        self.config.strip_size = size;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Lays out `values` using the configured seed, or OS entropy without one.
    pub fn build<I, V, T>(&self, values: I, rasterizer: &T) -> Result<WordCloud>
    where
        I: IntoIterator<Item = V>,
        V: Into<CategoryValue>,
        T: TextRasterizer + ?Sized,
    {
        let mut rng = match self.config.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        self.build_with_rng(values, rasterizer, &mut rng)
    }

    /// Lays out `values` drawing all randomness from `rng`.
    pub fn build_with_rng<I, V, T, R>(
        &self,
        values: I,
        rasterizer: &T,
        rng: &mut R,
    ) -> Result<WordCloud>
    where
        I: IntoIterator<Item = V>,
        V: Into<CategoryValue>,
        T: TextRasterizer + ?Sized,
        R: Rng + ?Sized,
    {
        let config = &self.config;
        let viewport = config.viewport.unwrap_or(Viewport {
            width: config.width as f32,
            height: config.height as f32,
        });

        let counts = reduce_words(values, &config.tokenize);
        let counts = top_words(counts, config.max_words);
        log::debug!("Reduced input to {} words", counts.len());

        if counts.is_empty() {
            if config.width == 0 || config.height == 0 {
                return Err(Error::Input(format!(
                    "Drawing area must be non-empty, got {}x{}",
                    config.width, config.height
                )));
            }
            return Ok(WordCloud::empty(
                config.width,
                config.height,
                config.background.clone(),
                viewport,
            ));
        }

        let strip = Strip::new(config.strip_size, config.strip_size)?;
        let mut ctx = LayoutContext::with_strip(config.width, config.height, strip)?;
        if let Some(steps) = config.max_iterations {
            ctx.set_max_iterations(steps);
        }

        let mapper = FontSizeMapper::new(config.min_font_size, config.max_font_size, config.scale_type)
            .with_counts(counts.iter().map(|c| c.count));

        let mut words: Vec<Word> = counts
            .into_iter()
            .enumerate()
            .map(|(rank, wc)| {
                let size = mapper.size(wc.count);
                let rotation = config.rotation.choose(rng);
                let mut word = Word::new(wc.text, wc.count, size, rotation, config.padding);
                word.color = color_for_rank(&config.colors, rank);
                word
            })
            .collect();

        let mut placed = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            if words[i].is_pending() {
                rasterize_batch(&mut words, i, ctx.strip_mut(), rasterizer);
            }
            if ctx.place(&mut words[i], rng) {
                placed.push(i);
            }
        }
        log::debug!(
            "Placed {} of {} words on {}x{}",
            placed.len(),
            words.len(),
            config.width,
            config.height
        );

        let (half_w, half_h) = ((config.width / 2) as i32, (config.height / 2) as i32);
        let words: Vec<PlacedWord> = placed
            .into_iter()
            .map(|i| {
                let w = &words[i];
                PlacedWord {
                    text: w.text.clone(),
                    count: w.count,
                    font_size: w.size,
                    rotation: w.rotation,
                    x: (w.x - half_w) as f32,
                    y: (w.y - half_h) as f32,
                    x0: w.x0 as f32,
                    y0: w.y0 as f32,
                    x1: w.x1 as f32,
                    y1: w.y1 as f32,
                    color: w.color.clone(),
                    ink_x0: w.ink_x0 as f32,
                    ink_x1: w.ink_x1 as f32,
                }
            })
            .collect();

        let rendered = words
            .iter()
            .map(PlacedWord::ink_box)
            .reduce(|a, b| a.union(&b));
        let bounds = ctx.bounds().copied();
        let fit = match (bounds, rendered) {
            (Some(border), Some(rect)) => {
                FitTransform::fit(border.to_rect(), rect, viewport, config.margin)
            }
            _ => FitTransform::default(),
        };
        log::debug!("Fit transform {:?}", fit);

        Ok(WordCloud {
            width: config.width,
            height: config.height,
            background: config.background.clone(),
            words,
            bounds,
            rendered,
            viewport,
            fit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::BoxRasterizer;
    use pretty_assertions::assert_eq;

    fn builder() -> WordCloudBuilder {
        WordCloudBuilder::new().size(400, 300).strip_size(512).seed(17)
    }

    #[test]
    fn empty_input_is_an_empty_cloud() {
        let none: [&str; 0] = [];
        let cloud = builder().build(none, &BoxRasterizer::default()).unwrap();
        assert!(cloud.is_empty());
        assert!(cloud.bounds.is_none());
        assert!(cloud.rendered.is_none());
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let result = builder().size(0, 100).build(["word"], &BoxRasterizer::default());
        assert!(matches!(result, Err(Error::Input(_))));
    }

    #[test]
    fn most_frequent_words_are_placed_first() {
        let cloud = builder()
            .build(["b a", "a c", "a b"], &BoxRasterizer::default())
            .unwrap();
        let texts: Vec<&str> = cloud.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(cloud.words[0].font_size, 100.0);
        assert_eq!(cloud.words[2].font_size, 20.0);
    }

    #[test]
    fn max_words_limits_output() {
        let cloud = builder()
            .max_words(2)
            .build(["one two three", "one two", "one"], &BoxRasterizer::default())
            .unwrap();
        assert_eq!(cloud.words.len(), 2);
    }

    #[test]
    fn colors_follow_rank() {
        let cloud = builder()
            .colors(["#111111", "#222222"])
            .build(["x x x", "y y", "z"], &BoxRasterizer::default())
            .unwrap();
        let colors: Vec<&str> = cloud.words.iter().map(|w| w.color.as_str()).collect();
        assert_eq!(colors, vec!["#111111", "#222222", "#111111"]);
    }

    #[test]
    fn rotation_follows_settings() {
        let cloud = builder()
            .rotate_text(true)
            .angle_range(90.0, -90.0)
            .quantity_angles(2)
            .build(["north south east west"], &BoxRasterizer::default())
            .unwrap();
        assert!(!cloud.is_empty());
        for word in &cloud.words {
            assert!(word.rotation == -90.0 || word.rotation == 90.0);
        }
    }

    #[test]
    fn fit_scale_follows_word_border() {
        let cloud = builder()
            .viewport(200.0, 100.0)
            .margin(Margin::uniform(10.0))
            .build(["fit fit words", "border"], &BoxRasterizer::default())
            .unwrap();
        let border = cloud.bounds.unwrap();
        let expected = (200.0 / border.width() as f32).min(100.0 / border.height() as f32);
        assert!((cloud.fit.scale - expected).abs() < 1e-6);

        // The ink box is centred in the margin box.
        let rect = cloud.rendered.unwrap();
        let (x0, y0) = cloud.fit.apply(rect.x0, rect.y0);
        let (x1, y1) = cloud.fit.apply(rect.x1, rect.y1);
        assert!(((x0 + x1) / 2.0 - 100.0).abs() < 1e-3);
        assert!(((y0 + y1) / 2.0 - 50.0).abs() < 1e-3);
    }

    #[test]
    fn huge_font_sizes_are_skipped_not_fatal() {
        let cloud = builder()
            .font_size_range(20.0, 1e10)
            .build(["big big small"], &BoxRasterizer::default())
            .unwrap();
        let texts: Vec<&str> = cloud.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["small"]);
    }

    #[test]
    fn narrow_canvas_gives_up_on_unplaceable_words() {
        let cloud = builder()
            .size(8, 8000)
            .build(["alpha beta gamma delta"], &BoxRasterizer::default())
            .unwrap();
        assert!(cloud.is_empty());
        assert!(cloud.bounds.is_none());
    }

    #[test]
    fn same_seed_reproduces_layout() {
        let values = ["alpha beta gamma", "beta gamma", "gamma"];
        let a = builder().build(values, &BoxRasterizer::default()).unwrap();
        let b = builder().build(values, &BoxRasterizer::default()).unwrap();
        assert_eq!(a.words, b.words);
    }
}
