/*!
 * Word cloud layout.
 *
 * Words are counted, sized by frequency, rasterized into packed one-bit
 * sprites and placed one by one along an Archimedean spiral on a shared
 * occupancy bitmap, so no two words ever overlap. The result lists each
 * placed word with its position, rotation and size, plus the bounds of the
 * whole cluster and a transform fitting it to a viewport.
 *
 * ```no_run
 * use wordcloud_layout::{BoxRasterizer, WordCloudBuilder};
 *
 * let cloud = WordCloudBuilder::new()
 *     .size(600, 400)
 *     .font_size_range(20.0, 100.0)
 *     .seed(42)
 *     .build(["cat", "dog", "cat", "cat", "bird"], &BoxRasterizer::default())?;
 * for word in &cloud.words {
 *     println!("{} at ({}, {})", word.text, word.x, word.y);
 * }
 * # Ok::<(), wordcloud_layout::Error>(())
 * ```
 */

pub mod bitmap;
pub mod bounds;
pub mod canvas;
pub mod cloud;
pub mod color;
pub mod error;
pub mod export;
pub mod font_size;
pub mod frequency;
pub mod placement;
pub mod rotation;
pub mod spiral;
pub mod sprite;
pub mod word;

pub use bitmap::Bitmap;
pub use bounds::{Bounds, FitTransform, Margin, Point, Rect, Viewport};
pub use canvas::{BoxRasterizer, FontRasterizer, GlyphRequest, Strip, TextRasterizer};
pub use cloud::{LayoutConfig, PlacedWord, WordCloud, WordCloudBuilder};
pub use color::ColorScheme;
pub use error::{Error, Result};
pub use font_size::{FontSizeMapper, ScaleType};
pub use frequency::{reduce_words, top_words, CategoryValue, StopWords, TokenizeOptions, WordCount};
pub use placement::LayoutContext;
pub use rotation::RotationSettings;
pub use spiral::ArchimedeanSpiral;
pub use sprite::rasterize_batch;
pub use word::{SpriteState, Word};

/// Lays out `values` with the default configuration and the font-free
/// [`BoxRasterizer`].
pub fn generate<I, V>(values: I) -> Result<WordCloud>
where
    I: IntoIterator<Item = V>,
    V: Into<CategoryValue>,
{
    WordCloudBuilder::new().build(values, &BoxRasterizer::default())
}
