use std::env;
use std::fs;
use wordcloud_layout::{FontRasterizer, Margin, ScaleType, StopWords, WordCloudBuilder};

/// Usage: advanced <font.ttf>
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let font_path = env::args()
        .nth(1)
        .ok_or("pass the path of a .ttf/.otf font as the first argument")?;
    let font_data = fs::read(font_path)?;
    let rasterizer = FontRasterizer::from_bytes(&font_data)?;

    let values = [
        "The custom colors of the layout",
        "A fixed seed gives a fixed layout",
        "Colors, seed, layout and fonts",
        "fonts fonts fonts",
    ];

    let cloud = WordCloudBuilder::new()
        .size(600, 400)
        .background("#1a1a1a")
        .colors(vec!["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#00FFFF"])
        .seed(42)
        .font_size_range(20.0, 100.0)
        .scale_type(ScaleType::Sqrt)
        .strip_punctuation(true)
        .stop_words(StopWords::Default)
        .margin(Margin::uniform(10.0))
        .build(values, &rasterizer)?;

    fs::write("output_advanced.png", cloud.to_png(&font_data, 1.0)?)?;
    println!("Placed {} words: output_advanced.png", cloud.words.len());

    Ok(())
}
