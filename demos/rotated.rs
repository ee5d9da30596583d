use rand::Rng;
use std::fs;
use std::time::Instant;
use wordcloud_layout::{BoxRasterizer, WordCloudBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let values = generate_dense_data();
    println!("Generated {} values.", values.len());

    let start = Instant::now();

    let cloud = WordCloudBuilder::new()
        .size(1000, 800)
        .font_size_range(14.0, 90.0)
        .rotate_text(true)
        .angle_range(-90.0, 0.0)
        .quantity_angles(2)
        .max_words(150)
        .build(values, &BoxRasterizer::default())?;

    fs::write("output_rotated.svg", cloud.to_svg("sans-serif"))?;

    println!(
        "Placed {} words in {:?}, scale {:.2}",
        cloud.words.len(),
        start.elapsed(),
        cloud.fit.scale
    );
    if let Some(bounds) = cloud.bounds {
        println!("Bounds: {:?} .. {:?}", bounds.left, bounds.right);
    }

    Ok(())
}

fn generate_dense_data() -> Vec<String> {
    let mut rng = rand::rng();
    let keywords = [
        "ownership", "lifetimes", "borrowing", "traits", "generics", "iterators", "closures",
        "macros", "async", "unsafe", "cargo", "crates", "modules", "patterns", "enums",
        "structs", "slices", "vectors", "strings", "errors", "testing", "docs", "clippy",
        "rustfmt", "wasm", "embedded", "threads", "channels", "atomics", "allocators",
    ];

    let mut values = Vec::new();
    for (i, word) in keywords.iter().enumerate() {
        let weight = rng.random_range(1..=(keywords.len() - i));
        for _ in 0..weight {
            values.push(word.to_string());
        }
    }
    values
}
