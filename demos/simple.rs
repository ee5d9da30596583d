use std::fs;
use std::time::Instant;
use wordcloud_layout::generate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    let values = [
        "Rust performance safety",
        "Rust concurrency fast",
        "Rust memory efficient",
        "safety reliable community",
        "Rust cargo crates macro",
        "performance fast memory",
    ];

    println!("Laying out {} values...", values.len());

    let cloud = generate(values)?;
    for word in &cloud.words {
        println!(
            "{:>12} x{} size {:5.1} at ({:6.1}, {:6.1})",
            word.text, word.count, word.font_size, word.x, word.y
        );
    }

    fs::write("output_simple.svg", cloud.to_svg("sans-serif"))?;

    println!("Done! Saved to output_simple.svg");
    println!("Time elapsed: {:?}", start.elapsed());

    Ok(())
}
