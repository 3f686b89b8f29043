use effect_engine::{
    Effect,
    color_matrix::{ColorMatrixConfig, ColorVision},
};
use image::{Rgba, RgbaImage};
use std::path::Path;

fn test_image() -> RgbaImage {
    let mut img = RgbaImage::new(400, 300);

    for y in 0..300 {
        for x in 0..400 {
            let r = (x * 255 / 400) as u8;
            let g = (y * 255 / 300) as u8;
            let b = ((x + y) * 255 / 700) as u8;
            img.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }

    img
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = test_image();

    for vision in ColorVision::all_visions() {
        let mut simulated = img.clone();
        ColorMatrixConfig::from_vision(*vision).apply(&mut simulated)?;

        let filename = format!("vision_{}.png", vision.name().to_lowercase());
        simulated.save(output_dir.join(&filename))?;

        println!("✓ Generated {}", filename);
    }

    println!("\n✓ All color-vision simulations applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
