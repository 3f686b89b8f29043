use effect_engine::{Effect, lighting::LightingPreset};
use image::{Rgba, RgbaImage};
use std::path::Path;

fn test_image() -> RgbaImage {
    let mut img = RgbaImage::new(400, 300);

    for y in 0..300 {
        for x in 0..400 {
            let r = (x * 255 / 400) as u8;
            let g = 160;
            let b = (y * 255 / 300) as u8;
            img.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }

    img
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = test_image();

    for preset in LightingPreset::all_presets() {
        let mut lit = img.clone();
        preset.config().apply(&mut lit)?;

        let filename = format!("lighting_{}.png", preset.name());
        lit.save(output_dir.join(&filename))?;

        println!("✓ Generated {}", filename);
    }

    println!("\n✓ All lighting presets applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
