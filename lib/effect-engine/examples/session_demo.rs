use anyhow::Result;
use effect_engine::{
    ImageEffect,
    blur::BlurConfig,
    buffer::PixelBuffer,
    lighting::LightingPreset,
    request::{EffectController, EffectName, EffectRequest},
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

fn main() -> Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // The host hands the engine a decoded bitmap
    let mut controller = EffectController::new();
    controller.initialize(PixelBuffer::from_image(test_image()))?;

    // Panel messages: simulate deuteranopia under evening light, blurred
    controller.handle(EffectRequest::enable(EffectName::Deuteranopia))?;
    controller.handle(EffectRequest::enable_with(
        EffectName::Condition,
        ImageEffect::Lighting(LightingPreset::Evening.config()),
    ))?;
    controller.handle(EffectRequest::enable_with(
        EffectName::Blur,
        ImageEffect::Blur(BlurConfig::new().with_radius(3.0)),
    ))?;

    let preview = controller.render_preview()?;
    preview.save(output_dir.join("session_preview.png"))?;
    println!("✓ Generated session_preview.png");

    // Toggling the matrix off leaves the other effects in place
    controller.handle(EffectRequest::disable(EffectName::Deuteranopia))?;
    let preview = controller.render_preview()?;
    preview.save(output_dir.join("session_no_matrix.png"))?;
    println!("✓ Generated session_no_matrix.png");

    // Commit: the exported buffer goes back to the host encoder
    let exported = controller.export_final()?;
    println!(
        "✓ Exported {}x{} RGBA buffer ({} bytes)",
        exported.width(),
        exported.height(),
        exported.as_bytes().len()
    );

    // Reset reproduces the untouched original
    controller.handle(EffectRequest::Reset)?;
    let restored = controller.render_preview()?;
    restored.save(output_dir.join("session_restored.png"))?;
    println!("✓ Generated session_restored.png");

    println!("\n✓ Session walkthrough finished!");
    println!("  Images saved to: tmp/");

    Ok(())
}
