use crate::{Effect, EffectError, EffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Color matrix configuration: `(r',g',b') = M * (r,g,b) + offsets`,
/// channel-wise clamped to [0, 255]. Alpha is untouched.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ColorMatrixConfig {
    #[derivative(Default(value = "[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]"))]
    matrix: [[f32; 3]; 3],

    #[derivative(Default(value = "[0.0, 0.0, 0.0]"))]
    offsets: [f32; 3],
}

impl ColorMatrixConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vision(vision: ColorVision) -> Self {
        Self::new().with_matrix(vision.matrix())
    }

    pub fn validate(&self) -> EffectResult<()> {
        let finite = self.matrix.iter().flatten().all(|v| v.is_finite())
            && self.offsets.iter().all(|v| v.is_finite());

        if finite {
            Ok(())
        } else {
            Err(EffectError::InvalidParameters(
                "color matrix entries must be finite".to_string(),
            ))
        }
    }
}

impl Effect for ColorMatrixConfig {
    fn apply(&self, image: &mut RgbaImage) -> EffectResult<()> {
        self.validate()?;

        for pixel in image.pixels_mut() {
            let r = pixel[0] as f32;
            let g = pixel[1] as f32;
            let b = pixel[2] as f32;

            for (i, row) in self.matrix.iter().enumerate() {
                let value = row[0] * r + row[1] * g + row[2] * b + self.offsets[i];
                pixel[i] = value.clamp(0.0, 255.0).round() as u8;
            }
        }

        Ok(())
    }
}

/// Color-vision simulation matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ColorVision {
    Grayscale = 0,
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

impl ColorVision {
    pub fn name(&self) -> &'static str {
        match self {
            ColorVision::Grayscale => "Grayscale",
            ColorVision::Protanopia => "Protanopia",
            ColorVision::Deuteranopia => "Deuteranopia",
            ColorVision::Tritanopia => "Tritanopia",
        }
    }

    pub fn matrix(&self) -> [[f32; 3]; 3] {
        match self {
            // Luminance weights 0.299/0.587/0.114 on every row
            ColorVision::Grayscale => [
                [0.299, 0.587, 0.114],
                [0.299, 0.587, 0.114],
                [0.299, 0.587, 0.114],
            ],
            ColorVision::Protanopia => [
                [0.567, 0.433, 0.0],
                [0.558, 0.442, 0.0],
                [0.0, 0.242, 0.758],
            ],
            ColorVision::Deuteranopia => [
                [0.625, 0.375, 0.0],
                [0.700, 0.300, 0.0],
                [0.0, 0.300, 0.700],
            ],
            ColorVision::Tritanopia => [
                [0.950, 0.050, 0.0],
                [0.0, 0.433, 0.567],
                [0.0, 0.475, 0.525],
            ],
        }
    }

    pub fn all_visions() -> &'static [ColorVision] {
        &[
            ColorVision::Grayscale,
            ColorVision::Protanopia,
            ColorVision::Deuteranopia,
            ColorVision::Tritanopia,
        ]
    }
}
