use crate::{Effect, EffectError, EffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Brightness / contrast / tint adjustment.
///
/// Per channel: `out = clamp(factor * (in - 128) + 128 + brightness + tint, 0, 255)`
/// with `factor = 259 * (contrast + 255) / (255 * (259 - contrast))`.
/// Contrast is clamped to [-100, 100] before the factor is computed, which
/// keeps the denominator away from zero.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct LightingConfig {
    #[derivative(Default(value = "0"))]
    brightness: i32,

    #[derivative(Default(value = "0"))]
    contrast: i32,

    #[derivative(Default(value = "0"))]
    tint_r: i32,

    #[derivative(Default(value = "0"))]
    tint_g: i32,

    #[derivative(Default(value = "0"))]
    tint_b: i32,
}

impl LightingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tint(self, r: i32, g: i32, b: i32) -> Self {
        self.with_tint_r(r).with_tint_g(g).with_tint_b(b)
    }

    pub fn validate(&self) -> EffectResult<()> {
        let deltas = [
            self.brightness,
            self.contrast,
            self.tint_r,
            self.tint_g,
            self.tint_b,
        ];

        if deltas.iter().all(|v| (-255..=255).contains(v)) {
            Ok(())
        } else {
            Err(EffectError::InvalidParameters(
                "lighting deltas must be within [-255, 255]".to_string(),
            ))
        }
    }

    fn contrast_factor(&self) -> f32 {
        let contrast = self.contrast.clamp(-100, 100) as f32;
        (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
    }
}

impl Effect for LightingConfig {
    fn apply(&self, image: &mut RgbaImage) -> EffectResult<()> {
        self.validate()?;

        let factor = self.contrast_factor();
        let deltas = [
            self.brightness + self.tint_r,
            self.brightness + self.tint_g,
            self.brightness + self.tint_b,
        ];

        for pixel in image.pixels_mut() {
            for i in 0..3 {
                let value = factor * (pixel[i] as f32 - 128.0) + 128.0 + deltas[i] as f32;
                pixel[i] = value.clamp(0.0, 255.0).round() as u8;
            }
        }

        Ok(())
    }
}

/// Time-of-day and weather lighting presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum LightingPreset {
    EarlyMorning = 0,
    Morning,
    Midday,
    Afternoon,
    Evening,
    LateEvening,
    UnderStars,
    SunnyDay,
    GloomyDay,
}

impl LightingPreset {
    pub fn name(&self) -> &'static str {
        match self {
            LightingPreset::EarlyMorning => "earlyMorning",
            LightingPreset::Morning => "morning",
            LightingPreset::Midday => "midday",
            LightingPreset::Afternoon => "afternoon",
            LightingPreset::Evening => "evening",
            LightingPreset::LateEvening => "lateEvening",
            LightingPreset::UnderStars => "underStars",
            LightingPreset::SunnyDay => "sunnyDay",
            LightingPreset::GloomyDay => "gloomyDay",
        }
    }

    pub fn from_name(name: &str) -> EffectResult<Self> {
        Self::all_presets()
            .iter()
            .copied()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| EffectError::UnknownEffect(name.to_string()))
    }

    pub fn config(&self) -> LightingConfig {
        match self {
            LightingPreset::EarlyMorning => {
                LightingConfig::new().with_brightness(-20).with_tint(10, 5, 0)
            }
            LightingPreset::Morning => {
                LightingConfig::new().with_brightness(10).with_tint(5, 0, 0)
            }
            LightingPreset::Midday => LightingConfig::new().with_brightness(20),
            LightingPreset::Afternoon => {
                LightingConfig::new().with_brightness(-10).with_tint(10, 0, 0)
            }
            LightingPreset::Evening => {
                LightingConfig::new().with_brightness(-20).with_tint(0, 0, 10)
            }
            LightingPreset::LateEvening => {
                LightingConfig::new().with_brightness(-30).with_tint(0, 0, 20)
            }
            LightingPreset::UnderStars => {
                LightingConfig::new().with_brightness(-50).with_tint(0, 0, 50)
            }
            LightingPreset::SunnyDay => {
                LightingConfig::new().with_brightness(20).with_contrast(20)
            }
            LightingPreset::GloomyDay => {
                LightingConfig::new().with_brightness(-20).with_contrast(-20)
            }
        }
    }

    pub fn all_presets() -> &'static [LightingPreset] {
        &[
            LightingPreset::EarlyMorning,
            LightingPreset::Morning,
            LightingPreset::Midday,
            LightingPreset::Afternoon,
            LightingPreset::Evening,
            LightingPreset::LateEvening,
            LightingPreset::UnderStars,
            LightingPreset::SunnyDay,
            LightingPreset::GloomyDay,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_neutral_config_is_identity() {
        let mut image = RgbaImage::new(3, 2);
        for (i, pixel) in image.pixels_mut().enumerate() {
            *pixel = Rgba([i as u8 * 40, 255 - i as u8 * 40, i as u8, 255]);
        }
        let expected = image.clone();

        LightingConfig::new().apply(&mut image).unwrap();

        assert_eq!(image, expected);
    }

    #[test]
    fn test_brightness_shifts_channels() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([100, 100, 100, 255]));

        LightingConfig::new().with_brightness(20).apply(&mut image).unwrap();

        assert_eq!(image.get_pixel(0, 0), &Rgba([120, 120, 120, 255]));
    }

    #[test]
    fn test_tint_is_per_channel() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([100, 100, 100, 255]));

        LightingConfig::new().with_tint(10, 5, 0).apply(&mut image).unwrap();

        assert_eq!(image.get_pixel(0, 0), &Rgba([110, 105, 100, 255]));
    }

    #[test]
    fn test_contrast_spreads_around_midpoint() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([100, 100, 100, 255]));
        image.put_pixel(1, 0, Rgba([156, 156, 156, 255]));

        LightingConfig::new().with_contrast(50).apply(&mut image).unwrap();

        assert!(image.get_pixel(0, 0)[0] < 100);
        assert!(image.get_pixel(1, 0)[0] > 156);
    }

    #[test]
    fn test_contrast_factor_is_finite_at_extremes() {
        let factor = LightingConfig::new().with_contrast(255).contrast_factor();
        assert!(factor.is_finite());

        let factor = LightingConfig::new().with_contrast(-255).contrast_factor();
        assert!(factor.is_finite() && factor > 0.0);
    }

    #[test]
    fn test_out_of_range_brightness_rejected() {
        let config = LightingConfig::new().with_brightness(300);

        assert!(matches!(
            config.validate(),
            Err(EffectError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_preset_lookup_by_name() {
        let preset = LightingPreset::from_name("underStars").unwrap();
        assert_eq!(preset, LightingPreset::UnderStars);

        assert!(matches!(
            LightingPreset::from_name("midnight"),
            Err(EffectError::UnknownEffect(_))
        ));
    }

    #[test]
    fn test_under_stars_darkens_and_blues() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([128, 128, 128, 255]));

        LightingPreset::UnderStars.config().apply(&mut image).unwrap();

        // brightness -50, tint (0, 0, +50)
        assert_eq!(image.get_pixel(0, 0), &Rgba([78, 78, 128, 255]));
    }

    #[test]
    fn test_all_presets_validate() {
        for preset in LightingPreset::all_presets() {
            assert!(preset.config().validate().is_ok(), "{}", preset.name());
        }
    }
}
