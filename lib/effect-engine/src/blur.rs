use crate::{Effect, EffectError, EffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;

/// Box blur configuration.
///
/// Separable implementation: a horizontal pass followed by a vertical pass,
/// sampling with clamped edges. RGB channels are blurred, alpha is kept.
/// Radius 0 is an identity no-op. The effective radius is capped at the
/// larger image dimension; past that point every extra sample is a clamped
/// edge duplicate.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct BlurConfig {
    #[derivative(Default(value = "5.0"))]
    radius: f32,
}

impl BlurConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> EffectResult<()> {
        if self.radius.is_finite() && self.radius >= 0.0 {
            Ok(())
        } else {
            Err(EffectError::InvalidParameters(format!(
                "blur radius must be finite and non-negative, got {}",
                self.radius
            )))
        }
    }
}

impl Effect for BlurConfig {
    fn apply(&self, image: &mut RgbaImage) -> EffectResult<()> {
        self.validate()?;

        let max_dim = i64::from(image.width().max(image.height()));
        let radius = (self.radius.round() as i64).min(max_dim);
        if radius == 0 {
            return Ok(());
        }

        let width = i64::from(image.width());
        let height = i64::from(image.height());
        let count = (2 * radius + 1) as u64;

        // Horizontal pass
        let mut temp = image.clone();
        for y in 0..height {
            for x in 0..width {
                let mut sums = [0u64; 3];

                for dx in -radius..=radius {
                    let nx = (x + dx).clamp(0, width - 1) as u32;
                    let pixel = image.get_pixel(nx, y as u32);
                    for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                        *sum += channel as u64;
                    }
                }

                let pixel = temp.get_pixel_mut(x as u32, y as u32);
                for (i, sum) in sums.into_iter().enumerate() {
                    pixel[i] = (sum / count) as u8;
                }
            }
        }

        // Vertical pass
        for y in 0..height {
            for x in 0..width {
                let mut sums = [0u64; 3];

                for dy in -radius..=radius {
                    let ny = (y + dy).clamp(0, height - 1) as u32;
                    let pixel = temp.get_pixel(x as u32, ny);
                    for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                        *sum += channel as u64;
                    }
                }

                let pixel = image.get_pixel_mut(x as u32, y as u32);
                for (i, sum) in sums.into_iter().enumerate() {
                    pixel[i] = (sum / count) as u8;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_zero_radius_is_identity() {
        let mut image = RgbaImage::new(3, 3);
        for (i, pixel) in image.pixels_mut().enumerate() {
            *pixel = Rgba([i as u8 * 25, 255 - i as u8 * 25, i as u8, 255]);
        }
        let expected = image.clone();

        BlurConfig::new().with_radius(0.0).apply(&mut image).unwrap();

        assert_eq!(image, expected);
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([80, 120, 200, 255]));
        let expected = image.clone();

        BlurConfig::new().with_radius(5.0).apply(&mut image).unwrap();

        assert_eq!(image, expected);
    }

    #[test]
    fn test_blur_spreads_a_spike() {
        let mut image = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 255]));
        image.put_pixel(2, 2, Rgba([255, 255, 255, 255]));

        BlurConfig::new().with_radius(1.0).apply(&mut image).unwrap();

        let center = image.get_pixel(2, 2);
        let neighbour = image.get_pixel(1, 2);
        assert!(center[0] < 255);
        assert!(neighbour[0] > 0);
        // Corners outside the 3x3 kernel footprint stay black
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_alpha_preserved() {
        let mut image = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 128]));
        image.put_pixel(1, 1, Rgba([200, 200, 200, 128]));

        BlurConfig::new().with_radius(2.0).apply(&mut image).unwrap();

        for pixel in image.pixels() {
            assert_eq!(pixel[3], 128);
        }
    }

    #[test]
    fn test_huge_radius_does_not_overflow() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));

        let config = BlurConfig::new().with_radius(9_000_000.0);
        assert!(config.validate().is_ok());
        config.apply(&mut image).unwrap();

        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_radius_caps_at_image_dimension() {
        let mut gradient = RgbaImage::new(4, 4);
        for (x, y, pixel) in gradient.enumerate_pixels_mut() {
            *pixel = Rgba([x as u8 * 60, y as u8 * 60, 0, 255]);
        }

        let mut capped = gradient.clone();
        BlurConfig::new().with_radius(4.0).apply(&mut capped).unwrap();

        BlurConfig::new()
            .with_radius(1_000_000.0)
            .apply(&mut gradient)
            .unwrap();

        assert_eq!(gradient, capped);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let config = BlurConfig::new().with_radius(-1.0);

        assert!(matches!(
            config.validate(),
            Err(EffectError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_nan_radius_rejected() {
        let config = BlurConfig::new().with_radius(f32::NAN);

        assert!(config.validate().is_err());
    }
}
