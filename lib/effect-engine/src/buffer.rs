use crate::{EffectError, EffectResult};
use image::RgbaImage;

/// Raw interleaved 8-bit RGBA bitmap, the exchange type at the host
/// boundary. Invariant: `data.len() == width * height * 4`, checked at
/// construction and never resized afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> EffectResult<Self> {
        if width == 0 || height == 0 {
            return Err(EffectError::EmptyImage { width, height });
        }

        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(EffectError::InvalidParameters(format!(
                "buffer length {} does not match {}x{} RGBA ({} bytes)",
                data.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn into_image(self) -> EffectResult<RgbaImage> {
        let (width, height) = (self.width, self.height);

        RgbaImage::from_raw(width, height, self.data).ok_or_else(|| {
            EffectError::InvalidParameters(format!(
                "buffer does not hold a {width}x{height} RGBA image"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_round_trip_through_image() {
        let buffer = PixelBuffer::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        let image = buffer.clone().into_image().unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([1, 2, 3, 4]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([5, 6, 7, 8]));

        assert_eq!(PixelBuffer::from_image(image), buffer);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            PixelBuffer::from_raw(0, 4, vec![]),
            Err(EffectError::EmptyImage { width: 0, height: 4 })
        ));
        assert!(matches!(
            PixelBuffer::from_raw(4, 0, vec![]),
            Err(EffectError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(matches!(
            PixelBuffer::from_raw(2, 2, vec![0; 15]),
            Err(EffectError::InvalidParameters(_))
        ));
    }
}
