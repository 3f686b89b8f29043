pub mod blur;
pub mod buffer;
pub mod color_matrix;
pub mod lighting;
pub mod request;
pub mod session;

use image::RgbaImage;

pub type EffectResult<T> = Result<T, EffectError>;

#[derive(thiserror::Error, Debug)]
pub enum EffectError {
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameters(String),
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
    #[error("No image loaded")]
    NotInitialized,
}

pub trait Effect {
    fn apply(&self, image: &mut RgbaImage) -> EffectResult<()>;
}

/// The closed set of transforms the engine composes.
#[derive(Debug, Clone)]
pub enum ImageEffect {
    ColorMatrix(color_matrix::ColorMatrixConfig),
    Lighting(lighting::LightingConfig),
    Blur(blur::BlurConfig),
}

impl ImageEffect {
    /// The composition slot this effect occupies. One effect per slot;
    /// slot order is the render precedence.
    pub fn slot(&self) -> EffectSlot {
        match self {
            ImageEffect::ColorMatrix(_) => EffectSlot::ColorMatrix,
            ImageEffect::Lighting(_) => EffectSlot::Lighting,
            ImageEffect::Blur(_) => EffectSlot::Blur,
        }
    }

    pub fn validate(&self) -> EffectResult<()> {
        match self {
            ImageEffect::ColorMatrix(config) => config.validate(),
            ImageEffect::Lighting(config) => config.validate(),
            ImageEffect::Blur(config) => config.validate(),
        }
    }
}

impl Effect for ImageEffect {
    fn apply(&self, image: &mut RgbaImage) -> EffectResult<()> {
        match self {
            ImageEffect::ColorMatrix(config) => config.apply(image),
            ImageEffect::Lighting(config) => config.apply(image),
            ImageEffect::Blur(config) => config.apply(image),
        }
    }
}

/// Fixed composition slots, in render precedence order: color adjustments
/// run on untouched color data, lighting follows, blur smooths last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EffectSlot {
    ColorMatrix,
    Lighting,
    Blur,
}

impl EffectSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EffectSlot::ColorMatrix => "color matrix",
            EffectSlot::Lighting => "lighting",
            EffectSlot::Blur => "blur",
        }
    }
}
