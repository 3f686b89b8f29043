use crate::{
    EffectError, EffectResult, EffectSlot, ImageEffect,
    blur::BlurConfig,
    buffer::PixelBuffer,
    color_matrix::{ColorMatrixConfig, ColorVision},
    lighting::LightingConfig,
    session::EffectSession,
};
use image::RgbaImage;
use log::{debug, warn};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::str::FromStr;

/// The closed set of effect names a control surface may address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum EffectName {
    Grayscale = 0,
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Condition,
    Blur,
}

impl EffectName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectName::Grayscale => "grayscale",
            EffectName::Protanopia => "protanopia",
            EffectName::Deuteranopia => "deuteranopia",
            EffectName::Tritanopia => "tritanopia",
            EffectName::Condition => "condition",
            EffectName::Blur => "blur",
        }
    }

    /// The composition slot this name addresses. All four vision names
    /// share the color-matrix slot, so a disable for any one of them
    /// clears whichever matrix is active, not just its own.
    pub fn slot(&self) -> EffectSlot {
        match self {
            EffectName::Grayscale
            | EffectName::Protanopia
            | EffectName::Deuteranopia
            | EffectName::Tritanopia => EffectSlot::ColorMatrix,
            EffectName::Condition => EffectSlot::Lighting,
            EffectName::Blur => EffectSlot::Blur,
        }
    }

    /// The effect a bare `Set` message (no explicit kind) enables.
    pub fn default_kind(&self) -> ImageEffect {
        match self {
            EffectName::Grayscale => {
                ImageEffect::ColorMatrix(ColorMatrixConfig::from_vision(ColorVision::Grayscale))
            }
            EffectName::Protanopia => {
                ImageEffect::ColorMatrix(ColorMatrixConfig::from_vision(ColorVision::Protanopia))
            }
            EffectName::Deuteranopia => {
                ImageEffect::ColorMatrix(ColorMatrixConfig::from_vision(ColorVision::Deuteranopia))
            }
            EffectName::Tritanopia => {
                ImageEffect::ColorMatrix(ColorMatrixConfig::from_vision(ColorVision::Tritanopia))
            }
            EffectName::Condition => ImageEffect::Lighting(LightingConfig::new()),
            EffectName::Blur => ImageEffect::Blur(BlurConfig::new()),
        }
    }
}

impl FromStr for EffectName {
    type Err = EffectError;

    fn from_str(name: &str) -> EffectResult<Self> {
        match name {
            "grayscale" | "complete" => Ok(EffectName::Grayscale),
            "protanopia" | "redGreen" => Ok(EffectName::Protanopia),
            "deuteranopia" => Ok(EffectName::Deuteranopia),
            "tritanopia" | "blueYellow" => Ok(EffectName::Tritanopia),
            "condition" => Ok(EffectName::Condition),
            "blur" => Ok(EffectName::Blur),
            _ => Err(EffectError::UnknownEffect(name.to_string())),
        }
    }
}

/// A self-contained desired-state message from a control surface.
///
/// Messages carry whole states, not deltas, so receiving one twice or
/// receiving messages for independent names in any order converges to the
/// same session state (last write wins per name).
#[derive(Debug, Clone)]
pub enum EffectRequest {
    Set {
        name: EffectName,
        kind: Option<ImageEffect>,
        enabled: bool,
    },
    Reset,
}

impl EffectRequest {
    pub fn enable(name: EffectName) -> Self {
        EffectRequest::Set {
            name,
            kind: None,
            enabled: true,
        }
    }

    pub fn enable_with(name: EffectName, kind: ImageEffect) -> Self {
        EffectRequest::Set {
            name,
            kind: Some(kind),
            enabled: true,
        }
    }

    pub fn disable(name: EffectName) -> Self {
        EffectRequest::Set {
            name,
            kind: None,
            enabled: false,
        }
    }
}

/// Session holder driven by control-surface messages.
///
/// Holds no session until an image arrives; any session-touching call made
/// before `initialize` fails with `NotInitialized` rather than silently
/// doing nothing. Initializing again (new image selected) replaces the
/// session wholesale, clearing all effects.
#[derive(Debug, Default)]
pub struct EffectController {
    session: Option<EffectSession>,
}

impl EffectController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self, buffer: PixelBuffer) -> EffectResult<()> {
        let image = buffer.into_image()?;
        debug!("initialize session: {}x{}", image.width(), image.height());
        self.session = Some(EffectSession::new(image)?);
        Ok(())
    }

    pub fn has_image(&self) -> bool {
        self.session.is_some()
    }

    pub fn handle(&mut self, request: EffectRequest) -> EffectResult<()> {
        let result = self.dispatch(request);
        if let Err(err) = &result {
            warn!("request rejected: {err}");
        }
        result
    }

    fn dispatch(&mut self, request: EffectRequest) -> EffectResult<()> {
        match request {
            EffectRequest::Set {
                name,
                kind,
                enabled,
            } => {
                let kind = match kind {
                    Some(kind) if kind.slot() != name.slot() => {
                        return Err(EffectError::InvalidParameters(format!(
                            "effect \"{}\" does not accept a {} config",
                            name.as_str(),
                            kind.slot().name()
                        )));
                    }
                    Some(kind) => kind,
                    None => name.default_kind(),
                };

                let session = self.session_mut()?;
                if enabled {
                    session.enable(kind)
                } else {
                    session.disable(name.slot());
                    Ok(())
                }
            }
            EffectRequest::Reset => {
                self.session_mut()?.reset();
                Ok(())
            }
        }
    }

    pub fn set_parameter(&mut self, kind: ImageEffect) -> EffectResult<()> {
        self.session_mut()?.set_parameter(kind)
    }

    pub fn render_preview(&self) -> EffectResult<RgbaImage> {
        self.session()?.render()
    }

    pub fn export_final(&self) -> EffectResult<PixelBuffer> {
        let image = self.session()?.export_final()?;
        Ok(PixelBuffer::from_image(image))
    }

    pub fn session(&self) -> EffectResult<&EffectSession> {
        self.session.as_ref().ok_or(EffectError::NotInitialized)
    }

    fn session_mut(&mut self) -> EffectResult<&mut EffectSession> {
        self.session.as_mut().ok_or(EffectError::NotInitialized)
    }
}
