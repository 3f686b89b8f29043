use crate::{
    Effect, EffectError, EffectResult, EffectSlot, ImageEffect, blur::BlurConfig,
    color_matrix::ColorMatrixConfig, lighting::LightingConfig,
};
use image::RgbaImage;
use log::debug;

/// Non-destructive effect state for one image.
///
/// The original buffer is captured once and never mutated; every render
/// recomposes the full effect chain from it, so toggling any effect off is
/// exact. One effect per slot, last write wins, and the slots compose in a
/// fixed precedence: color matrix, then lighting, then blur.
#[derive(Debug, Clone)]
pub struct EffectSession {
    original: RgbaImage,
    color_matrix: Option<ColorMatrixConfig>,
    lighting: Option<LightingConfig>,
    blur: Option<BlurConfig>,
}

impl EffectSession {
    pub fn new(original: RgbaImage) -> EffectResult<Self> {
        let (width, height) = original.dimensions();
        if width == 0 || height == 0 {
            return Err(EffectError::EmptyImage { width, height });
        }

        Ok(Self {
            original,
            color_matrix: None,
            lighting: None,
            blur: None,
        })
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    /// Enable or disable one effect. Enabling stores the config in the
    /// variant's slot (replacing whatever occupied it); disabling clears
    /// the slot. Both directions are idempotent, and a config that fails
    /// validation leaves the slot untouched.
    pub fn set_effect(&mut self, kind: ImageEffect, enabled: bool) -> EffectResult<()> {
        if enabled {
            self.enable(kind)
        } else {
            self.disable(kind.slot());
            Ok(())
        }
    }

    pub fn enable(&mut self, kind: ImageEffect) -> EffectResult<()> {
        kind.validate()?;
        debug!("enable {} effect", kind.slot().name());

        match kind {
            ImageEffect::ColorMatrix(config) => self.color_matrix = Some(config),
            ImageEffect::Lighting(config) => self.lighting = Some(config),
            ImageEffect::Blur(config) => self.blur = Some(config),
        }

        Ok(())
    }

    /// Clearing an already-empty slot is a no-op.
    pub fn disable(&mut self, slot: EffectSlot) {
        debug!("disable {} effect", slot.name());

        match slot {
            EffectSlot::ColorMatrix => self.color_matrix = None,
            EffectSlot::Lighting => self.lighting = None,
            EffectSlot::Blur => self.blur = None,
        }
    }

    /// Update the parameters of an active effect without changing whether
    /// it is enabled. No-op if the slot is empty.
    pub fn set_parameter(&mut self, kind: ImageEffect) -> EffectResult<()> {
        kind.validate()?;

        match kind {
            ImageEffect::ColorMatrix(config) => {
                if self.color_matrix.is_some() {
                    self.color_matrix = Some(config);
                }
            }
            ImageEffect::Lighting(config) => {
                if self.lighting.is_some() {
                    self.lighting = Some(config);
                }
            }
            ImageEffect::Blur(config) => {
                if self.blur.is_some() {
                    self.blur = Some(config);
                }
            }
        }

        Ok(())
    }

    pub fn active_slots(&self) -> Vec<EffectSlot> {
        let mut slots = Vec::new();
        if self.color_matrix.is_some() {
            slots.push(EffectSlot::ColorMatrix);
        }
        if self.lighting.is_some() {
            slots.push(EffectSlot::Lighting);
        }
        if self.blur.is_some() {
            slots.push(EffectSlot::Blur);
        }
        slots
    }

    pub fn reset(&mut self) {
        debug!("reset all effects");
        self.color_matrix = None;
        self.lighting = None;
        self.blur = None;
    }

    /// Compose every active effect onto a fresh copy of the original.
    /// Fails atomically: on the first error the partial buffer is dropped
    /// and session state is unchanged.
    pub fn render(&self) -> EffectResult<RgbaImage> {
        let mut output = self.original.clone();

        if let Some(config) = &self.color_matrix {
            config.apply(&mut output)?;
        }
        if let Some(config) = &self.lighting {
            config.apply(&mut output)?;
        }
        if let Some(config) = &self.blur {
            config.apply(&mut output)?;
        }

        Ok(output)
    }

    /// The buffer to persist when the user commits: same composite as
    /// `render`.
    pub fn export_final(&self) -> EffectResult<RgbaImage> {
        self.render()
    }
}
