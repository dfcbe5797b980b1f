//! One mounted scan effect: controller, draw parameters and texture state.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::controller::ProgressController;
use crate::error::Result;
use crate::pointer::PointerSample;
use crate::style::{EffectParams, ScanUniforms};

/// Readiness of the image and depth textures, as reported by whoever loads them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextureStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Debug)]
pub struct ScanEffect {
    controller: ProgressController,
    params: EffectParams,
    textures: TextureStatus,
    uniforms: ScanUniforms,
}

impl ScanEffect {
    pub fn new(cfg: ScanConfig, params: EffectParams) -> Result<Self> {
        let controller = ProgressController::new(cfg)?;
        let uniforms = ScanUniforms::new(&params, controller.value());
        Ok(Self {
            controller,
            params,
            textures: TextureStatus::Loading,
            uniforms,
        })
    }

    /// Advance one frame and return the uniforms to upload. Progress keeps
    /// advancing while textures are still loading.
    pub fn frame(&mut self, dt: f32) -> &ScanUniforms {
        let progress = self.controller.on_frame(dt).progress;
        self.uniforms = ScanUniforms::new(&self.params, progress);
        &self.uniforms
    }

    pub fn pointer_enter(&mut self) {
        self.controller.on_pointer_enter();
    }

    pub fn pointer_move(&mut self, sample: PointerSample) {
        self.controller.on_pointer_move(sample);
    }

    pub fn pointer_leave(&mut self) {
        self.controller.on_pointer_leave();
    }

    pub fn set_params(&mut self, params: EffectParams) {
        self.params = params;
        self.uniforms = ScanUniforms::new(&self.params, self.controller.value());
    }

    pub fn params(&self) -> &EffectParams {
        &self.params
    }

    pub fn uniforms(&self) -> &ScanUniforms {
        &self.uniforms
    }

    pub fn controller(&self) -> &ProgressController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ProgressController {
        &mut self.controller
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.textures == TextureStatus::Loading
    }

    pub fn texture_status(&self) -> TextureStatus {
        self.textures
    }

    pub fn mark_textures_loaded(&mut self) {
        self.textures = TextureStatus::Ready;
    }

    /// The renderer shows its own fallback; the controller is unaffected.
    pub fn mark_texture_failed(&mut self, reason: &str) {
        warn!("scan effect texture failed to load: {reason}");
        self.textures = TextureStatus::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoopConfig, LoopMode};
    use crate::easing::EasingFn;
    use crate::style::ScanStyle;

    fn repeat_cfg() -> ScanConfig {
        ScanConfig {
            loop_cfg: LoopConfig {
                enabled: true,
                mode: LoopMode::Repeat,
                duration_seconds: 2.0,
                easing: EasingFn::Linear,
            },
            ..ScanConfig::default()
        }
    }

    #[test]
    fn progress_advances_while_loading() {
        let mut fx = ScanEffect::new(repeat_cfg(), EffectParams::default()).unwrap();
        assert!(fx.is_loading());
        assert_eq!(fx.frame(1.0).u_progress, 0.5);
        fx.mark_textures_loaded();
        assert!(!fx.is_loading());
        assert_eq!(fx.texture_status(), TextureStatus::Ready);
    }

    #[test]
    fn texture_failure_does_not_stop_progress() {
        let mut fx = ScanEffect::new(repeat_cfg(), EffectParams::default()).unwrap();
        fx.mark_texture_failed("404");
        assert_eq!(fx.texture_status(), TextureStatus::Failed);
        assert_eq!(fx.frame(0.5).u_progress, 0.25);
    }

    #[test]
    fn set_params_repacks_uniforms() {
        let mut fx = ScanEffect::new(repeat_cfg(), EffectParams::default()).unwrap();
        fx.frame(1.0);
        fx.set_params(EffectParams {
            style: ScanStyle::cross(),
            ..EffectParams::default()
        });
        assert_eq!(fx.uniforms().u_effect_type, 2.0);
        assert_eq!(fx.uniforms().u_progress, 0.5);
    }
}
