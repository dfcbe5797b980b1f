//! Configuration for the scan progress controller.
//!
//! Field names are camelCase on the wire so JS hosts can pass panel state
//! through unchanged. Every struct defaults to the values the effect ships
//! with; call `validate` (or `ScanConfig::from_json`) before use.

use serde::{Deserialize, Serialize};

use crate::easing::EasingFn;
use crate::error::{Result, ScanError};

/// Blend time used when pointer control takes over from the loop.
pub const DEFAULT_TRANSITION_SECONDS: f32 = 0.3;

/// Viewports at or below this width are treated as touch layouts.
pub const SMALL_VIEWPORT_MAX_WIDTH: f32 = 810.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopMode {
    /// 0→1 once, then hold at 1.
    OneShot,
    /// 0→1, jump back to 0, forever.
    #[default]
    Repeat,
    /// 0→1 then 1→0, forever.
    Mirror,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoopConfig {
    pub enabled: bool,
    pub mode: LoopMode,
    pub duration_seconds: f32,
    pub easing: EasingFn,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: LoopMode::Repeat,
            duration_seconds: 3.0,
            easing: EasingFn::EaseInOut,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<()> {
        let d = self.duration_seconds;
        if !d.is_finite() || d <= 0.0 {
            return Err(ScanError::InvalidLoopDuration { seconds: d });
        }
        Ok(())
    }
}

/// Mapping rule from pointer position to progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
    CenterOutward,
    OutwardToCenter,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointerConfig {
    pub enabled: bool,
    pub direction: Direction,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            direction: Direction::TopToBottom,
        }
    }
}

/// Top-level controller configuration.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    #[serde(rename = "loop")]
    pub loop_cfg: LoopConfig,
    pub pointer: PointerConfig,
    /// Loop→pointer blend time in seconds.
    pub transition_seconds: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            loop_cfg: LoopConfig::default(),
            pointer: PointerConfig::default(),
            transition_seconds: DEFAULT_TRANSITION_SECONDS,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        self.loop_cfg.validate()?;
        let t = self.transition_seconds;
        if !t.is_finite() || t <= 0.0 {
            return Err(ScanError::InvalidTransitionDuration { seconds: t });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: ScanConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// What the host device reports about pointer input.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCapability {
    pub has_touch: bool,
    pub viewport_width: f32,
}

impl DeviceCapability {
    /// Hover-driven scanning is offered only on non-touch devices with a
    /// viewport wider than [`SMALL_VIEWPORT_MAX_WIDTH`].
    #[inline]
    pub fn supports_pointer(&self) -> bool {
        !self.has_touch && self.viewport_width > SMALL_VIEWPORT_MAX_WIDTH
    }
}
