//! Mutable progress state shared by the loop and pointer sources.

use serde::{Deserialize, Serialize};

/// Slack applied to time boundary checks.
pub const TIME_EPSILON: f32 = 1e-6;

/// Which driver currently owns `ProgressState::value`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Source {
    #[default]
    Loop,
    Pointer,
}

/// Active leg of a mirror loop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MirrorDirection {
    #[default]
    Forward,
    Backward,
}

impl MirrorDirection {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Endpoint this leg runs toward.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => 0.0,
        }
    }
}

/// In-flight loop→pointer blend.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub start_value: f32,
    /// Controller clock reading when the blend began.
    pub start_time: f64,
    pub duration_seconds: f32,
}

impl Transition {
    /// Normalized blend position at `now`, clamped to [0,1].
    #[inline]
    pub fn progress_at(&self, now: f64) -> f32 {
        let elapsed = (now - self.start_time).max(0.0) as f32;
        (elapsed / self.duration_seconds).min(1.0)
    }

    /// Compared in f32 with a small tolerance so a clock summed from frame
    /// deltas still lands on the boundary.
    #[inline]
    pub fn is_complete_at(&self, now: f64) -> bool {
        let elapsed = (now - self.start_time) as f32;
        elapsed + TIME_EPSILON >= self.duration_seconds
    }
}

/// Externally observable controller phase, derived from source + transition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlState {
    #[default]
    Loop,
    TransitioningToPointer,
    Pointer,
}

impl ControlState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::TransitioningToPointer => "transitioningToPointer",
            Self::Pointer => "pointer",
        }
    }
}

/// The single value the renderer reads, plus who owns it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub value: f32,
    pub source: Source,
    pub transition: Option<Transition>,
    pub mirror_direction: MirrorDirection,
}

impl ProgressState {
    pub fn control_state(&self) -> ControlState {
        match (self.source, self.transition) {
            (Source::Loop, _) => ControlState::Loop,
            (Source::Pointer, Some(_)) => ControlState::TransitioningToPointer,
            (Source::Pointer, None) => ControlState::Pointer,
        }
    }

    /// Store `v` clamped into [0,1]. Non-finite input keeps the previous value.
    #[inline]
    pub(crate) fn set_value(&mut self, v: f32) {
        if v.is_finite() {
            self.value = v.clamp(0.0, 1.0);
        }
    }
}
