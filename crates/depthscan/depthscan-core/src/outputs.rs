//! Per-frame output of the controller.
//!
//! `progress` is what the renderer writes into its uniform. The rest is
//! diagnostics for debug overlays and host logging.

use serde::{Deserialize, Serialize};

use crate::state::{ControlState, MirrorDirection, Source};

/// Discrete signals raised since the previous frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[non_exhaustive]
pub enum ControllerEvent {
    /// Pointer entered and began blending away from the loop.
    TransitionStarted { start_value: f32 },
    /// Blend finished; the pointer now drives progress directly.
    TransitionCompleted,
    /// Pointer left; the loop resumes from `value`.
    PointerReleased { value: f32 },
    /// A loop leg reached its endpoint.
    LoopLegCompleted { direction: MirrorDirection },
    /// A one-shot loop reached 1 and will hold there.
    LoopFinished,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutput {
    pub progress: f32,
    pub state: ControlState,
    pub source: Source,
    pub mirror_direction: MirrorDirection,
    #[serde(default)]
    pub events: Vec<ControllerEvent>,
}

impl FrameOutput {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn has_event(&self, pred: impl Fn(&ControllerEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}
