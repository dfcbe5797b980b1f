//! Pointer position → scan progress mapping.

use serde::{Deserialize, Serialize};

use crate::config::Direction;

/// One pointer reading, relative to the container's top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from client coordinates and the container's bounding rect.
    pub fn from_client(
        client_x: f32,
        client_y: f32,
        rect_left: f32,
        rect_top: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self::new(client_x - rect_left, client_y - rect_top, width, height)
    }

    #[inline]
    pub fn map(&self, direction: Direction) -> Option<f32> {
        map(self.x, self.y, self.width, self.height, direction)
    }
}

/// Map a pointer position inside a `box_width`×`box_height` container to [0,1].
///
/// Returns `None` for a degenerate container (zero, negative or non-finite
/// size) or a non-finite pointer, so callers can drop the event instead of
/// writing NaN.
pub fn map(
    pointer_x: f32,
    pointer_y: f32,
    box_width: f32,
    box_height: f32,
    direction: Direction,
) -> Option<f32> {
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(box_width) || !usable(box_height) {
        return None;
    }
    if !pointer_x.is_finite() || !pointer_y.is_finite() {
        return None;
    }

    let raw = match direction {
        Direction::TopToBottom => pointer_y / box_height,
        Direction::BottomToTop => 1.0 - pointer_y / box_height,
        Direction::LeftToRight => pointer_x / box_width,
        Direction::RightToLeft => 1.0 - pointer_x / box_width,
        Direction::CenterOutward => center_distance(pointer_x, pointer_y, box_width, box_height),
        Direction::OutwardToCenter => {
            1.0 - center_distance(pointer_x, pointer_y, box_width, box_height)
        }
    };
    Some(raw.clamp(0.0, 1.0))
}

/// Distance from the box center, normalized by the center-to-corner distance.
#[inline]
fn center_distance(x: f32, y: f32, w: f32, h: f32) -> f32 {
    let cx = w * 0.5;
    let cy = h * 0.5;
    let d = (x - cx).hypot(y - cy);
    let max = cx.hypot(cy);
    (d / max).min(1.0)
}
