//! Easing curves for loop legs and the pointer hand-off blend.
//!
//! Named curves use the usual CSS/motion control points; bezier timing is
//! solved by bisection on the x polynomial, then evaluated on y.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Easing applied across one loop leg.
///
/// Serialized as a name (`"easeInOut"`) or as `[x1, y1, x2, y2]` for a custom
/// cubic bezier.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "EasingRepr", into = "EasingRepr")]
pub enum EasingFn {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    CubicBezier([f32; 4]),
}

const EASE_IN: [f32; 4] = [0.42, 0.0, 1.0, 1.0];
const EASE_OUT: [f32; 4] = [0.0, 0.0, 0.58, 1.0];
const EASE_IN_OUT: [f32; 4] = [0.42, 0.0, 0.58, 1.0];

impl EasingFn {
    /// Build a bezier easing, rejecting x control points outside [0,1].
    pub fn cubic_bezier(ctrl: [f32; 4]) -> Result<Self, ScanError> {
        let [x1, y1, x2, y2] = ctrl;
        let xs_ok = (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2);
        if !xs_ok || !y1.is_finite() || !y2.is_finite() {
            return Err(ScanError::InvalidBezier(ctrl));
        }
        Ok(Self::CubicBezier(ctrl))
    }

    /// Resolve a curve name. Accepts motion names (`easeInOut`), kebab-case
    /// CSS names and GSAP aliases (`power2.inOut`, `none`). Anything else
    /// falls back to `EaseInOut`.
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        // GSAP powerN.<dir>: the power only changes steepness, direction picks the curve.
        let dir = match lower.split_once('.') {
            Some((power, dir)) if power.starts_with("power") => dir.to_string(),
            _ => lower.replace('-', ""),
        };
        match dir.as_str() {
            "linear" | "none" => Self::Linear,
            "easein" | "in" => Self::EaseIn,
            "easeout" | "out" => Self::EaseOut,
            _ => Self::EaseInOut,
        }
    }

    /// Canonical name for named curves; `None` for custom beziers.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Linear => Some("linear"),
            Self::EaseIn => Some("easeIn"),
            Self::EaseOut => Some("easeOut"),
            Self::EaseInOut => Some("easeInOut"),
            Self::CubicBezier(_) => None,
        }
    }

    fn control_points(&self) -> [f32; 4] {
        match self {
            Self::Linear => [0.0, 0.0, 1.0, 1.0],
            Self::EaseIn => EASE_IN,
            Self::EaseOut => EASE_OUT,
            Self::EaseInOut => EASE_IN_OUT,
            Self::CubicBezier(c) => *c,
        }
    }

    /// Evaluate at `t`, clamped to [0,1]. Exactly 0 at 0 and 1 at 1.
    #[inline]
    pub fn ease(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            other => {
                let [x1, y1, x2, y2] = other.control_points();
                bezier_ease_t(t, x1, y1, x2, y2)
            }
        }
    }
}

impl FromStr for EasingFn {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for EasingFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => {
                let [x1, y1, x2, y2] = self.control_points();
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum EasingRepr {
    Named(String),
    Bezier([f32; 4]),
}

impl TryFrom<EasingRepr> for EasingFn {
    type Error = ScanError;

    fn try_from(repr: EasingRepr) -> Result<Self, Self::Error> {
        match repr {
            EasingRepr::Named(name) => Ok(Self::from_name(&name)),
            EasingRepr::Bezier(ctrl) => Self::cubic_bezier(ctrl),
        }
    }
}

impl From<EasingFn> for EasingRepr {
    fn from(easing: EasingFn) -> Self {
        match easing.name() {
            Some(name) => EasingRepr::Named(name.to_string()),
            None => EasingRepr::Bezier(easing.control_points()),
        }
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Quadratic ease-in-out used by the pointer hand-off blend.
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t < 0.5 {
        2.0 * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for e in [
            EasingFn::Linear,
            EasingFn::EaseIn,
            EasingFn::EaseOut,
            EasingFn::EaseInOut,
            EasingFn::CubicBezier([0.1, 0.7, 0.3, 1.0]),
        ] {
            assert_eq!(e.ease(0.0), 0.0, "{e}");
            assert_eq!(e.ease(1.0), 1.0, "{e}");
            assert_eq!(e.ease(-3.0), 0.0, "{e}");
            assert_eq!(e.ease(7.0), 1.0, "{e}");
        }
    }

    #[test]
    fn curve_shapes() {
        assert!(EasingFn::EaseIn.ease(0.25) < 0.25);
        assert!(EasingFn::EaseOut.ease(0.25) > 0.25);
        assert!((EasingFn::EaseInOut.ease(0.5) - 0.5).abs() < 1e-3);
        assert_eq!(EasingFn::Linear.ease(0.3), 0.3);
    }

    #[test]
    fn eased_values_are_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = EasingFn::EaseInOut.ease(i as f32 / 100.0);
            assert!(v + 1e-5 >= prev, "step {i}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn names_and_aliases() {
        assert_eq!(EasingFn::from_name("linear"), EasingFn::Linear);
        assert_eq!(EasingFn::from_name("none"), EasingFn::Linear);
        assert_eq!(EasingFn::from_name("easeIn"), EasingFn::EaseIn);
        assert_eq!(EasingFn::from_name("ease-out"), EasingFn::EaseOut);
        assert_eq!(EasingFn::from_name("power2.inOut"), EasingFn::EaseInOut);
        assert_eq!(EasingFn::from_name("power1.in"), EasingFn::EaseIn);
        assert_eq!(EasingFn::from_name("power3.out"), EasingFn::EaseOut);
        assert_eq!(EasingFn::from_name("bouncy"), EasingFn::EaseInOut);
        assert_eq!("easeOut".parse::<EasingFn>().unwrap(), EasingFn::EaseOut);
    }

    #[test]
    fn serde_named_and_bezier() {
        let e: EasingFn = serde_json::from_str("\"power2.out\"").unwrap();
        assert_eq!(e, EasingFn::EaseOut);
        assert_eq!(serde_json::to_string(&e).unwrap(), "\"easeOut\"");

        let b: EasingFn = serde_json::from_str("[0.2, 0.0, 0.8, 1.0]").unwrap();
        assert_eq!(b, EasingFn::CubicBezier([0.2, 0.0, 0.8, 1.0]));

        assert!(serde_json::from_str::<EasingFn>("[1.5, 0.0, 0.8, 1.0]").is_err());
    }

    #[test]
    fn quad_blend_matches_reference_points() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.25), 0.125);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(0.75), 0.875);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert_eq!(ease_in_out_quad(2.0), 1.0);
    }
}
