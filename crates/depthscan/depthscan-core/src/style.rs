//! Scan styles and the uniform block handed to the shader each frame.
//!
//! The dots, gradient band and cross pattern variants share one controller;
//! only this description of how the band is drawn differs between them.

use serde::{Deserialize, Serialize};

/// Linear RGB in [0,1].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|c| f32::from(c) / 255.0)
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parse a hex color, falling back to red when it is malformed.
    pub fn from_hex_or_red(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::RED)
    }

    pub fn to_hex(&self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<String> for Rgb {
    fn from(s: String) -> Self {
        Self::from_hex_or_red(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bloom {
    pub strength: f32,
    pub radius: f32,
}

impl Default for Bloom {
    fn default() -> Self {
        Self {
            strength: 0.15,
            radius: 0.001,
        }
    }
}

/// How the scan band is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ScanStyle {
    /// Tiled dots lit inside the band.
    Dots { dot_size: f32, tiling_scale: f32 },
    /// Soft band with optional multi-layer glow.
    Gradient {
        width: f32,
        intensity: f32,
        #[serde(default)]
        bloom: Option<Bloom>,
    },
    /// Tiled cross pattern lit inside the band.
    Cross {
        size: f32,
        thickness: f32,
        tiling_scale: f32,
        intensity: f32,
    },
}

impl Default for ScanStyle {
    fn default() -> Self {
        Self::dots()
    }
}

impl ScanStyle {
    pub fn dots() -> Self {
        Self::Dots {
            dot_size: 0.1,
            tiling_scale: 1.0,
        }
    }

    pub fn gradient() -> Self {
        Self::Gradient {
            width: 0.0,
            intensity: 0.4,
            bloom: Some(Bloom::default()),
        }
    }

    pub fn cross() -> Self {
        Self::Cross {
            size: 0.3,
            thickness: 0.02,
            tiling_scale: 120.0,
            intensity: 2.0,
        }
    }

    /// Shader selector: 0 dots, 1 gradient, 2 cross.
    pub fn effect_type(&self) -> f32 {
        match self {
            Self::Dots { .. } => 0.0,
            Self::Gradient { .. } => 1.0,
            Self::Cross { .. } => 2.0,
        }
    }
}

/// Everything the material needs besides the textures.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectParams {
    pub style: ScanStyle,
    pub color: Rgb,
    /// Draw the source image under the band; otherwise fill with `background`.
    pub show_texture: bool,
    pub background: Rgb,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            style: ScanStyle::default(),
            color: Rgb::GREEN,
            show_texture: true,
            background: Rgb::BLACK,
        }
    }
}

/// Flat uniform block, one per frame. Unused slots for the active style are zero.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanUniforms {
    pub u_progress: f32,
    pub u_color: [f32; 3],
    pub u_effect_type: f32,
    pub u_dot_size: f32,
    pub u_tiling_scale: f32,
    pub u_gradient_width: f32,
    pub u_gradient_intensity: f32,
    pub u_bloom_strength: f32,
    pub u_bloom_radius: f32,
    pub u_cross_size: f32,
    pub u_cross_thickness: f32,
    pub u_show_texture: f32,
    pub u_background: [f32; 3],
}

impl ScanUniforms {
    pub fn new(params: &EffectParams, progress: f32) -> Self {
        let mut u = Self {
            u_progress: progress.clamp(0.0, 1.0),
            u_color: params.color.to_array(),
            u_effect_type: params.style.effect_type(),
            u_show_texture: if params.show_texture { 1.0 } else { 0.0 },
            u_background: params.background.to_array(),
            ..Self::default()
        };
        match params.style {
            ScanStyle::Dots {
                dot_size,
                tiling_scale,
            } => {
                u.u_dot_size = dot_size;
                u.u_tiling_scale = tiling_scale;
            }
            ScanStyle::Gradient {
                width,
                intensity,
                bloom,
            } => {
                u.u_gradient_width = width;
                u.u_gradient_intensity = intensity;
                if let Some(b) = bloom {
                    u.u_bloom_strength = b.strength;
                    u.u_bloom_radius = b.radius;
                }
            }
            ScanStyle::Cross {
                size,
                thickness,
                tiling_scale,
                intensity,
            } => {
                u.u_cross_size = size;
                u.u_cross_thickness = thickness;
                u.u_tiling_scale = tiling_scale;
                u.u_gradient_intensity = intensity;
            }
        }
        u
    }

    /// Number of floats in [`ScanUniforms::to_array`].
    pub const LEN: usize = 17;

    /// Field order flattened for a single buffer upload.
    pub fn to_array(&self) -> [f32; Self::LEN] {
        let [r, g, b] = self.u_color;
        let [br, bg, bb] = self.u_background;
        [
            self.u_progress,
            r,
            g,
            b,
            self.u_effect_type,
            self.u_dot_size,
            self.u_tiling_scale,
            self.u_gradient_width,
            self.u_gradient_intensity,
            self.u_bloom_strength,
            self.u_bloom_radius,
            self.u_cross_size,
            self.u_cross_thickness,
            self.u_show_texture,
            br,
            bg,
            bb,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_with_red_fallback() {
        assert_eq!(Rgb::from_hex("#00ff00"), Some(Rgb::GREEN));
        assert_eq!(Rgb::from_hex("FF0000"), Some(Rgb::RED));
        assert_eq!(Rgb::from_hex("#0f0"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
        assert_eq!(Rgb::from_hex_or_red("purple"), Rgb::RED);
        assert_eq!(Rgb::new(0.0, 1.0, 0.0).to_hex(), "#00ff00");
    }

    #[test]
    fn style_json_is_tagged() {
        let s: ScanStyle =
            serde_json::from_str(r#"{ "type": "cross", "size": 0.4, "thickness": 0.05, "tilingScale": 80, "intensity": 1 }"#)
                .unwrap();
        assert_eq!(s.effect_type(), 2.0);
        let g: ScanStyle =
            serde_json::from_str(r#"{ "type": "gradient", "width": 1.0, "intensity": 2.0 }"#).unwrap();
        assert_eq!(
            g,
            ScanStyle::Gradient {
                width: 1.0,
                intensity: 2.0,
                bloom: None
            }
        );
    }

    #[test]
    fn params_default_and_color_fallback() {
        let p: EffectParams = serde_json::from_str(r#"{ "color": "nope" }"#).unwrap();
        assert_eq!(p.color, Rgb::RED);
        assert!(p.show_texture);
        assert_eq!(p.style, ScanStyle::dots());
    }

    #[test]
    fn uniforms_pack_active_style_only() {
        let params = EffectParams {
            style: ScanStyle::gradient(),
            ..EffectParams::default()
        };
        let u = ScanUniforms::new(&params, 1.4);
        assert_eq!(u.u_progress, 1.0);
        assert_eq!(u.u_effect_type, 1.0);
        assert_eq!(u.u_gradient_intensity, 0.4);
        assert_eq!(u.u_bloom_strength, 0.15);
        assert_eq!(u.u_dot_size, 0.0);
        assert_eq!(u.u_color, [0.0, 1.0, 0.0]);

        let u = ScanUniforms::new(&EffectParams::default(), 0.25);
        assert_eq!(u.u_effect_type, 0.0);
        assert_eq!(u.u_dot_size, 0.1);
        assert_eq!(u.u_show_texture, 1.0);
    }

    #[test]
    fn uniforms_serialize_with_shader_names() {
        let u = ScanUniforms::new(&EffectParams::default(), 0.5);
        let v = serde_json::to_value(u).unwrap();
        assert_eq!(v["uProgress"], 0.5);
        assert!(v.get("uEffectType").is_some());
    }

    #[test]
    fn flat_array_matches_struct_layout() {
        let u = ScanUniforms::new(&EffectParams::default(), 0.5);
        let flat = u.to_array();
        assert_eq!(
            std::mem::size_of::<ScanUniforms>(),
            ScanUniforms::LEN * std::mem::size_of::<f32>()
        );
        assert_eq!(flat[0], 0.5);
        assert_eq!(&flat[1..4], &[0.0, 1.0, 0.0]);
        assert_eq!(flat[5], 0.1);
        assert_eq!(flat[13], 1.0);
    }
}
