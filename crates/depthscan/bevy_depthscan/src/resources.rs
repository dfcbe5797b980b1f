use bevy::prelude::*;
use depthscan_core::{EffectParams, ScanConfig, ScanEffect, ScanUniforms};

/// The effect instance driven by the plugin.
#[derive(Resource)]
pub struct ScanEffectResource(pub ScanEffect);

/// Uniforms produced by the most recent tick, ready for a material to copy.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct ScanUniformsResource(pub ScanUniforms);

/// Replace the controller config. Events are applied in send order; a
/// rejected config is logged and whatever was active before it stays.
#[derive(Event, Clone, Copy, Debug)]
pub struct SetScanConfig(pub ScanConfig);

/// Replace the draw parameters. Applied in send order, so the last one sent
/// in a frame is what the next uniforms use.
#[derive(Event, Clone, Copy, Debug)]
pub struct SetScanParams(pub EffectParams);
