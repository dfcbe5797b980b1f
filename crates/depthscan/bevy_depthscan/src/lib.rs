use bevy::prelude::*;
use bevy::window::WindowEvent;
use depthscan_core::{EffectParams, ScanConfig, ScanEffect};

pub mod resources;
pub mod systems;

pub use resources::{ScanEffectResource, ScanUniformsResource, SetScanConfig, SetScanParams};

/// Installs a [`ScanEffectResource`] covering the primary window and ticks it
/// every `Update`. An invalid `config` is logged and the plugin installs nothing.
#[derive(Clone, Debug, Default)]
pub struct DepthScanPlugin {
    pub config: ScanConfig,
    pub params: EffectParams,
}

impl Plugin for DepthScanPlugin {
    fn build(&self, app: &mut App) {
        let effect = match ScanEffect::new(self.config, self.params) {
            Ok(effect) => effect,
            Err(e) => {
                error!("depthscan plugin not installed: {e}");
                return;
            }
        };
        let uniforms = *effect.uniforms();

        // Window events normally come from WindowPlugin; registering is a no-op then.
        app.add_event::<WindowEvent>()
            .add_event::<SetScanConfig>()
            .add_event::<SetScanParams>()
            .insert_resource(ScanEffectResource(effect))
            .insert_resource(ScanUniformsResource(uniforms))
            .add_systems(
                Update,
                (
                    systems::apply_settings_system,
                    systems::cursor_input_system,
                    systems::tick_scan_system,
                )
                    .chain(),
            );
    }
}
