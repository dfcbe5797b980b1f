use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowEvent};
use depthscan_core::PointerSample;

use crate::resources::{ScanEffectResource, ScanUniformsResource, SetScanConfig, SetScanParams};

/// Applies settings events in the order they were sent.
pub fn apply_settings_system(
    mut configs: EventReader<SetScanConfig>,
    mut params: EventReader<SetScanParams>,
    mut fx: ResMut<ScanEffectResource>,
) {
    for SetScanConfig(cfg) in configs.read() {
        if let Err(e) = fx.0.controller_mut().set_config(*cfg) {
            warn!("rejected depthscan config ({}): {e}", e.category());
        }
    }
    for SetScanParams(p) in params.read() {
        fx.0.set_params(*p);
    }
}

/// Feeds cursor events for the primary window into the controller in
/// arrival order. A move without a prior enter (the cursor was already
/// inside at startup) counts as an enter.
pub fn cursor_input_system(
    mut window_events: EventReader<WindowEvent>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut fx: ResMut<ScanEffectResource>,
) {
    let Ok((primary, window)) = windows.get_single() else {
        window_events.clear();
        return;
    };

    let (width, height) = (window.width(), window.height());
    for event in window_events.read() {
        match event {
            WindowEvent::CursorEntered(e) if e.window == primary => fx.0.pointer_enter(),
            WindowEvent::CursorMoved(e) if e.window == primary => {
                if !fx.0.controller().is_hovering() {
                    fx.0.pointer_enter();
                }
                fx.0
                    .pointer_move(PointerSample::new(e.position.x, e.position.y, width, height));
            }
            WindowEvent::CursorLeft(e) if e.window == primary => fx.0.pointer_leave(),
            _ => {}
        }
    }
}

pub fn tick_scan_system(
    time: Res<Time>,
    mut fx: ResMut<ScanEffectResource>,
    mut uniforms: ResMut<ScanUniformsResource>,
) {
    uniforms.0 = *fx.0.frame(time.delta_seconds());
}
