use bevy::prelude::*;
use bevy::window::{
    CursorEntered, CursorLeft, CursorMoved, PrimaryWindow, WindowEvent, WindowResolution,
};
use bevy_depthscan::{
    DepthScanPlugin, ScanEffectResource, ScanUniformsResource, SetScanConfig, SetScanParams,
};
use depthscan_core::{
    ControlState, EffectParams, LoopConfig, ScanConfig, ScanStyle,
};

fn app_with(plugin: DepthScanPlugin) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(plugin);
    app
}

fn spawn_primary_window(app: &mut App, width: f32, height: f32) -> Entity {
    app.world_mut()
        .spawn((
            Window {
                resolution: WindowResolution::new(width, height),
                ..default()
            },
            PrimaryWindow,
        ))
        .id()
}

fn enter(app: &mut App, window: Entity) {
    app.world_mut()
        .send_event(WindowEvent::CursorEntered(CursorEntered { window }));
}

fn cursor_to(app: &mut App, window: Entity, x: f32, y: f32) {
    app.world_mut()
        .send_event(WindowEvent::CursorMoved(CursorMoved {
            window,
            position: Vec2::new(x, y),
            delta: None,
        }));
}

fn leave(app: &mut App, window: Entity) {
    app.world_mut()
        .send_event(WindowEvent::CursorLeft(CursorLeft { window }));
}

fn control_state(app: &App) -> ControlState {
    app.world()
        .resource::<ScanEffectResource>()
        .0
        .controller()
        .state()
}

fn progress(app: &App) -> f32 {
    app.world()
        .resource::<ScanEffectResource>()
        .0
        .controller()
        .value()
}

#[test]
fn plugin_inserts_resources() {
    let app = app_with(DepthScanPlugin::default());
    assert!(app.world().get_resource::<ScanEffectResource>().is_some());
    assert!(app.world().get_resource::<ScanUniformsResource>().is_some());
}

#[test]
fn invalid_config_installs_nothing() {
    let plugin = DepthScanPlugin {
        config: ScanConfig {
            loop_cfg: LoopConfig {
                enabled: true,
                duration_seconds: 0.0,
                ..LoopConfig::default()
            },
            ..ScanConfig::default()
        },
        ..DepthScanPlugin::default()
    };
    let app = app_with(plugin);
    assert!(app.world().get_resource::<ScanEffectResource>().is_none());
}

#[test]
fn updates_without_a_window_do_not_panic() {
    let config: ScanConfig = serde_json::from_value(serde_json::json!({
        "loop": { "enabled": true, "mode": "mirror", "durationSeconds": 1.5 }
    }))
    .unwrap();
    let mut app = app_with(DepthScanPlugin {
        config,
        ..DepthScanPlugin::default()
    });
    for _ in 0..5 {
        app.update();
    }
    let u = app.world().resource::<ScanUniformsResource>().0;
    assert!((0.0..=1.0).contains(&u.u_progress));
}

#[test]
fn cursor_events_drive_pointer_control() {
    // Loop disabled: the pointer takes over without a blend.
    let mut app = app_with(DepthScanPlugin::default());
    let window = spawn_primary_window(&mut app, 200.0, 100.0);

    enter(&mut app, window);
    cursor_to(&mut app, window, 100.0, 80.0);
    app.update();

    assert_eq!(control_state(&app), ControlState::Pointer);
    assert!((progress(&app) - 0.8).abs() < 1e-5);
    assert!((app.world().resource::<ScanUniformsResource>().0.u_progress - 0.8).abs() < 1e-5);

    leave(&mut app, window);
    app.update();
    let fx = &app.world().resource::<ScanEffectResource>().0;
    assert_eq!(fx.controller().state(), ControlState::Loop);
    assert!(!fx.controller().is_hovering());
}

#[test]
fn leave_then_enter_in_one_frame_keeps_pointer_control() {
    let mut app = app_with(DepthScanPlugin::default());
    let window = spawn_primary_window(&mut app, 200.0, 100.0);
    enter(&mut app, window);
    cursor_to(&mut app, window, 100.0, 80.0);
    app.update();
    assert_eq!(control_state(&app), ControlState::Pointer);

    leave(&mut app, window);
    enter(&mut app, window);
    app.update();
    assert_eq!(control_state(&app), ControlState::Pointer);
    assert!(app
        .world()
        .resource::<ScanEffectResource>()
        .0
        .controller()
        .is_hovering());

    // Moves are replayed against the enter/leave that came before them.
    cursor_to(&mut app, window, 100.0, 30.0);
    leave(&mut app, window);
    enter(&mut app, window);
    cursor_to(&mut app, window, 100.0, 60.0);
    app.update();
    assert_eq!(control_state(&app), ControlState::Pointer);
    assert!((progress(&app) - 0.6).abs() < 1e-5);
}

#[test]
fn events_for_other_windows_are_ignored() {
    let mut app = app_with(DepthScanPlugin::default());
    spawn_primary_window(&mut app, 200.0, 100.0);
    let other = app.world_mut().spawn(Window::default()).id();
    enter(&mut app, other);
    cursor_to(&mut app, other, 100.0, 80.0);
    app.update();
    assert_eq!(control_state(&app), ControlState::Loop);
    assert_eq!(progress(&app), 0.0);
}

#[test]
fn move_without_enter_counts_as_enter() {
    let mut app = app_with(DepthScanPlugin::default());
    let window = spawn_primary_window(&mut app, 200.0, 100.0);
    cursor_to(&mut app, window, 10.0, 25.0);
    app.update();
    assert!((progress(&app) - 0.25).abs() < 1e-5);
}

#[test]
fn settings_events_apply_or_keep_previous() {
    let mut app = app_with(DepthScanPlugin::default());

    let mut bad = ScanConfig::default();
    bad.transition_seconds = 0.0;
    app.world_mut().send_event(SetScanConfig(bad));
    app.world_mut().send_event(SetScanParams(EffectParams {
        style: ScanStyle::gradient(),
        ..EffectParams::default()
    }));
    app.update();

    let fx = &app.world().resource::<ScanEffectResource>().0;
    assert_eq!(fx.controller().config().transition_seconds, 0.3);
    assert_eq!(app.world().resource::<ScanUniformsResource>().0.u_effect_type, 1.0);

    let good: ScanConfig = depthscan_test_fixtures::scenarios::load::<serde_json::Value>(
        "mirror-ping-pong",
    )
    .ok()
    .and_then(|v| serde_json::from_value(v["config"].clone()).ok())
    .expect("fixture config");
    app.world_mut().send_event(SetScanConfig(good));
    app.update();
    let fx = &app.world().resource::<ScanEffectResource>().0;
    assert!(fx.controller().config().loop_cfg.enabled);
    assert!(fx.controller().loop_driver().is_running());
}

#[test]
fn settings_events_apply_in_send_order() {
    let mut app = app_with(DepthScanPlugin::default());

    let mut first = ScanConfig::default();
    first.transition_seconds = 0.5;
    let mut rejected = ScanConfig::default();
    rejected.transition_seconds = -1.0;
    app.world_mut().send_event(SetScanConfig(first));
    app.world_mut().send_event(SetScanConfig(rejected));
    app.world_mut().send_event(SetScanParams(EffectParams {
        style: ScanStyle::gradient(),
        ..EffectParams::default()
    }));
    app.world_mut().send_event(SetScanParams(EffectParams {
        style: ScanStyle::cross(),
        ..EffectParams::default()
    }));
    app.update();

    let fx = &app.world().resource::<ScanEffectResource>().0;
    // The valid config took effect; the rejected one after it changed nothing.
    assert_eq!(fx.controller().config().transition_seconds, 0.5);
    assert_eq!(app.world().resource::<ScanUniformsResource>().0.u_effect_type, 2.0);
}
