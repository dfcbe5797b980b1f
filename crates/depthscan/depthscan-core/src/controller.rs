//! Progress controller: decides whether the loop or the pointer owns the
//! scan value, and blends the hand-off between them.
//!
//! The host drives it with `on_frame(dt)` from its render loop and the
//! `on_pointer_*` calls from its input events. Time is the controller's own
//! clock (sum of frame deltas); pointer events are stamped with it.

use log::debug;

use crate::config::{DeviceCapability, LoopConfig, PointerConfig, ScanConfig};
use crate::easing::ease_in_out_quad;
use crate::error::{Result, ScanError};
use crate::loop_driver::LoopDriver;
use crate::outputs::{ControllerEvent, FrameOutput};
use crate::pointer::PointerSample;
use crate::state::{ControlState, MirrorDirection, ProgressState, Source, Transition};

#[derive(Clone, Debug)]
pub struct ProgressController {
    cfg: ScanConfig,
    driver: LoopDriver,
    state: ProgressState,
    clock: f64,
    pointer_capable: bool,
    /// Pointer is inside the container, whether or not it has control.
    hovering: bool,
    /// Most recent mapped pointer value, re-used by frames during a blend.
    last_target: Option<f32>,
    /// Events raised by pointer calls since the last frame.
    pending: Vec<ControllerEvent>,
    output: FrameOutput,
}

impl ProgressController {
    pub fn new(cfg: ScanConfig) -> Result<Self> {
        cfg.validate()?;
        let driver = LoopDriver::new(cfg.loop_cfg)?;
        let state = ProgressState {
            value: driver.phase(),
            mirror_direction: driver.direction(),
            ..ProgressState::default()
        };
        let mut ctl = Self {
            cfg,
            driver,
            state,
            clock: 0.0,
            pointer_capable: true,
            hovering: false,
            last_target: None,
            pending: Vec::new(),
            output: FrameOutput::default(),
        };
        ctl.refresh_output();
        Ok(ctl)
    }

    /// Advance one render frame by `dt` seconds and return the frame's output.
    pub fn on_frame(&mut self, dt: f32) -> &FrameOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += f64::from(dt);
        self.output.clear();
        self.output.events.append(&mut self.pending);

        match self.state.source {
            Source::Loop => {
                let v = self.driver.tick(dt, &mut self.output.events);
                if self.cfg.loop_cfg.enabled {
                    self.state.set_value(v);
                }
                self.state.mirror_direction = self.driver.direction();
            }
            Source::Pointer => {
                if self.state.transition.is_some() {
                    match self.last_target {
                        Some(target) => self.apply_pointer_target(target),
                        None => self.complete_transition_if_due(),
                    }
                }
                self.output.events.append(&mut self.pending);
            }
        }

        self.refresh_output();
        &self.output
    }

    /// Pointer entered the container.
    pub fn on_pointer_enter(&mut self) {
        self.hovering = true;
        if self.pointer_active() {
            self.take_control();
        }
    }

    /// Pointer moved inside the container. Ignored unless the pointer has
    /// control, and ignored for degenerate container sizes.
    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        if !self.hovering || !self.pointer_active() || self.state.source != Source::Pointer {
            return;
        }
        let Some(target) = sample.map(self.cfg.pointer.direction) else {
            debug!(
                "ignoring pointer move on {}x{} container",
                sample.width, sample.height
            );
            return;
        };
        self.last_target = Some(target);
        self.apply_pointer_target(target);
    }

    /// Pointer left the container; the loop resumes from the current value.
    pub fn on_pointer_leave(&mut self) {
        self.hovering = false;
        self.release_control();
    }

    /// Replace the whole configuration. Nothing changes if it is invalid.
    pub fn set_config(&mut self, cfg: ScanConfig) -> Result<()> {
        cfg.validate()?;
        self.set_loop_config(cfg.loop_cfg)?;
        self.cfg.transition_seconds = cfg.transition_seconds;
        self.set_pointer_config(cfg.pointer);
        Ok(())
    }

    /// Replace the loop configuration; resets the loop phase.
    pub fn set_loop_config(&mut self, loop_cfg: LoopConfig) -> Result<()> {
        self.driver.set_config(loop_cfg)?;
        self.cfg.loop_cfg = loop_cfg;
        if self.state.source == Source::Pointer {
            self.driver.stop();
        } else if loop_cfg.enabled {
            self.state.set_value(self.driver.phase());
        }
        self.state.mirror_direction = self.driver.direction();
        self.refresh_output();
        Ok(())
    }

    pub fn set_pointer_config(&mut self, pointer: PointerConfig) {
        self.cfg.pointer = pointer;
        self.on_pointer_gate_changed();
    }

    /// Hosts report whether the device offers hover interaction at all.
    pub fn set_pointer_capable(&mut self, capable: bool) {
        self.pointer_capable = capable;
        self.on_pointer_gate_changed();
    }

    pub fn set_device_capability(&mut self, device: DeviceCapability) {
        self.set_pointer_capable(device.supports_pointer());
    }

    pub fn set_transition_seconds(&mut self, seconds: f32) -> Result<()> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(ScanError::InvalidTransitionDuration { seconds });
        }
        self.cfg.transition_seconds = seconds;
        Ok(())
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.state.value
    }

    #[inline]
    pub fn state(&self) -> ControlState {
        self.state.control_state()
    }

    #[inline]
    pub fn source(&self) -> Source {
        self.state.source
    }

    #[inline]
    pub fn mirror_direction(&self) -> MirrorDirection {
        self.state.mirror_direction
    }

    pub fn progress_state(&self) -> &ProgressState {
        &self.state
    }

    pub fn config(&self) -> &ScanConfig {
        &self.cfg
    }

    pub fn loop_driver(&self) -> &LoopDriver {
        &self.driver
    }

    /// Seconds of frame time seen so far.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_pointer_capable(&self) -> bool {
        self.pointer_capable
    }

    /// Output of the most recent frame.
    pub fn last_output(&self) -> &FrameOutput {
        &self.output
    }

    #[inline]
    fn pointer_active(&self) -> bool {
        self.cfg.pointer.enabled && self.pointer_capable
    }

    fn on_pointer_gate_changed(&mut self) {
        if !self.pointer_active() {
            self.release_control();
        } else if self.hovering {
            self.take_control();
        }
    }

    fn take_control(&mut self) {
        if self.state.source == Source::Pointer {
            // Re-entry during a blend keeps the blend and just re-targets.
            return;
        }
        self.driver.stop();
        self.state.source = Source::Pointer;
        self.last_target = None;
        if self.cfg.loop_cfg.enabled {
            let start_value = self.state.value;
            self.state.transition = Some(Transition {
                start_value,
                start_time: self.clock,
                duration_seconds: self.cfg.transition_seconds,
            });
            self.pending
                .push(ControllerEvent::TransitionStarted { start_value });
            debug!(
                "pointer takeover from {start_value:.3} at t={:.3}s",
                self.clock
            );
        } else {
            // No loop to hand off from: follow the pointer directly.
            self.state.transition = None;
            debug!("pointer takeover (loop disabled) at t={:.3}s", self.clock);
        }
    }

    fn release_control(&mut self) {
        if self.state.source != Source::Pointer {
            return;
        }
        let value = self.state.value;
        self.state.source = Source::Loop;
        self.state.transition = None;
        self.last_target = None;
        if self.cfg.loop_cfg.enabled {
            self.driver.resume(value);
        }
        self.state.mirror_direction = self.driver.direction();
        self.pending.push(ControllerEvent::PointerReleased { value });
        debug!("pointer released at {value:.3}, t={:.3}s", self.clock);
    }

    fn apply_pointer_target(&mut self, target: f32) {
        let Some(tr) = self.state.transition else {
            self.state.set_value(target);
            return;
        };
        let done = tr.is_complete_at(self.clock);
        let t = if done { 1.0 } else { tr.progress_at(self.clock) };
        let eased = ease_in_out_quad(t);
        self.state
            .set_value(tr.start_value + (target - tr.start_value) * eased);
        if done {
            self.finish_transition();
        }
    }

    fn complete_transition_if_due(&mut self) {
        if let Some(tr) = self.state.transition {
            if tr.is_complete_at(self.clock) {
                self.finish_transition();
            }
        }
    }

    fn finish_transition(&mut self) {
        self.state.transition = None;
        self.pending.push(ControllerEvent::TransitionCompleted);
        debug!("pointer blend complete at t={:.3}s", self.clock);
    }

    fn refresh_output(&mut self) {
        self.output.progress = self.state.value;
        self.output.state = self.state.control_state();
        self.output.source = self.state.source;
        self.output.mirror_direction = self.state.mirror_direction;
    }
}
