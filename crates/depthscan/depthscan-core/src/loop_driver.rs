//! Loop driver: autonomous phase in [0,1] advanced by frame time.
//!
//! Time is tracked per leg (one monotonic run toward 0 or 1). Overflow past a
//! leg boundary carries into the next leg, so cadence does not depend on
//! frame size. After a pointer hand-back the current leg is shortened in
//! proportion to the distance left, then normal cycling resumes.

use log::debug;

use crate::config::{LoopConfig, LoopMode};
use crate::error::Result;
use crate::outputs::ControllerEvent;
use crate::state::{MirrorDirection, TIME_EPSILON};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Leg {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Leg {
    fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    #[inline]
    fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}

#[derive(Clone, Debug)]
pub struct LoopDriver {
    cfg: LoopConfig,
    leg: Leg,
    direction: MirrorDirection,
    running: bool,
    finished: bool,
    phase: f32,
}

impl LoopDriver {
    /// Create a driver. Fails if the duration is not a positive finite number.
    /// The driver starts from 0 when the loop is enabled and idles otherwise.
    pub fn new(cfg: LoopConfig) -> Result<Self> {
        cfg.validate()?;
        let mut driver = Self {
            cfg,
            leg: Leg::new(0.0, 1.0, cfg.duration_seconds),
            direction: MirrorDirection::Forward,
            running: false,
            finished: false,
            phase: 0.0,
        };
        if cfg.enabled {
            driver.start(0.0);
        }
        Ok(driver)
    }

    pub fn config(&self) -> &LoopConfig {
        &self.cfg
    }

    /// Replace the configuration and reset the phase to 0.
    pub fn set_config(&mut self, cfg: LoopConfig) -> Result<()> {
        cfg.validate()?;
        self.cfg = cfg;
        self.direction = MirrorDirection::Forward;
        self.phase = 0.0;
        self.finished = false;
        self.leg = Leg::new(0.0, 1.0, cfg.duration_seconds);
        self.running = false;
        if cfg.enabled {
            self.start(0.0);
        }
        Ok(())
    }

    /// Begin a forward leg from `from_value` to 1 over the full duration.
    pub fn start(&mut self, from_value: f32) {
        let from = sanitize(from_value);
        self.direction = MirrorDirection::Forward;
        self.leg = Leg::new(from, 1.0, self.cfg.duration_seconds);
        self.phase = from;
        self.running = true;
        self.finished = false;
    }

    /// Freeze at the current phase. Does not reset.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Continue after pointer control: finish the current leg from
    /// `from_value` at proportional duration, then cycle normally.
    pub fn resume(&mut self, from_value: f32) {
        let v = sanitize(from_value);
        let d = self.cfg.duration_seconds;
        if self.cfg.mode != LoopMode::Mirror {
            self.direction = MirrorDirection::Forward;
        }
        let target = self.direction.target();
        self.leg = Leg::new(v, target, d * (target - v).abs());
        self.phase = v;
        self.running = true;
        self.finished = false;
        debug!(
            "loop resume from {v:.3} toward {target} over {:.3}s ({:?})",
            self.leg.duration, self.direction
        );
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    #[inline]
    pub fn direction(&self) -> MirrorDirection {
        self.direction
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once a one-shot loop has reached 1.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt` seconds, pushing leg events into `events`.
    /// Negative or non-finite `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32, events: &mut Vec<ControllerEvent>) -> f32 {
        if !self.running {
            return self.phase;
        }
        let mut budget = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        loop {
            let remaining = self.leg.remaining();
            if budget + TIME_EPSILON < remaining {
                self.leg.elapsed += budget;
                break;
            }
            budget = (budget - remaining).max(0.0);
            self.leg.elapsed = self.leg.duration;
            events.push(ControllerEvent::LoopLegCompleted {
                direction: self.direction,
            });

            if !self.next_leg(events) {
                break;
            }
            // Whole cycles inside one frame change nothing observable.
            let cycle = self.cycle_seconds();
            if budget >= cycle {
                budget %= cycle;
            }
            // Legs shorter than the slack would otherwise complete forever.
            if budget <= 0.0 {
                break;
            }
        }

        self.phase = self.sample();
        self.phase
    }

    /// Advance and discard events.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let mut sink = Vec::new();
        self.tick(dt, &mut sink)
    }

    /// Set up the leg after the current one completes. Returns false when
    /// the loop has come to rest.
    fn next_leg(&mut self, events: &mut Vec<ControllerEvent>) -> bool {
        let d = self.cfg.duration_seconds;
        match self.cfg.mode {
            LoopMode::OneShot => {
                self.running = false;
                self.finished = true;
                events.push(ControllerEvent::LoopFinished);
                false
            }
            LoopMode::Repeat => {
                self.direction = MirrorDirection::Forward;
                self.leg = Leg::new(0.0, 1.0, d);
                true
            }
            LoopMode::Mirror => {
                let arrived_at = self.leg.to;
                self.direction = self.direction.flipped();
                self.leg = Leg::new(arrived_at, self.direction.target(), d);
                true
            }
        }
    }

    fn cycle_seconds(&self) -> f32 {
        match self.cfg.mode {
            LoopMode::Mirror => 2.0 * self.cfg.duration_seconds,
            _ => self.cfg.duration_seconds,
        }
    }

    fn sample(&self) -> f32 {
        let leg = &self.leg;
        if leg.duration <= 0.0 || leg.elapsed >= leg.duration {
            return leg.to;
        }
        let u = leg.elapsed / leg.duration;
        let eased = self.cfg.easing.ease(u);
        sanitize(leg.from + (leg.to - leg.from) * eased)
    }
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
