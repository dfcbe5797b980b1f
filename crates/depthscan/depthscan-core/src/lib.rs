//! depthscan core (engine-agnostic)
//!
//! Produces the scan progress value for depth-map scan effects. A loop
//! driver animates progress on its own; pointer input takes over on hover
//! through a short eased blend and hands back to the loop on exit. Hosts
//! (web, Bevy) feed frame deltas and pointer events and read one scalar,
//! or the packed uniform block, per frame.

pub mod config;
pub mod controller;
pub mod easing;
pub mod effect;
pub mod error;
pub mod loop_driver;
pub mod outputs;
pub mod pointer;
pub mod state;
pub mod style;

// Re-exports for consumers (adapters)
pub use config::{
    DeviceCapability, Direction, LoopConfig, LoopMode, PointerConfig, ScanConfig,
    DEFAULT_TRANSITION_SECONDS,
};
pub use controller::ProgressController;
pub use easing::EasingFn;
pub use effect::{ScanEffect, TextureStatus};
pub use error::{Result, ScanError};
pub use loop_driver::LoopDriver;
pub use outputs::{ControllerEvent, FrameOutput};
pub use pointer::PointerSample;
pub use state::{ControlState, MirrorDirection, ProgressState, Source};
pub use style::{Bloom, EffectParams, Rgb, ScanStyle, ScanUniforms};
