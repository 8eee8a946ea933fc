//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing and the animation-frame handle
//! - Input events

pub mod clock;
pub mod input;

pub use clock::{FpsCounter, FrameClock, FrameStep, LoopHandle};
pub use input::{Action, Bindings, InputState};
