//! Platform layer
//!
//! Terminal-specific glue the simulation never sees:
//! - Keyboard events to per-tick input
//! - Frame pacing

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{InputState, Key, Polled, map_key, poll_terminal};
