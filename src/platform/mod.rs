//! Platform abstraction layer
//!
//! Browser/native-neutral helpers used by the drivers:
//! - Frame timing
//! - Input events to per-update snapshots

pub mod input;
pub mod time;

pub use input::{InputAction, InputState, action_for_key};
pub use time::FrameClock;
