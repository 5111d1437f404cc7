//! Input handling with gamepad support
//!
//! Provides an action-based input layer over keyboard and gamepad. The game
//! never reads devices directly: once per frame the `InputState` is polled
//! and condensed into a `FrameInput` snapshot that the simulation consumes.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Keyboard only

mod actions;
mod frame;
mod gamepad;
mod state;

pub use actions::Action;
pub use frame::FrameInput;
pub use gamepad::{Gamepad, button};
pub use state::InputState;
