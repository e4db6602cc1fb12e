//! Input: the events the windowing layer forwards into a scene.
//!
//! # Invariants
//! - Input is processed synchronously, before the frame's update pass.
//! - Character keys compare case-insensitively.

pub mod action;
pub mod event;
pub mod intent;

pub use action::{Action, ActionMap};
pub use event::{InputEvent, Key, MouseButton};
pub use intent::MovementIntent;
