//! Platform abstraction layer
//!
//! The window and event loop live outside this crate. What crosses the
//! boundary is modelled here:
//! - Key events and the commands they map to
//! - A scripted input source for headless runs

pub mod autopilot;
pub mod input;

pub use autopilot::Autopilot;
pub use input::{Command, InputEvent, Key, KeyAction};
