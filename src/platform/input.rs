//! Key events from the windowing layer

use serde::{Deserialize, Serialize};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Pause,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
    /// OS auto-repeat; ignored
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl InputEvent {
    pub fn press(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Press,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Release,
        }
    }
}

/// What an event asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add to the paddle's direction accumulator
    Steer(i32),
    TogglePause,
    Quit,
}

impl Command {
    /// Map a key event; `None` for events the game ignores
    ///
    /// Left/right presses and releases are not deduplicated: a release
    /// without a press still steers.
    pub fn from_event(event: InputEvent) -> Option<Self> {
        let d = match event.action {
            KeyAction::Press => 1,
            KeyAction::Release => -1,
            KeyAction::Repeat => return None,
        };
        match event.key {
            Key::Left => Some(Command::Steer(-d)),
            Key::Right => Some(Command::Steer(d)),
            Key::Pause if d > 0 => Some(Command::TogglePause),
            Key::Quit if d > 0 => Some(Command::Quit),
            Key::Pause | Key::Quit => None,
        }
    }
}
