//! Keyboard shortcuts.
//!
//! Physical keys map to a small set of commands, so the layout of the
//! keyboard doesn't matter.
//!
//! | Key      | Command                           |
//! |----------|-----------------------------------|
//! | `C`      | Clear the trail buffer            |
//! | `R`      | Remove all particles and clear    |
//! | `Space`  | Pause / resume                    |
//! | `S`      | Save a PNG snapshot of the trails |
//! | `Escape` | Quit                              |

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Something the user asked the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ClearScreen,
    Reset,
    TogglePause,
    Snapshot,
    Quit,
}

impl Command {
    /// Command bound to `key`, if any.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyC => Some(Command::ClearScreen),
            KeyCode::KeyR => Some(Command::Reset),
            KeyCode::Space => Some(Command::TogglePause),
            KeyCode::KeyS => Some(Command::Snapshot),
            KeyCode::Escape => Some(Command::Quit),
            _ => None,
        }
    }

    /// Command for a key press. Releases and auto-repeats are ignored.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.state != ElementState::Pressed || event.repeat {
            return None;
        }
        match event.physical_key {
            PhysicalKey::Code(code) => Self::from_key(code),
            PhysicalKey::Unidentified(_) => None,
        }
    }
}
