//! Keyboard and pointer input surface
//!
//! Hosts translate their native events into [`Key`]s. The session reacts to
//! jump and pause keys immediately; every other key is only tracked in the
//! pressed set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the game knows about, named after DOM `KeyboardEvent.code` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyP,
    Enter,
    Escape,
}

impl Key {
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "KeyW" => Key::KeyW,
            "KeyA" => Key::KeyA,
            "KeyS" => Key::KeyS,
            "KeyD" => Key::KeyD,
            "KeyP" => Key::KeyP,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            _ => return None,
        })
    }

    pub fn is_jump(self) -> bool {
        matches!(self, Key::Space | Key::ArrowUp | Key::KeyW)
    }

    pub fn is_pause(self) -> bool {
        matches!(self, Key::Escape | Key::KeyP)
    }
}

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Jump,
    TogglePause,
    None,
}

/// Raw pressed-key set
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat presses still map to their action.
    pub fn key_down(&mut self, key: Key) -> InputAction {
        self.pressed.insert(key);
        if key.is_jump() {
            InputAction::Jump
        } else if key.is_pause() {
            InputAction::TogglePause
        } else {
            InputAction::None
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Click or tap anywhere on the play field
    pub fn pointer_down(&mut self) -> InputAction {
        InputAction::Jump
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Forget every held key; presses made before a pause do not carry over
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
