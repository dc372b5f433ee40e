use glam::Vec2;
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

/// Keys the simulation cares about. Anything else never reaches units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCountMacro, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCountMacro, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

/// Snapshot of a player's input for one tick: held keys, held mouse
/// buttons, and the cursor position in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub key_down: [bool; Key::COUNT],
    pub mouse_down: [bool; MouseButton::COUNT],
    pub cursor_world: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            key_down: [false; Key::COUNT],
            mouse_down: [false; MouseButton::COUNT],
            cursor_world: Vec2::ZERO,
        }
    }
}

impl InputState {
    pub fn key(&self, key: Key) -> bool {
        self.key_down[key as usize]
    }

    pub fn mouse(&self, button: MouseButton) -> bool {
        self.mouse_down[button as usize]
    }

    pub fn press(&mut self, key: Key) {
        self.key_down[key as usize] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.key_down[key as usize] = false;
    }

    pub fn hold_mouse(&mut self, button: MouseButton) {
        self.mouse_down[button as usize] = true;
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_down[button as usize] = false;
    }

    pub fn set_cursor(&mut self, cursor_world: Vec2) {
        self.cursor_world = cursor_world;
    }
}
