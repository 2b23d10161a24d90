//! Keyboard state
//!
//! Key events arrive asynchronously between frames; the loop takes a
//! snapshot with [`KeyState::to_tick_input`] at the start of every frame.

use crate::sim::TickInput;

/// Movement direction bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value. Arrow keys plus WASD.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Currently held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Record a key press/release. Returns `true` if the key is a movement key.
    pub fn apply_key(&mut self, key: &str, pressed: bool) -> bool {
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
        true
    }

    /// Release everything (e.g. on focus loss, where keyup never arrives)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next tick
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
        }
    }
}
