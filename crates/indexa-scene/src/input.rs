// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Keyboard state for the rotation controls.
//!
//! A windowing backend translates its native key events into [`InputEvent`]s
//! and feeds them to an [`InputState`], which the scene polls once per frame.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The keys the cube scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tilts the cube forward.
    W,
    /// Tilts the cube backward.
    S,
    /// Turns the cube left.
    A,
    /// Turns the cube right.
    D,
}

impl Key {
    /// Every key the scene reacts to.
    pub const ALL: [Key; 4] = [Key::W, Key::S, Key::A, Key::D];

    /// Physical key code name, as a windowing backend reports it.
    pub const fn code(&self) -> &'static str {
        match self {
            Key::W => "KeyW",
            Key::S => "KeyS",
            Key::A => "KeyA",
            Key::D => "KeyD",
        }
    }

    /// Maps a physical key code name back to a [`Key`].
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.code() == code)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Key {
    type Err = String;

    /// Accepts a bare letter (`w`, `D`) or a key code name (`KeyW`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_uppercase().as_str() {
            "W" => Some(Key::W),
            "S" => Some(Key::S),
            "A" => Some(Key::A),
            "D" => Some(Key::D),
            _ => Key::from_code(s),
        };
        key.ok_or_else(|| format!("unknown key '{s}', expected one of W, S, A, D"))
    }
}

/// A key transition reported by the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down.
    KeyPressed {
        /// The key.
        key: Key,
    },
    /// A key went up.
    KeyReleased {
        /// The key.
        key: Key,
    },
}

/// The set of keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    /// Creates a state with no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a key transition.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed { key } => self.press(key),
            InputEvent::KeyReleased { key } => self.release(key),
        }
    }

    /// Marks `key` as held.
    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            log::trace!("Key {key} pressed");
        }
    }

    /// Marks `key` as released.
    pub fn release(&mut self, key: Key) {
        if self.held.remove(&key) {
            log::trace!("Key {key} released");
        }
    }

    /// Whether `key` is currently down.
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
