//! Keyboard state and per-player control schemes
//!
//! Raw key events are folded into an [`InputState`] between ticks. Each
//! player's [`ControlScheme`] samples that state into a [`PlayerIntent`] at
//! the start of the player's update.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A key press or release, identified by the host's key name (e.g. `"a"`, `"ArrowLeft"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pressed: true,
        }
    }

    pub fn release(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pressed: false,
        }
    }
}

/// Key binding for each logical control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    pub left: String,
    pub right: String,
    pub jump: String,
    pub swap: String,
    pub attack: String,
}

impl ControlScheme {
    pub fn new(left: &str, right: &str, jump: &str, swap: &str, attack: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            jump: jump.to_string(),
            swap: swap.to_string(),
            attack: attack.to_string(),
        }
    }

    pub fn keys(&self) -> [&str; 5] {
        [
            self.left.as_str(),
            self.right.as_str(),
            self.jump.as_str(),
            self.swap.as_str(),
            self.attack.as_str(),
        ]
    }

    /// Read this scheme's controls out of the shared key state
    pub fn sample(&self, input: &InputState) -> PlayerIntent {
        PlayerIntent {
            left: input.is_held(&self.left),
            right: input.is_held(&self.right),
            jump: input.is_held(&self.jump),
            swap: input.is_held(&self.swap),
            attack: input.is_held(&self.attack),
        }
    }
}

/// What one player is asking for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub swap: bool,
    pub attack: bool,
}

/// Which bound keys are currently held
///
/// Only keys that belong to some control scheme are tracked; anything else is
/// dropped on arrival.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bound: HashSet<String>,
    held: HashSet<String>,
}

impl InputState {
    /// Track the keys of every given scheme
    pub fn for_schemes<'a>(schemes: impl IntoIterator<Item = &'a ControlScheme>) -> Self {
        let bound = schemes
            .into_iter()
            .flat_map(|s| s.keys())
            .map(str::to_string)
            .collect();
        Self {
            bound,
            held: HashSet::new(),
        }
    }

    /// Fold one key event into the held set. Returns false if the key is unbound.
    pub fn apply(&mut self, event: &KeyEvent) -> bool {
        if !self.bound.contains(&event.key) {
            trace!(key = %event.key, "ignoring unbound key");
            return false;
        }
        if event.pressed {
            self.held.insert(event.key.clone());
        } else {
            self.held.remove(&event.key);
        }
        true
    }

    #[inline]
    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}
