//! Recorded key events for headless and replayed matches
//!
//! A script is a JSON document listing key presses and releases by tick:
//!
//! ```json
//! { "events": [ { "tick": 0, "key": "d", "pressed": true },
//!               { "tick": 45, "key": "d", "pressed": false } ] }
//! ```
//!
//! Events for tick `t` are submitted before the step that runs while the
//! game's tick counter reads `t`, in file order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::input::KeyEvent;

/// One scripted key transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedKey {
    pub tick: u64,
    pub key: String,
    pub pressed: bool,
}

impl ScriptedKey {
    pub fn to_key_event(&self) -> KeyEvent {
        KeyEvent {
            key: self.key.clone(),
            pressed: self.pressed,
        }
    }
}

/// Ordered list of key transitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputScript {
    pub events: Vec<ScriptedKey>,
}

impl InputScript {
    /// Parse and validate a script
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: InputScript = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Read a script file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Ticks must never go backwards
    pub fn validate(&self) -> Result<(), ScriptError> {
        for (index, pair) in self.events.windows(2).enumerate() {
            if pair[1].tick < pair[0].tick {
                return Err(ScriptError::OutOfOrder {
                    index: index + 1,
                    tick: pair[1].tick,
                    previous: pair[0].tick,
                });
            }
        }
        Ok(())
    }

    /// Tick of the final event
    pub fn last_tick(&self) -> Option<u64> {
        self.events.last().map(|e| e.tick)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn cursor(&self) -> ScriptCursor {
        ScriptCursor::default()
    }
}

/// Position in a script; walks it forward tick by tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptCursor {
    next: usize,
}

impl ScriptCursor {
    /// Events due at or before `tick` that have not been handed out yet
    pub fn due<'a>(&mut self, script: &'a InputScript, tick: u64) -> &'a [ScriptedKey] {
        let events = &script.events;
        let start = self.next.min(events.len());
        let mut end = start;
        while end < events.len() && events[end].tick <= tick {
            end += 1;
        }
        self.next = end;
        &events[start..end]
    }

    pub fn is_finished(&self, script: &InputScript) -> bool {
        self.next >= script.events.len()
    }
}

/// Script loading errors
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read input script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid input script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("event {index} at tick {tick} comes after tick {previous}")]
    OutOfOrder { index: usize, tick: u64, previous: u64 },
}
