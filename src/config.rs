use std::path::PathBuf;
use std::str::FromStr;

use crate::game::constants::{game, physics};
use crate::game::game_loop::GameLoopConfig;

/// Simulation runner configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Fixed steps per second
    pub tick_rate: u32,
    /// Pace ticks against the wall clock instead of stepping as fast as possible
    pub realtime: bool,
    /// Start a new match after each match ends
    pub auto_restart: bool,
    /// Delay between match end and the automatic reset
    pub restart_delay_ms: u64,
    /// Stop after this many ticks (0 = no cap)
    pub max_ticks: u64,
    /// Key events to replay
    pub input_script: Option<PathBuf>,
    /// Key events that can be pending between two ticks
    pub input_buffer_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: physics::TICK_RATE,
            realtime: false,
            auto_restart: false,
            restart_delay_ms: game::RESTART_DELAY_MS,
            // Ten minutes of play at 60Hz
            max_ticks: 36_000,
            input_script: None,
            input_buffer_capacity: 256,
        }
    }
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source; bad values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup("TICK_RATE") {
            match value.parse::<u32>() {
                Ok(parsed) if (1..=1000).contains(&parsed) => config.tick_rate = parsed,
                Ok(_) => tracing::warn!("TICK_RATE must be 1-1000, using default"),
                Err(_) => tracing::warn!("Invalid TICK_RATE '{}', using default", value),
            }
        }

        if let Some(value) = lookup("REALTIME") {
            parse_into(&mut config.realtime, "REALTIME", &value, parse_bool);
        }

        if let Some(value) = lookup("AUTO_RESTART") {
            parse_into(&mut config.auto_restart, "AUTO_RESTART", &value, parse_bool);
        }

        if let Some(value) = lookup("RESTART_DELAY_MS") {
            match parse_number::<u64>(&value) {
                Some(parsed) if parsed <= game::MAX_RESTART_DELAY_MS => {
                    config.restart_delay_ms = parsed
                }
                Some(_) => tracing::warn!(
                    "RESTART_DELAY_MS must be at most {}, using default",
                    game::MAX_RESTART_DELAY_MS
                ),
                None => tracing::warn!("Invalid RESTART_DELAY_MS '{}', using default", value),
            }
        }

        if let Some(value) = lookup("MAX_TICKS") {
            parse_into(&mut config.max_ticks, "MAX_TICKS", &value, parse_number);
        }

        if let Some(value) = lookup("INPUT_BUFFER_CAPACITY") {
            match value.parse::<usize>() {
                Ok(parsed) if parsed > 0 => config.input_buffer_capacity = parsed,
                Ok(_) => tracing::warn!("INPUT_BUFFER_CAPACITY must be > 0, using default"),
                Err(_) => tracing::warn!("Invalid INPUT_BUFFER_CAPACITY '{}', using default", value),
            }
        }

        if let Some(path) = lookup("INPUT_SCRIPT") {
            if !path.is_empty() {
                config.input_script = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Tick cap, if any
    pub fn tick_cap(&self) -> Option<u64> {
        (self.max_ticks > 0).then_some(self.max_ticks)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.tick_rate) {
            return Err(ConfigError::TickRate(self.tick_rate));
        }
        if self.restart_delay_ms > game::MAX_RESTART_DELAY_MS {
            return Err(ConfigError::RestartDelay(self.restart_delay_ms));
        }
        if self.input_buffer_capacity == 0 {
            return Err(ConfigError::InputBufferCapacity);
        }
        // Realtime runs can always be stopped with Ctrl+C
        if !self.realtime && self.max_ticks == 0 {
            return Err(ConfigError::Unbounded);
        }
        Ok(())
    }

    pub fn game_loop_config(&self) -> GameLoopConfig {
        GameLoopConfig {
            tick_rate: self.tick_rate,
            restart_delay_ms: self.restart_delay_ms,
            auto_restart: self.auto_restart,
            input_buffer_capacity: self.input_buffer_capacity,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("tick rate must be 1-1000 Hz, got {0}")]
    TickRate(u32),
    #[error("restart delay must be at most 3600000 ms, got {0}")]
    RestartDelay(u64),
    #[error("input buffer capacity must be at least 1")]
    InputBufferCapacity,
    #[error("headless runs need MAX_TICKS > 0")]
    Unbounded,
}

fn parse_into<T>(slot: &mut T, key: &str, value: &str, parse: fn(&str) -> Option<T>) {
    match parse(value) {
        Some(parsed) => *slot = parsed,
        None => tracing::warn!("Invalid {} '{}', using default", key, value),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_number<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;

    fn create_test_config(vars: &[(&str, &str)]) -> SimConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert!(!config.realtime);
        assert!(!config.auto_restart);
        assert_eq!(config.restart_delay_ms, 3000);
        assert_eq!(config.tick_cap(), Some(36_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = create_test_config(&[
            ("TICK_RATE", "120"),
            ("REALTIME", "true"),
            ("AUTO_RESTART", "1"),
            ("RESTART_DELAY_MS", "500"),
            ("MAX_TICKS", "0"),
            ("INPUT_SCRIPT", "duel.json"),
            ("INPUT_BUFFER_CAPACITY", "32"),
        ]);

        assert_eq!(config.tick_rate, 120);
        assert!(config.realtime);
        assert!(config.auto_restart);
        assert_eq!(config.restart_delay_ms, 500);
        assert_eq!(config.tick_cap(), None);
        assert_eq!(config.input_script, Some(PathBuf::from("duel.json")));
        assert_eq!(config.input_buffer_capacity, 32);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = create_test_config(&[
            ("TICK_RATE", "0"),
            ("REALTIME", "maybe"),
            ("RESTART_DELAY_MS", "-3"),
            ("INPUT_BUFFER_CAPACITY", "0"),
        ]);
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SimConfig {
            tick_rate: 5000,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TickRate(5000)));

        let config = SimConfig {
            restart_delay_ms: game::MAX_RESTART_DELAY_MS + 1,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RestartDelay(game::MAX_RESTART_DELAY_MS + 1))
        );

        let config = SimConfig {
            input_buffer_capacity: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InputBufferCapacity));

        let config = SimConfig {
            max_ticks: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Unbounded));

        let config = SimConfig {
            realtime: true,
            max_ticks: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_restart_delay_rejected() {
        let config = create_test_config(&[
            ("RESTART_DELAY_MS", "18446744073709551615"),
            ("AUTO_RESTART", "true"),
        ]);
        assert!(config.auto_restart);
        assert_eq!(config.restart_delay_ms, game::RESTART_DELAY_MS);
        assert!(config.validate().is_ok());

        let config = SimConfig {
            auto_restart: true,
            restart_delay_ms: u64::MAX,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RestartDelay(u64::MAX)));

        let config = SimConfig {
            restart_delay_ms: game::MAX_RESTART_DELAY_MS,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_game_loop_config() {
        let config = create_test_config(&[("AUTO_RESTART", "yes"), ("TICK_RATE", "30")]);
        let loop_config = config.game_loop_config();
        assert!(loop_config.auto_restart);
        assert_eq!(loop_config.tick_rate, 30);
        assert_eq!(loop_config.restart_delay_ms, 3000);
    }

    #[test]
    fn test_load_or_default() {
        let config = SimConfig::load_or_default();
        assert!(config.tick_rate > 0);
    }
}
