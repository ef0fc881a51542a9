//! Server configuration read from `CHESS_*` environment variables.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::game::Scoring;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_STATIC_DIR: &str = "./static";
pub const DEFAULT_REPLY_DELAY_MS: u64 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    /// Pause before the opponent answers a human move
    pub reply_delay: Duration,
    pub scoring: Scoring,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            scoring: Scoring::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.variable, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("CHESS_BIND_ADDR") {
            if addr.trim().is_empty() {
                return Err(ConfigError {
                    variable: "CHESS_BIND_ADDR",
                    value: addr,
                    reason: "must not be empty",
                });
            }
            config.bind_addr = addr;
        }

        if let Some(dir) = lookup("CHESS_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("CHESS_REPLY_DELAY_MS") {
            let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError {
                variable: "CHESS_REPLY_DELAY_MS",
                value: raw.clone(),
                reason: "expected a whole number of milliseconds",
            })?;
            config.reply_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup("CHESS_SCORING") {
            config.scoring = match raw.trim() {
                "standard" => Scoring::Standard,
                "side-to-move-loses" => Scoring::SideToMoveLoses,
                _ => {
                    return Err(ConfigError {
                        variable: "CHESS_SCORING",
                        value: raw,
                        reason: "expected `standard` or `side-to-move-loses`",
                    })
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
