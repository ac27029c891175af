//! Desktop runtime configuration.
//!
//! Compile-time constants live in `platform::config`; this module only covers
//! what a desktop run may override through the environment:
//!
//! | Variable                 | Meaning                            | Default                          |
//! |--------------------------|------------------------------------|----------------------------------|
//! | `WATCHFACE_PERSIST_PATH` | Persistence image file             | `<temp dir>/world-time-watchface.bin` |
//! | `WATCHFACE_CLOCK_24H`    | `true`/`1` for 24h, `false`/`0` for 12h | `true`                      |

use std::path::PathBuf;

use platform::persist_local::PERSIST_PATH_ENV;
use thiserror_no_std::Error;

/// Environment variable selecting the 12/24h clock style.
pub const CLOCK_24H_ENV: &str = "WATCHFACE_CLOCK_24H";

/// File name of the default persistence image.
pub const DEFAULT_PERSIST_FILE: &str = "world-time-watchface.bin";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The clock style variable is not a recognised boolean
    #[error("WATCHFACE_CLOCK_24H must be one of true/false/1/0, got {0:?}")]
    InvalidClockStyle(String),
}

/// Settings for a desktop run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Where the offset is persisted
    pub persist_path: PathBuf,
    /// `true` for a 24-hour clock
    pub clock_24h: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            persist_path: std::env::temp_dir().join(DEFAULT_PERSIST_FILE),
            clock_24h: true,
        }
    }
}

impl RuntimeConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup`, falling back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = lookup(PERSIST_PATH_ENV).filter(|p| !p.is_empty()) {
            config.persist_path = PathBuf::from(path);
        }
        if let Some(style) = lookup(CLOCK_24H_ENV) {
            config.clock_24h = parse_bool(&style).ok_or(ConfigError::InvalidClockStyle(style))?;
        }
        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
