//! Environment-backed configuration helpers
//!
//! Services read their settings exactly once at startup through [`Env`].
//! The lookup function is injectable so configuration parsing can be tested
//! without mutating the process environment.

use std::fmt::Display;
use std::str::FromStr;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Reads configuration values through a lookup function
pub struct Env<F> {
    lookup: F,
}

/// Lookup backed by the process environment
pub type ProcessLookup = fn(&str) -> Option<String>;

impl Env<ProcessLookup> {
    /// Read from the real process environment
    pub fn process() -> Self {
        Self {
            lookup: |name: &str| std::env::var(name).ok(),
        }
    }
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Get a trimmed value; blank values count as unset
    pub fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn string_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    pub fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    /// Parse a value, falling back to `default` when unset
    pub fn parse_or<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(name) {
            None => Ok(default),
            Some(value) => match value.parse::<T>() {
                Ok(parsed) => Ok(parsed),
                Err(e) => Err(ConfigError::Invalid {
                    name,
                    reason: e.to_string(),
                    value,
                }),
            },
        }
    }

    /// Parse a size given in megabytes and return it in bytes
    pub fn megabytes_or(&self, name: &'static str, default_mb: usize) -> Result<usize, ConfigError> {
        let megabytes: usize = self.parse_or(name, default_mb)?;
        megabytes
            .checked_mul(1024 * 1024)
            .ok_or_else(|| ConfigError::Invalid {
                name,
                value: megabytes.to_string(),
                reason: "size in bytes does not fit in usize".to_string(),
            })
    }
}
