//! Startup configuration for news field limits.
//!
//! # Responsibility
//! - Read `TITLE_LENGTH_MAX` and `TEXT_LENGTH_MAX` once at startup.
//!
//! # Invariants
//! - Both settings are required; there are no silent defaults.
//! - The store receives limits by value and never reads the environment.

use crate::model::news::NewsLimits;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TITLE_LENGTH_MAX_ENV: &str = "TITLE_LENGTH_MAX";
pub const TEXT_LENGTH_MAX_ENV: &str = "TEXT_LENGTH_MAX";

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid { key, value } => write!(
                f,
                "setting `{key}` must be a non-negative integer, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

impl NewsLimits {
    /// Loads limits from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads limits through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::new(
            read_usize(&lookup, TITLE_LENGTH_MAX_ENV)?,
            read_usize(&lookup, TEXT_LENGTH_MAX_ENV)?,
        ))
    }
}

fn read_usize<F>(lookup: &F, key: &'static str) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or(ConfigError::Missing(key))?;
    let parsed: Result<usize, _> = raw.trim().parse();
    parsed.map_err(|_| ConfigError::Invalid { key, value: raw })
}
