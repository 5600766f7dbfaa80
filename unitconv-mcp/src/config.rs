//! Server configuration from the environment

use std::env;
use std::str::FromStr;
use tracing::warn;
use unitconv_core::DEFAULT_SIGFIGS;

pub const SIGFIGS_VAR: &str = "UNITCONV_SIGFIGS";
pub const HISTORY_LIMIT_VAR: &str = "UNITCONV_HISTORY_LIMIT";

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Significant digits in displayed results (1..=17)
    pub sigfigs: u32,
    /// Number of recent conversions kept in the session
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sigfigs: DEFAULT_SIGFIGS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let sigfigs: u32 = parse_var(&lookup, SIGFIGS_VAR, defaults.sigfigs);
        let history_limit: usize = parse_var(&lookup, HISTORY_LIMIT_VAR, defaults.history_limit);

        Config {
            sigfigs: sigfigs.clamp(1, 17),
            history_limit: history_limit.max(1),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, %default, "ignoring unparseable setting");
            default
        }),
    }
}
