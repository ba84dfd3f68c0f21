//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Provide defaults for storage location, logging and theme fallback.
//! - Apply environment overrides (`TASKNEST_*`).

use crate::host::FixedPreference;
use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TASKNEST_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TASKNEST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKNEST_LOG_DIR";
pub const ENV_PREFERS_DARK: &str = "TASKNEST_PREFERS_DARK";

const DEFAULT_DB_FILE_NAME: &str = "tasknest.sqlite3";

/// Invalid override value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid value `{}` for {}; expected {}",
            self.value, self.variable, self.expected
        )
    }
}

impl Error for ConfigError {}

/// Effective core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file holding the key-value snapshot.
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
    /// Ambient color-scheme preference used on first run.
    pub prefers_dark: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
            prefers_dark: false,
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = get(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(|_| ConfigError {
                variable: ENV_LOG_LEVEL,
                value: level.clone(),
                expected: "trace|debug|info|warn|error",
            })?;
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = get(ENV_PREFERS_DARK) {
            config.prefers_dark = parse_flag(&flag).ok_or_else(|| ConfigError {
                variable: ENV_PREFERS_DARK,
                value: flag.clone(),
                expected: "true|false|1|0|yes|no",
            })?;
        }

        Ok(config)
    }

    /// Ambient preference derived from `prefers_dark`.
    pub fn ambient_preference(&self) -> FixedPreference {
        FixedPreference(self.prefers_dark)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_PREFERS_DARK};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn overrides_are_applied_and_normalized() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/tasks.sqlite3"),
            (ENV_LOG_LEVEL, " Warning "),
            (ENV_PREFERS_DARK, "YES"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/tasks.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert!(config.prefers_dark);
    }

    #[test]
    fn invalid_flag_names_the_variable() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_PREFERS_DARK, "maybe")])).unwrap_err();
        assert_eq!(err.variable, ENV_PREFERS_DARK);
        assert!(err.to_string().contains("maybe"));
    }
}
