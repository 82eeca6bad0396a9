//! Runtime configuration read from the environment.
//!
//! | Variable             | Meaning                               | Default                     |
//! |----------------------|---------------------------------------|-----------------------------|
//! | `SAFRA_DB_PATH`      | SQLite slot database file             | `<tmp>/safra.sqlite3`       |
//! | `SAFRA_LOG_LEVEL`    | `trace`/`debug`/`info`/`warn`/`error` | build-mode default          |
//! | `SAFRA_LOG_DIR`      | absolute directory for rolling logs   | unset (file logging off)    |
//! | `SAFRA_PERSISTENCE`  | `best_effort` or `strict`             | `best_effort`               |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, normalize_level};
use crate::repo::collection::PersistencePolicy;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SAFRA_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "SAFRA_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SAFRA_LOG_DIR";
pub const PERSISTENCE_ENV: &str = "SAFRA_PERSISTENCE";

const DEFAULT_DB_FILE_NAME: &str = "safra.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
    InvalidPersistencePolicy(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{}: {message}", LOG_LEVEL_ENV),
            Self::RelativeLogDir(path) => write!(
                f,
                "{} must be an absolute path, got `{}`",
                LOG_DIR_ENV,
                path.display()
            ),
            Self::InvalidPersistencePolicy(value) => write!(
                f,
                "{} must be `best_effort` or `strict`, got `{value}`",
                PERSISTENCE_ENV
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub persistence: PersistencePolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            persistence: PersistencePolicy::default(),
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| non_blank(lookup(name));

        let mut config = Self::default();
        if let Some(path) = value(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = value(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level)
                .map_err(ConfigError::InvalidLogLevel)?
                .to_string();
        }
        if let Some(dir) = value(LOG_DIR_ENV) {
            let dir = PathBuf::from(dir);
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(dir);
        }
        if let Some(policy) = value(PERSISTENCE_ENV) {
            config.persistence = parse_persistence_policy(&policy)?;
        }
        Ok(config)
    }
}

/// Trimmed value of the variable `name`, or `None` when unset or blank.
pub fn env_value(name: &str) -> Option<String> {
    non_blank(std::env::var(name).ok())
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

pub fn parse_persistence_policy(value: &str) -> Result<PersistencePolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "best_effort" => Ok(PersistencePolicy::BestEffort),
        "strict" => Ok(PersistencePolicy::Strict),
        _ => Err(ConfigError::InvalidPersistencePolicy(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        non_blank, ConfigError, CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV,
        PERSISTENCE_ENV,
    };
    use crate::repo::collection::PersistencePolicy;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.log_dir.is_none());
        assert_eq!(config.persistence, PersistencePolicy::BestEffort);
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            (DB_PATH_ENV, " /data/farm.sqlite3 "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, "/var/log/safra"),
            (PERSISTENCE_ENV, "Strict"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/data/farm.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/safra")));
        assert_eq!(config.persistence, PersistencePolicy::Strict);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(DB_PATH_ENV, "  "), (LOG_DIR_ENV, "")]).unwrap();
        assert_eq!(config.db_path, CoreConfig::default().db_path);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn whitespace_only_values_read_as_unset() {
        assert_eq!(non_blank(Some(" \t ".to_string())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(
            non_blank(Some(" /data/a.db ".to_string())).as_deref(),
            Some("/data/a.db")
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[(LOG_DIR_ENV, "logs")]),
            Err(ConfigError::RelativeLogDir(_))
        ));
        assert!(matches!(
            config_from(&[(PERSISTENCE_ENV, "sometimes")]),
            Err(ConfigError::InvalidPersistencePolicy(_))
        ));
        assert!(matches!(
            config_from(&[(LOG_LEVEL_ENV, "loud")]),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
