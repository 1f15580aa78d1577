//! Runtime configuration: where the job table lives and what to do when it
//! cannot be read.
//!
//! Precedence, lowest first: built-in defaults, the JSON file named by
//! `JOB_DATA_CONFIG`, then the individual `JOB_DATA_*` environment variables.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::data::loader::SourceConfig;

pub const CONFIG_FILE_VAR: &str = "JOB_DATA_CONFIG";
pub const DATA_FILE_VAR: &str = "JOB_DATA_FILE";
pub const DELIMITER_VAR: &str = "JOB_DATA_DELIMITER";
pub const ON_LOAD_FAILURE_VAR: &str = "JOB_DATA_ON_LOAD_FAILURE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// What the composition root does when the initial load fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadFailurePolicy {
    /// Report the error and stop.
    #[default]
    Abort,
    /// Report the error and continue with an empty table.
    Empty,
}

impl LoadFailurePolicy {
    fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(LoadFailurePolicy::Abort),
            "empty" => Ok(LoadFailurePolicy::Empty),
            other => Err(ConfigError::InvalidValue {
                key: ON_LOAD_FAILURE_VAR,
                reason: format!("expected 'abort' or 'empty', got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the delimited job table.
    pub data_file: PathBuf,
    /// Field separator; must be a single ASCII character.
    pub delimiter: char,
    pub on_load_failure: LoadFailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("job_data.csv"),
            delimiter: ',',
            on_load_failure: LoadFailurePolicy::default(),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Some(file) = lookup(DATA_FILE_VAR) {
            config.data_file = PathBuf::from(file);
        }
        if let Some(delim) = lookup(DELIMITER_VAR) {
            let mut chars = delim.chars();
            config.delimiter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: DELIMITER_VAR,
                        reason: format!("expected one character, got '{delim}'"),
                    })
                }
            };
        }
        if let Some(policy) = lookup(ON_LOAD_FAILURE_VAR) {
            config.on_load_failure = LoadFailurePolicy::parse(&policy)?;
        }

        config.source()?;
        Ok(config)
    }

    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// The loader's view of this configuration.
    pub fn source(&self) -> Result<SourceConfig, ConfigError> {
        if !self.delimiter.is_ascii() {
            return Err(ConfigError::InvalidValue {
                key: "delimiter",
                reason: format!("'{}' is not an ASCII character", self.delimiter),
            });
        }
        Ok(SourceConfig {
            path: self.data_file.clone(),
            delimiter: self.delimiter as u8,
        })
    }
}
