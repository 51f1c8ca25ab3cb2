use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Why the configuration could not be loaded or was rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value in `[section]` is out of range or malformed.
    #[error("invalid [{section}] setting: {message} {location}")]
    Invalid {
        section: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// The process environment does not allow locating the config directory.
    #[error("cannot locate config directory: {message} {location}")]
    Environment {
        message: String,
        location: ErrorLocation,
    },

    #[error("cannot access {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn api(message: impl Into<String>) -> Self {
        Self::invalid("api", message.into())
    }

    #[track_caller]
    pub fn session(message: impl Into<String>) -> Self {
        Self::invalid("session", message.into())
    }

    #[track_caller]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::invalid("logging", message.into())
    }

    #[track_caller]
    pub fn environment(message: impl Into<String>) -> Self {
        ConfigError::Environment {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    fn invalid(section: &'static str, message: String) -> Self {
        ConfigError::Invalid {
            section,
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = Result<T, ConfigError>;
