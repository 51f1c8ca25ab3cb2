use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use tr_config::ConfigError;
use tr_session::SessionError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Failure of a session operation. The operation has already notified.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The session could not be built, so nothing has been reported yet.
    #[error("Cannot start session: {0}")]
    Startup(SessionError),

    #[error("Invalid argument: {message} {location}")]
    InvalidArgument {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_session(&self) -> bool {
        matches!(self, CliError::Session(_))
    }

    /// One-line text for stderr.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Session(e) => e.user_message(),
            CliError::Startup(e) => format!("Cannot start session: {}", e.user_message()),
            CliError::InvalidArgument { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
