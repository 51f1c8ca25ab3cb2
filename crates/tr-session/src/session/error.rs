use crate::{api::ClientError, store::StorageError};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors surfaced by session operations.
///
/// `message` is always fit for display: the server's own text when it sent
/// one, otherwise the operation's fallback.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Network error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
        #[source]
        source: ClientError,
    },

    #[error("Authentication failed (HTTP {status}): {message} {location}")]
    Authentication {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Server error{}: {message} {location}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Server {
        status: Option<u16>,
        message: String,
        location: ErrorLocation,
        #[source]
        source: Option<ClientError>,
    },

    #[error("Not logged in {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Session configuration error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },
}

impl SessionError {
    /// Classify a transport error, using `fallback` when the server gave no message.
    #[track_caller]
    pub fn from_client(err: ClientError, fallback: &str) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let message = err
            .server_message()
            .map(String::from)
            .unwrap_or_else(|| fallback.to_string());

        match err {
            ClientError::Http { .. } => SessionError::Network {
                message,
                location,
                source: err,
            },
            ClientError::Api { status, .. } if (400..500).contains(&status) => {
                SessionError::Authentication {
                    status,
                    message,
                    location,
                }
            }
            ClientError::Api { status, .. } => SessionError::Server {
                status: Some(status),
                message,
                location,
                source: None,
            },
            ClientError::Json { .. } => SessionError::Server {
                status: None,
                message,
                location,
                source: Some(err),
            },
        }
    }

    #[track_caller]
    pub fn not_authenticated() -> Self {
        SessionError::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config(message: impl Into<String>) -> Self {
        SessionError::Config {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text for the user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Network { message, .. }
            | SessionError::Authentication { message, .. }
            | SessionError::Server { message, .. }
            | SessionError::Config { message, .. } => message.clone(),
            SessionError::NotAuthenticated { .. } => String::from("Please log in first"),
            SessionError::Storage(err) => err.recovery_hint().to_string(),
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::Authentication { status, .. } => Some(*status),
            SessionError::Server { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
