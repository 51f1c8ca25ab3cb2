use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Filesystem step that failed while touching the token file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    CreateDir,
    Read,
    Write,
    Remove,
    Backup,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::CreateDir => "create directory",
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::Remove => "remove",
            FileOp::Backup => "set aside corrupted",
        })
    }
}

/// Errors from persisting or reading session tokens.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("cannot {op} {path}: {source} {location}")]
    File {
        op: FileOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    /// The fully written temp file could not replace the token file.
    #[error("cannot move {from} over {to}: {source} {location}")]
    Replace {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("cannot encode tokens: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("token store lock poisoned {location}")]
    Poisoned { location: ErrorLocation },
}

impl StorageError {
    /// What the user can do about it. Shown instead of the raw error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            StorageError::File { op, .. } => match op {
                FileOp::CreateDir | FileOp::Write => {
                    "Could not save your session. Check free space and permissions of the config directory."
                }
                FileOp::Read => "Could not read your saved session. Try logging in again.",
                FileOp::Remove => {
                    "Could not delete your saved session. Remove the token file by hand to sign out."
                }
                FileOp::Backup => {
                    "The saved session is damaged and could not be moved aside. Remove the token file by hand."
                }
            },
            StorageError::Replace { .. } => {
                "Could not save your session. Check free space and try again."
            }
            StorageError::Encode { .. } => "Could not save your session.",
            StorageError::Poisoned { .. } => "Session storage is unusable. Restart the application.",
        }
    }

    #[track_caller]
    fn file(op: FileOp, path: PathBuf, source: std::io::Error) -> Self {
        StorageError::File {
            op,
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn dir_creation(path: PathBuf, source: std::io::Error) -> Self {
        Self::file(FileOp::CreateDir, path, source)
    }

    #[track_caller]
    pub fn file_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::file(FileOp::Read, path, source)
    }

    #[track_caller]
    pub fn file_write(path: PathBuf, source: std::io::Error) -> Self {
        Self::file(FileOp::Write, path, source)
    }

    #[track_caller]
    pub fn file_remove(path: PathBuf, source: std::io::Error) -> Self {
        Self::file(FileOp::Remove, path, source)
    }

    #[track_caller]
    pub fn backup_failed(path: PathBuf, source: std::io::Error) -> Self {
        Self::file(FileOp::Backup, path, source)
    }

    #[track_caller]
    pub fn replace_failed(from: PathBuf, to: PathBuf, source: std::io::Error) -> Self {
        StorageError::Replace {
            from,
            to,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn poisoned() -> Self {
        StorageError::Poisoned {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        StorageError::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
