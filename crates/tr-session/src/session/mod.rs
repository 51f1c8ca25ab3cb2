pub(crate) mod domain;
pub(crate) mod error;
pub(crate) mod manager;
pub(crate) mod options;
pub(crate) mod state;

pub use domain::BookingStatus;
pub use error::{Result as SessionResult, SessionError};
pub use manager::SessionManager;
pub use options::SessionOptions;
pub use state::SessionState;
