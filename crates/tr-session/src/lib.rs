//! Client-side session management for the TailoRent API.
//!
//! [`SessionManager`] owns the logged-in [`Identity`] and the persisted
//! [`CredentialPair`]; every other part of an application reads session
//! state from it and sends authorized requests through it.

pub(crate) mod api;
pub(crate) mod credentials;
pub(crate) mod identity;
pub(crate) mod notification;
pub(crate) mod session;
pub(crate) mod store;

#[cfg(test)]
mod tests;

pub use api::{
    ApiClient, ClientError, ClientResult,
    requests::{ChangePasswordRequest, NewBooking, ProfileUpdate, RegisterRequest},
    responses::{AuthResponse, RefreshResponse},
};
pub use credentials::{ACCESS_TOKEN_KEY, CredentialPair, REFRESH_TOKEN_KEY};
pub use identity::{Identity, Role};
pub use notification::{LogNotifier, Notification, NotificationKind, Notifier, RecordingNotifier};
pub use session::{
    BookingStatus, SessionError, SessionManager, SessionOptions, SessionResult, SessionState,
};
pub use store::{FileTokenStore, MemoryTokenStore, StorageError, StorageResult, TokenStore};
