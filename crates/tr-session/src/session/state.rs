use crate::identity::Identity;

/// Lifecycle of the session as seen by consumers.
///
/// ```text
/// Uninitialized -> Loading -> Authenticated | Anonymous
/// Anonymous -> Authenticated            (login, OTP verify)
/// Authenticated -> Anonymous            (logout, failed resolution)
/// Authenticated -> Authenticated        (profile update)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Loading,
    Authenticated(Identity),
    Anonymous,
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Identity-dependent output must wait until this is false.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Uninitialized | SessionState::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Loading => "loading",
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Anonymous => "anonymous",
        }
    }
}
