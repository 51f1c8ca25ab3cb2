use crate::{
    credentials::{ACCESS_TOKEN_KEY, CredentialPair, REFRESH_TOKEN_KEY},
    store::error::Result as StorageResult,
};

/// Persistent key/value storage for session tokens.
///
/// Implementations must survive process restarts (except test doubles).
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Persist both tokens. Override when the backend can do it in one write.
    fn set_pair(&self, pair: &CredentialPair) -> StorageResult<()> {
        self.set(ACCESS_TOKEN_KEY, &pair.access)?;
        self.set(REFRESH_TOKEN_KEY, &pair.refresh)
    }

    /// Remove both tokens.
    fn clear(&self) -> StorageResult<()> {
        self.remove(ACCESS_TOKEN_KEY)?;
        self.remove(REFRESH_TOKEN_KEY)
    }
}
