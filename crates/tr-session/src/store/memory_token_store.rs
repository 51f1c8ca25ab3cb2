use crate::{
    credentials::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY},
    store::{
        error::{Result as StorageResult, StorageError},
        token_store::TokenStore,
    },
};

use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-process token store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an access and a refresh token.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let entries = BTreeMap::from([
            (ACCESS_TOKEN_KEY.to_string(), access.to_string()),
            (REFRESH_TOKEN_KEY.to_string(), refresh.to_string()),
        ]);
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.is_empty())
            .unwrap_or(false)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
