pub(crate) mod error;
pub(crate) mod file_token_store;
pub(crate) mod memory_token_store;
pub(crate) mod token_store;

pub use error::{Result as StorageResult, StorageError};
pub use file_token_store::FileTokenStore;
pub use memory_token_store::MemoryTokenStore;
pub use token_store::TokenStore;
