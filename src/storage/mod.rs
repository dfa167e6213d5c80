//! Persistent key/value storage for the session token.
//!
//! The auth token lives under [`ACCESS_TOKEN_KEY`]. It is written after a
//! successful login or registration, read before every request, and removed
//! on logout.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

/// Key the session token is stored under.
pub const ACCESS_TOKEN_KEY: &str = "AccessToken";

/// String key/value store with synchronous access.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn access_token(&self) -> Result<Option<String>, StorageError> {
        self.get(ACCESS_TOKEN_KEY)
    }
}
