//! Client-side storage for the SpringBoard launchpad front-end.
//!
//! This crate provides the two storage scopes the client needs:
//! - **Durable** storage for the auth session (token + user record),
//!   backed by a JSON file (the browser local-storage analog).
//! - **Ephemeral** storage for one-shot flags passed between the OAuth
//!   redirect handler and the auth layer (the session-storage analog).
//!
//! Both scopes sit behind the same [`StorageBackend`] trait so the
//! higher layers stay testable with an in-memory backend.

mod file;
mod flash;
mod keys;
mod memory;
mod session;
mod traits;

pub use file::JsonFileStorage;
pub use flash::FlashStore;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use session::{AuthMethod, SessionStore, UserRecord};
pub use traits::StorageBackend;

use std::path::Path;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific failure (corrupt file, unwritable directory, ...)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Create a durable session store persisted at the given file path.
pub fn open_session_store(path: impl AsRef<Path>) -> StorageResult<SessionStore> {
    let storage = JsonFileStorage::open(path)?;
    Ok(SessionStore::new(Box::new(storage)))
}

/// Create an ephemeral flash store for one-shot flags.
pub fn ephemeral_flash_store() -> FlashStore {
    FlashStore::new(Box::new(MemoryStorage::new()))
}
