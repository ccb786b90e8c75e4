//! One-shot flags for the OAuth redirect handoff.

use crate::{StorageBackend, StorageKeys, StorageResult};

/// Short-lived flags written by the OAuth bridge and consumed exactly
/// once by the auth layer. Every read deletes the entry.
pub struct FlashStore {
    storage: Box<dyn StorageBackend>,
}

impl FlashStore {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Stash an OAuth failure message for the auth layer to surface.
    pub fn stash_oauth_error(&self, message: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::PENDING_OAUTH_ERROR, message)
    }

    /// Take the pending OAuth error, clearing it.
    pub fn take_oauth_error(&self) -> StorageResult<Option<String>> {
        let value = self.storage.get(StorageKeys::PENDING_OAUTH_ERROR)?;
        if value.is_some() {
            let _ = self.storage.delete(StorageKeys::PENDING_OAUTH_ERROR)?;
        }
        Ok(value)
    }

    /// Mark that the client just landed from an OAuth redirect.
    pub fn mark_oauth_landing(&self) -> StorageResult<()> {
        self.storage.set(StorageKeys::OAUTH_LANDING, "1")
    }

    /// Take the OAuth landing flag, clearing it.
    pub fn take_oauth_landing(&self) -> StorageResult<bool> {
        let present = self.storage.has(StorageKeys::OAUTH_LANDING)?;
        if present {
            let _ = self.storage.delete(StorageKeys::OAUTH_LANDING)?;
        }
        Ok(present)
    }
}
