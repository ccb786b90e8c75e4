//! High-level session store.
//!
//! Persists the `{token, user}` pair that represents an authenticated
//! client. The invariant is that a session exists in storage iff the
//! user is considered authenticated: token and user record are written
//! together via [`SessionStore::set_session`] and removed together via
//! [`SessionStore::clear`].

use crate::{StorageBackend, StorageKeys, StorageResult};
use serde::{Deserialize, Serialize};

/// How the current session was established.
///
/// Determines which invalidation rules apply: wallet sessions are torn
/// down when the wallet disconnects or switches address; Google/OAuth
/// sessions survive both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Wallet,
    Google,
}

/// The authenticated user, as persisted alongside the token.
///
/// Never mutated in place: replaced wholesale on re-authentication,
/// destroyed on logout or a 401.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub wallet_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_kyc_verified: Option<bool>,
    pub auth_method: AuthMethod,
}

/// High-level API for the persisted auth session.
pub struct SessionStore {
    storage: Box<dyn StorageBackend>,
}

impl SessionStore {
    /// Create a session store over the given storage backend.
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    // ==========================================
    // Token
    // ==========================================

    pub fn set_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::AUTH_TOKEN, token)
    }

    pub fn get_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::AUTH_TOKEN)
    }

    pub fn clear_token(&self) -> StorageResult<()> {
        let _ = self.storage.delete(StorageKeys::AUTH_TOKEN)?;
        Ok(())
    }

    // ==========================================
    // Refresh token (OAuth sessions only)
    // ==========================================

    pub fn set_refresh_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::REFRESH_TOKEN, token)
    }

    pub fn get_refresh_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::REFRESH_TOKEN)
    }

    // ==========================================
    // User record
    // ==========================================

    /// Store the user record as JSON.
    pub fn set_user(&self, user: &UserRecord) -> StorageResult<()> {
        let json = serde_json::to_string(user)
            .map_err(|e| crate::StorageError::Encoding(e.to_string()))?;
        self.storage.set(StorageKeys::USER_RECORD, &json)
    }

    /// Retrieve the persisted user record.
    ///
    /// Corrupt entries are treated as absent: malformed JSON yields
    /// `Ok(None)` rather than an error.
    pub fn get_user(&self) -> StorageResult<Option<UserRecord>> {
        match self.storage.get(StorageKeys::USER_RECORD)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(user) => Ok(Some(user)),
                Err(e) => {
                    tracing::warn!(error = %e, "Persisted user record is malformed, treating as absent");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub fn clear_user(&self) -> StorageResult<()> {
        let _ = self.storage.delete(StorageKeys::USER_RECORD)?;
        Ok(())
    }

    // ==========================================
    // Whole session
    // ==========================================

    /// Persist a complete session (token + optional refresh token + user).
    pub fn set_session(
        &self,
        token: &str,
        refresh_token: Option<&str>,
        user: &UserRecord,
    ) -> StorageResult<()> {
        self.set_token(token)?;
        if let Some(refresh) = refresh_token {
            self.set_refresh_token(refresh)?;
        }
        self.set_user(user)
    }

    /// A session exists iff both the token and the user record are present.
    pub fn has_session(&self) -> StorageResult<bool> {
        let has_token = self.storage.has(StorageKeys::AUTH_TOKEN)?;
        let has_user = self.storage.has(StorageKeys::USER_RECORD)?;
        Ok(has_token && has_user)
    }

    /// Remove token, refresh token and user record together.
    pub fn clear(&self) -> StorageResult<()> {
        let _ = self.storage.delete(StorageKeys::AUTH_TOKEN);
        let _ = self.storage.delete(StorageKeys::REFRESH_TOKEN);
        let _ = self.storage.delete(StorageKeys::USER_RECORD);
        Ok(())
    }
}
