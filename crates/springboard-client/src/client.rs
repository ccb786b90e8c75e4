//! Top-level wiring of storage, gateway, auth, and OAuth.

use crate::Config;
use springboard_api::{ApiClient, SessionInvalidatedHook};
use springboard_auth::{AuthController, AuthStatus, WalletProvider};
use springboard_oauth::OAuthBridge;
use springboard_storage::{
    ephemeral_flash_store, open_session_store, MemoryStorage, SessionStore, StorageResult,
};
use std::sync::{Arc, OnceLock, Weak};
use tracing::info;

/// The assembled SpringBoard client.
///
/// Owns one of everything and ties the 401 hook on the gateway back to
/// the auth controller: when any authenticated request comes back 401,
/// the gateway clears the session and the controller resets to
/// Anonymous with a "session expired" message.
pub struct Springboard {
    config: Config,
    api: Arc<ApiClient>,
    auth: Arc<AuthController>,
    oauth: OAuthBridge,
    store: Arc<SessionStore>,
}

impl Springboard {
    /// Assemble a client from the configuration and a wallet provider.
    pub fn new(config: Config, wallet: Arc<dyn WalletProvider>) -> StorageResult<Self> {
        let store = Arc::new(match &config.session_file {
            Some(path) => open_session_store(path)?,
            None => SessionStore::new(Box::new(MemoryStorage::new())),
        });

        // The hook is injected into the gateway before the controller
        // exists, so it reaches the controller through a late-bound
        // weak reference.
        let controller_slot: Arc<OnceLock<Weak<AuthController>>> = Arc::new(OnceLock::new());
        let hook_slot = controller_slot.clone();
        let hook: SessionInvalidatedHook = Arc::new(move || {
            if let Some(controller) = hook_slot.get().and_then(Weak::upgrade) {
                controller.session_invalidated();
            }
        });

        let api = Arc::new(ApiClient::new(
            config.api_base_url.clone(),
            store.clone(),
            Some(hook),
        ));

        let auth = Arc::new(AuthController::new(api.clone(), wallet, store.clone()));
        let _ = controller_slot.set(Arc::downgrade(&auth));

        let oauth = OAuthBridge::new(auth.clone(), Arc::new(ephemeral_flash_store()));

        info!(base_url = %config.api_base_url, "SpringBoard client assembled");

        Ok(Self {
            config,
            api,
            auth,
            oauth,
            store,
        })
    }

    /// Restore a persisted session, if one exists.
    pub fn restore_session(&self) -> springboard_auth::AuthResult<bool> {
        self.auth.restore_session()
    }

    /// Current auth status.
    pub fn status(&self) -> AuthStatus {
        self.auth.status()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// REST gateway for everything beyond auth.
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Wallet auth controller.
    pub fn auth(&self) -> &Arc<AuthController> {
        &self.auth
    }

    /// Google OAuth redirect handler.
    pub fn oauth(&self) -> &OAuthBridge {
        &self.oauth
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}
