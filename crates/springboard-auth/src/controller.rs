//! Wallet auth flow controller with FSM-based state tracking.
//!
//! The controller owns the state machine and drives the nonce → sign →
//! verify flow, the registration branch, and the session invalidation
//! rules. Session data itself lives in the [`SessionStore`]; the FSM
//! tracks the transient flow states that are never persisted.

use crate::backend::AuthBackend;
use crate::machine::{
    AuthMachine, AuthMachineInput, AuthStatus, PendingRegistration,
};
use crate::wallet::{WalletError, WalletProvider};
use crate::{AuthError, AuthResult};
use springboard_api::{ApiError, RegisterWalletRequest};
use springboard_storage::{AuthMethod, SessionStore, UserRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

const ERR_WALLET_CHANGED: &str = "Wallet changed. Please sign in again.";
const ERR_SIGNATURE_REJECTED: &str = "Signature rejected. Please try again.";
const ERR_SESSION_EXPIRED: &str = "Session expired. Please sign in again.";
const ERR_GENERIC: &str = "Authentication failed. Please try again.";

/// Callback type for auth status change notifications.
pub type AuthStatusCallback = Box<dyn Fn(AuthStatus) + Send + Sync>;

/// Releases the in-flight flag when the attempt ends, on every path.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives wallet authentication against the backend.
///
/// One controller per app instance. All methods take `&self`; internal
/// state is behind mutexes and an atomic in-flight flag, so a second
/// `login`/`register` while one is running is a no-op instead of a
/// duplicate signature prompt.
pub struct AuthController {
    backend: Arc<dyn AuthBackend>,
    wallet: Arc<dyn WalletProvider>,
    store: Arc<SessionStore>,
    fsm: Mutex<AuthMachine>,
    /// Signature kept between verify saying "no account" and register.
    pending: Mutex<Option<PendingRegistration>>,
    /// Last user-facing error message, if any.
    error: Mutex<Option<String>>,
    /// Set while a login or register attempt is running.
    in_flight: AtomicBool,
    status_callback: Mutex<Option<AuthStatusCallback>>,
}

impl AuthController {
    /// Create a new controller.
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        wallet: Arc<dyn WalletProvider>,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            backend,
            wallet,
            store,
            fsm: Mutex::new(AuthMachine::new()),
            pending: Mutex::new(None),
            error: Mutex::new(None),
            in_flight: AtomicBool::new(false),
            status_callback: Mutex::new(None),
        }
    }

    /// Set a callback to be notified of status changes.
    pub fn set_status_callback(&self, callback: AuthStatusCallback) {
        let mut cb = self.status_callback.lock().unwrap();
        *cb = Some(callback);
    }

    /// Current auth status.
    pub fn status(&self) -> AuthStatus {
        let fsm = self.fsm.lock().unwrap();
        AuthStatus::from(fsm.state())
    }

    /// Last user-facing error message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }

    /// The registration waiting to be completed, if verify reported an
    /// unknown wallet.
    pub fn pending_registration(&self) -> Option<PendingRegistration> {
        self.pending.lock().unwrap().clone()
    }

    /// Session store backing this controller.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Transition the FSM and notify the callback if the status changed.
    fn transition(&self, input: &AuthMachineInput) -> AuthResult<AuthStatus> {
        let mut fsm = self.fsm.lock().unwrap();
        let old_status = AuthStatus::from(fsm.state());

        fsm.consume(input).map_err(|_| {
            AuthError::InvalidStateTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                fsm.state()
            ))
        })?;

        let new_status = AuthStatus::from(fsm.state());
        drop(fsm);

        if old_status != new_status {
            debug!(old = ?old_status, new = ?new_status, "Auth status transition");
            self.notify_status_change(&new_status);
        }

        Ok(new_status)
    }

    fn notify_status_change(&self, status: &AuthStatus) {
        let cb = self.status_callback.lock().unwrap();
        if let Some(callback) = cb.as_ref() {
            callback(status.clone());
        }
    }

    fn set_error(&self, message: impl Into<String>) {
        *self.error.lock().unwrap() = Some(message.into());
    }

    fn clear_error_message(&self) {
        *self.error.lock().unwrap() = None;
    }

    /// Persist the session and move the FSM to Authenticated.
    fn adopt_session(
        &self,
        token: &str,
        refresh_token: Option<&str>,
        user: &UserRecord,
        input: &AuthMachineInput,
    ) -> AuthResult<()> {
        self.store.set_session(token, refresh_token, user)?;
        *self.pending.lock().unwrap() = None;
        self.clear_error_message();
        self.transition(input)?;
        info!(user_id = %user.id, method = ?user.auth_method, "Signed in");
        Ok(())
    }

    /// Restore a persisted session on startup.
    ///
    /// Returns `Ok(true)` if a stored session was adopted. The token is
    /// not validated here; the first authenticated request surfaces a
    /// 401 if the server has revoked it.
    pub fn restore_session(&self) -> AuthResult<bool> {
        if !self.store.has_session()? {
            debug!("No stored session to restore");
            return Ok(false);
        }

        self.transition(&AuthMachineInput::SessionRestored)?;
        info!("Restored stored session");
        Ok(true)
    }

    /// Run the wallet login flow: nonce → sign → verify.
    ///
    /// - No connected wallet fails with [`AuthError::WalletNotConnected`]
    ///   without touching the FSM.
    /// - A concurrent call while one attempt is running is a no-op.
    /// - A verify result of "no account" parks the signature as a
    ///   pending registration and fails with
    ///   [`AuthError::RegistrationRequired`]; call [`Self::register`]
    ///   next.
    pub async fn login(&self) -> AuthResult<()> {
        let address = match self.wallet.address() {
            Some(a) => a,
            None => {
                warn!("Login requested with no wallet connected");
                return Err(AuthError::WalletNotConnected);
            }
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Login already in flight, ignoring");
            return Ok(());
        }
        let _guard = FlightGuard(&self.in_flight);

        // Already authenticated (or otherwise not in a startable state):
        // ignore rather than fail, matching the double-click case.
        if self.transition(&AuthMachineInput::LoginStarted).is_err() {
            debug!(status = ?self.status(), "Login not startable from current status, ignoring");
            return Ok(());
        }

        // A fresh attempt replaces whatever the last one left behind
        self.clear_error_message();

        let challenge = match self.backend.wallet_nonce(&address).await {
            Ok(c) => c,
            Err(e) => {
                self.set_error(e.user_message());
                let _ = self.transition(&AuthMachineInput::Failed);
                return Err(e.into());
            }
        };

        self.transition(&AuthMachineInput::ChallengeIssued)?;

        let signature = match self.wallet.sign_message(&challenge.message).await {
            Ok(s) => s,
            Err(WalletError::Rejected) => {
                info!(wallet = %address, "User rejected the signature request");
                self.set_error(ERR_SIGNATURE_REJECTED);
                let _ = self.transition(&AuthMachineInput::Failed);
                return Err(AuthError::SignatureRejected);
            }
            Err(e) => {
                self.set_error(ERR_GENERIC);
                let _ = self.transition(&AuthMachineInput::Failed);
                return Err(e.into());
            }
        };

        // The account may have switched while the prompt was open; a
        // signature from a different address must never be submitted.
        if self.wallet.address().as_deref() != Some(address.as_str()) {
            warn!(wallet = %address, "Wallet changed while awaiting signature");
            self.set_error(ERR_WALLET_CHANGED);
            let _ = self.transition(&AuthMachineInput::Failed);
            return Err(AuthError::WalletChanged);
        }

        match self.backend.verify_wallet(&address, &signature).await {
            Ok(payload) => {
                let token = payload.access_token.clone();
                let refresh = payload.refresh_token.clone();
                let user = payload.into_user_record(AuthMethod::Wallet, &address);
                self.adopt_session(&token, refresh.as_deref(), &user, &AuthMachineInput::Verified)
            }
            Err(ApiError::RegistrationRequired) => {
                *self.pending.lock().unwrap() = Some(PendingRegistration {
                    wallet_address: address,
                    signature,
                    message: challenge.message,
                });
                self.clear_error_message();
                self.transition(&AuthMachineInput::RegistrationRequired)?;
                Err(AuthError::RegistrationRequired)
            }
            Err(e) => {
                self.set_error(e.user_message());
                let _ = self.transition(&AuthMachineInput::Failed);
                Err(e.into())
            }
        }
    }

    /// Complete a pending registration with optional profile details.
    ///
    /// Reuses the signature captured during login; the user is not
    /// prompted to sign again. A 409 from the backend means the account
    /// was created in the meantime (another tab won the race), so the
    /// held signature is retried through verify.
    pub async fn register(
        &self,
        email: Option<&str>,
        user_name: Option<&str>,
    ) -> AuthResult<()> {
        let pending = match self.pending.lock().unwrap().clone() {
            Some(p) => p,
            None => return Err(AuthError::NoPendingRegistration),
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Register already in flight, ignoring");
            return Ok(());
        }
        let _guard = FlightGuard(&self.in_flight);

        let request = RegisterWalletRequest {
            wallet_address: pending.wallet_address.clone(),
            signature: pending.signature.clone(),
            email: email.map(String::from),
            user_name: user_name.map(String::from),
        };

        let result = match self.backend.register_wallet(&request).await {
            Ok(payload) => Ok(payload),
            Err(ApiError::RequestFailed { status: 409, .. }) => {
                info!(wallet = %pending.wallet_address, "Account already exists, retrying verify");
                self.backend
                    .verify_wallet(&pending.wallet_address, &pending.signature)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(payload) => {
                let token = payload.access_token.clone();
                let refresh = payload.refresh_token.clone();
                let user =
                    payload.into_user_record(AuthMethod::Wallet, &pending.wallet_address);
                self.adopt_session(&token, refresh.as_deref(), &user, &AuthMachineInput::Verified)
            }
            Err(e) => {
                // Stay in the registration step so the form can be
                // corrected and resubmitted.
                self.set_error(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Abandon a pending registration.
    pub fn cancel_registration(&self) -> AuthResult<()> {
        *self.pending.lock().unwrap() = None;
        self.clear_error_message();
        let _ = self.transition(&AuthMachineInput::Cancelled);
        info!("Registration cancelled");
        Ok(())
    }

    /// Adopt a session obtained outside the wallet flow (Google OAuth).
    pub fn adopt_external_session(
        &self,
        token: &str,
        refresh_token: Option<&str>,
        user: &UserRecord,
    ) -> AuthResult<()> {
        // Clear a stale error state first so the restore input applies
        let _ = self.transition(&AuthMachineInput::LoggedOut);
        self.adopt_session(
            token,
            refresh_token,
            user,
            &AuthMachineInput::SessionRestored,
        )
    }

    /// Clear all session data, disconnect the wallet, and return to
    /// Anonymous. Local-only: there is no server-side logout endpoint.
    pub fn logout(&self) -> AuthResult<()> {
        self.store.clear()?;
        *self.pending.lock().unwrap() = None;
        self.clear_error_message();
        self.wallet.disconnect();

        let _ = self.transition(&AuthMachineInput::LoggedOut);

        info!("Logged out");
        Ok(())
    }

    /// React to a wallet connecting: apply the invalidation rules for
    /// the new address, then auto-start login unless a session or a
    /// pending registration already covers it.
    pub async fn wallet_connected(&self, address: &str) -> AuthResult<()> {
        self.wallet_changed(Some(address))?;

        match self.status() {
            AuthStatus::Authenticated | AuthStatus::NeedsRegistration => Ok(()),
            _ => self.login().await,
        }
    }

    /// React to the wallet's active account changing (or disconnecting).
    ///
    /// Wallet-method sessions are invalidated when the address no longer
    /// matches; Google sessions survive both changes. A pending
    /// registration for a different address is dropped, since its
    /// signature belongs to the previous account.
    pub fn wallet_changed(&self, new_address: Option<&str>) -> AuthResult<()> {
        {
            let mut pending = self.pending.lock().unwrap();
            let stale = match (&*pending, new_address) {
                (Some(p), Some(address)) => !address.eq_ignore_ascii_case(&p.wallet_address),
                (Some(_), None) => true,
                (None, _) => false,
            };
            if stale {
                debug!("Dropping pending registration after wallet change");
                *pending = None;
                let _ = self.transition(&AuthMachineInput::Cancelled);
            }
        }

        let user = match self.store.get_user()? {
            Some(u) => u,
            None => return Ok(()),
        };

        if user.auth_method != AuthMethod::Wallet {
            debug!("Non-wallet session unaffected by wallet change");
            return Ok(());
        }

        match new_address {
            Some(address) if address.eq_ignore_ascii_case(&user.wallet_address) => Ok(()),
            Some(address) => {
                info!(old = %user.wallet_address, new = %address, "Wallet changed, invalidating session");
                self.store.clear()?;
                self.set_error(ERR_WALLET_CHANGED);
                let _ = self.transition(&AuthMachineInput::WalletChanged);
                Ok(())
            }
            None => {
                info!(wallet = %user.wallet_address, "Wallet disconnected, invalidating session");
                self.store.clear()?;
                self.clear_error_message();
                let _ = self.transition(&AuthMachineInput::WalletDisconnected);
                Ok(())
            }
        }
    }

    /// React to the wallet disconnecting entirely.
    pub fn wallet_disconnected(&self) -> AuthResult<()> {
        self.wallet_changed(None)
    }

    /// React to the server invalidating the session (the gateway's 401
    /// hook). The store has already been cleared by the gateway; this
    /// only updates the FSM and the message. Idempotent.
    pub fn session_invalidated(&self) {
        if self.transition(&AuthMachineInput::SessionExpired).is_ok() {
            self.set_error(ERR_SESSION_EXPIRED);
        }
    }

    /// Clear the error state and return to Anonymous.
    pub fn clear_error(&self) {
        self.clear_error_message();
        let _ = self.transition(&AuthMachineInput::ErrorCleared);
    }
}
