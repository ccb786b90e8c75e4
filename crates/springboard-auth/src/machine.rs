//! Wallet authentication state machine using rust-fsm.
//!
//! Auth state is tracked by an explicit finite state machine instead of
//! being derived from storage checks scattered across the codebase.
//!
//! ## State Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │    Anonymous    │ (initial)
//! └────────┬────────┘
//!          │ LoginStarted              SessionRestored ──► Authenticated
//!          ▼
//! ┌─────────────────┐
//! │ ConnectingWallet│ (fetching nonce challenge)
//! └────────┬────────┘
//!          │ ChallengeIssued
//!          ▼
//! ┌─────────────────┐   RegistrationRequired   ┌───────────────────┐
//! │AwaitingSignature│ ───────────────────────► │ NeedsRegistration │
//! └────────┬────────┘                          └─────────┬─────────┘
//!          │ Verified                  Verified/Cancelled│
//!          ▼                                             ▼
//! ┌─────────────────┐                        Authenticated/Anonymous
//! │  Authenticated  │
//! └────────┬────────┘
//!          │ WalletChanged / WalletDisconnected /
//!          │ SessionExpired / LoggedOut
//!          ▼
//!      Anonymous
//!
//! Failed (from ConnectingWallet or AwaitingSignature) ──► Errored
//! Errored ── ErrorCleared / LoggedOut ──► Anonymous
//! Errored ── LoginStarted ──► ConnectingWallet (retry)
//! ```

use rust_fsm::*;
use serde::{Deserialize, Serialize};

// Generates a module `wallet_auth` with State, Input, and StateMachine
state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub wallet_auth(Anonymous)

    Anonymous => {
        LoginStarted => ConnectingWallet,
        SessionRestored => Authenticated,
        LoggedOut => Anonymous
    },
    ConnectingWallet => {
        ChallengeIssued => AwaitingSignature,
        Failed => Errored,
        LoggedOut => Anonymous
    },
    AwaitingSignature => {
        Verified => Authenticated,
        RegistrationRequired => NeedsRegistration,
        Failed => Errored,
        LoggedOut => Anonymous
    },
    NeedsRegistration => {
        // Registration success (or the verify fallback after a 409)
        Verified => Authenticated,
        Cancelled => Anonymous,
        LoggedOut => Anonymous
    },
    Authenticated => {
        WalletChanged => Anonymous,
        WalletDisconnected => Anonymous,
        SessionExpired => Anonymous,
        LoggedOut => Anonymous
    },
    Errored => {
        ErrorCleared => Anonymous,
        LoginStarted => ConnectingWallet,
        SessionRestored => Authenticated,
        LoggedOut => Anonymous
    }
}

// Re-export the generated types with clearer names
pub use wallet_auth::Input as AuthMachineInput;
pub use wallet_auth::State as AuthMachineState;
pub use wallet_auth::StateMachine as AuthMachine;

/// User-facing authentication status, derived from the FSM state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// No session; nothing in progress.
    Anonymous,
    /// Fetching the signing challenge for the connected wallet.
    ConnectingWallet,
    /// Challenge issued; waiting for the wallet to sign it.
    AwaitingSignature,
    /// Signature verified but no account exists for this wallet.
    NeedsRegistration,
    /// Signed in with a stored session.
    Authenticated,
    /// The last auth attempt failed; see the error message.
    Error,
}

impl AuthStatus {
    /// Returns true only when a session exists (Authenticated).
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated)
    }

    /// Returns true while an auth flow is in progress.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            AuthStatus::ConnectingWallet | AuthStatus::AwaitingSignature
        )
    }
}

impl From<&AuthMachineState> for AuthStatus {
    fn from(state: &AuthMachineState) -> Self {
        match state {
            AuthMachineState::Anonymous => AuthStatus::Anonymous,
            AuthMachineState::ConnectingWallet => AuthStatus::ConnectingWallet,
            AuthMachineState::AwaitingSignature => AuthStatus::AwaitingSignature,
            AuthMachineState::NeedsRegistration => AuthStatus::NeedsRegistration,
            AuthMachineState::Authenticated => AuthStatus::Authenticated,
            AuthMachineState::Errored => AuthStatus::Error,
        }
    }
}

/// Signature held between a REGISTRATION_REQUIRED verify result and the
/// follow-up register call, so the user is not asked to sign twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    pub wallet_address: String,
    pub signature: String,
    /// The challenge message the signature covers. Kept for reference;
    /// never resent (the server caches the nonce it issued).
    pub message: String,
}
