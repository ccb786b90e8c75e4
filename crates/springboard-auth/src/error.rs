//! Auth flow error types.

use crate::wallet::WalletError;
use thiserror::Error;

/// Error type for auth controller operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Login was requested with no wallet connected.
    #[error("Connect a wallet first.")]
    WalletNotConnected,

    /// The user rejected the signature request in their wallet.
    #[error("Signature rejected. Please try again.")]
    SignatureRejected,

    /// The wallet's active account changed mid-flow; the attempt was
    /// abandoned before the stale signature could be submitted.
    #[error("Wallet changed. Please sign in again.")]
    WalletChanged,

    /// Verify succeeded but no account exists; the flow moved to the
    /// registration step and is waiting for profile details.
    #[error("No account found. Registration required.")]
    RegistrationRequired,

    /// `register` was called without a pending registration (the flow
    /// never reached the registration step, or it was cancelled).
    #[error("No registration in progress.")]
    NoPendingRegistration,

    /// An FSM input was applied in a state that does not accept it.
    #[error("Invalid auth state transition: {0}")]
    InvalidStateTransition(String),

    /// Wallet provider failure other than an explicit rejection.
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Backend call failure.
    #[error(transparent)]
    Api(#[from] springboard_api::ApiError),

    /// Session store failure.
    #[error(transparent)]
    Storage(#[from] springboard_storage::StorageError),
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;
