//! Wallet provider abstraction.
//!
//! The controller never talks to a wallet extension or SDK directly; it
//! goes through this trait so the auth flow can be driven by any wallet
//! integration (and by mocks in tests).

use async_trait::async_trait;
use thiserror::Error;

/// Wallet provider failure modes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined the signature prompt.
    #[error("signature request rejected")]
    Rejected,

    /// Anything else the provider reports (locked, disconnected
    /// mid-request, RPC failure).
    #[error("wallet provider error: {0}")]
    Provider(String),
}

/// Connection and signing surface of a wallet integration.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Currently connected address, if any. Checked at the start of a
    /// login attempt and again after signing to catch mid-flow account
    /// switches.
    fn address(&self) -> Option<String>;

    /// Ask the wallet to sign the challenge message verbatim.
    async fn sign_message(&self, message: &str) -> Result<String, WalletError>;

    /// Drop the wallet connection. Best-effort; never fails.
    fn disconnect(&self);
}
