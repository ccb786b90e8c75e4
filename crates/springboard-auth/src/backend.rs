//! Backend abstraction for the wallet-auth endpoints.
//!
//! The controller depends on this trait rather than on [`ApiClient`]
//! directly, which keeps the state machine logic testable without a
//! server.

use async_trait::async_trait;
use springboard_api::{ApiClient, ApiResult, AuthPayload, NonceChallenge, RegisterWalletRequest};

/// The three backend calls the wallet-auth flow needs.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Request a signing challenge for the address.
    async fn wallet_nonce(&self, wallet_address: &str) -> ApiResult<NonceChallenge>;

    /// Submit the signature for verification.
    async fn verify_wallet(
        &self,
        wallet_address: &str,
        signature: &str,
    ) -> ApiResult<AuthPayload>;

    /// Register a new account for a verified wallet.
    async fn register_wallet(&self, request: &RegisterWalletRequest) -> ApiResult<AuthPayload>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn wallet_nonce(&self, wallet_address: &str) -> ApiResult<NonceChallenge> {
        ApiClient::wallet_nonce(self, wallet_address).await
    }

    async fn verify_wallet(
        &self,
        wallet_address: &str,
        signature: &str,
    ) -> ApiResult<AuthPayload> {
        ApiClient::verify_wallet(self, wallet_address, signature).await
    }

    async fn register_wallet(&self, request: &RegisterWalletRequest) -> ApiResult<AuthPayload> {
        ApiClient::register_wallet(self, request).await
    }
}
