//! Typed endpoint methods on [`ApiClient`].

use crate::client::Auth;
use crate::envelope::indicates_missing_account;
use crate::types::{
    AddWalletRequest, AllocationRecord, AuthPayload, CastVoteResult, ClaimableVesting,
    GoogleTokenRequest, KycClaimResult, KycRewardStatus, LinkWalletRequest, LinkedWallet,
    LiquidityClaimResult, LiquidityRewardStatus, NonceChallenge, Project, ProjectStatus,
    RegisterWalletRequest, UpdateProfileRequest, UserProfile, VerifyWalletRequest, VestingClaim,
    VoteStatus, VotingOptions, WalletRecord,
};
use crate::{ApiClient, ApiError, ApiResult};
use reqwest::Method;
use serde_json::json;
use tracing::info;

impl ApiClient {
    // ------------------------------------------------------------------
    // Wallet auth
    // ------------------------------------------------------------------

    /// Request a signing challenge for a wallet address.
    pub async fn wallet_nonce(&self, wallet_address: &str) -> ApiResult<NonceChallenge> {
        self.send(
            Method::POST,
            "/wallet-auth/nonce",
            Some(json!({ "walletAddress": wallet_address })),
            Auth::Skip,
        )
        .await
    }

    /// Submit a signed challenge for verification.
    ///
    /// The message itself is never resent; the server looks up the
    /// nonce it issued for this address. A valid signature with no
    /// matching account maps to [`ApiError::RegistrationRequired`].
    pub async fn verify_wallet(
        &self,
        wallet_address: &str,
        signature: &str,
    ) -> ApiResult<AuthPayload> {
        let request = VerifyWalletRequest {
            wallet_address: wallet_address.to_string(),
            signature: signature.to_string(),
        };

        let result: ApiResult<AuthPayload> = self
            .send(
                Method::POST,
                "/wallet-auth/verify",
                Some(serde_json::to_value(&request).map_err(|e| {
                    ApiError::InvalidResponse(e.to_string())
                })?),
                Auth::Skip,
            )
            .await;

        match result {
            Err(ApiError::RequestFailed { status, message })
                if indicates_missing_account(status, &message) =>
            {
                info!(wallet = %wallet_address, "Wallet verified but unregistered");
                Err(ApiError::RegistrationRequired)
            }
            other => other,
        }
    }

    /// Register a new account for a verified wallet.
    ///
    /// A 409 means the account already exists (e.g. a concurrent
    /// registration won); callers fall back to verify in that case.
    pub async fn register_wallet(&self, request: &RegisterWalletRequest) -> ApiResult<AuthPayload> {
        self.send(
            Method::POST,
            "/wallet-auth/register",
            Some(serde_json::to_value(request).map_err(|e| {
                ApiError::InvalidResponse(e.to_string())
            })?),
            Auth::Skip,
        )
        .await
    }

    /// Link an additional wallet to the authenticated account.
    pub async fn link_wallet(
        &self,
        wallet_address: &str,
        signature: &str,
    ) -> ApiResult<LinkedWallet> {
        let request = LinkWalletRequest {
            wallet_address: wallet_address.to_string(),
            signature: signature.to_string(),
        };
        self.send(
            Method::POST,
            "/wallet-auth/link",
            Some(serde_json::to_value(&request).map_err(|e| {
                ApiError::InvalidResponse(e.to_string())
            })?),
            Auth::Bearer,
        )
        .await
    }

    /// Unlink a wallet from the authenticated account.
    pub async fn unlink_wallet(&self, wallet_id: &str) -> ApiResult<()> {
        let _: serde_json::Value = self
            .send(
                Method::DELETE,
                &format!("/wallet-auth/unlink/{}", wallet_id),
                None,
                Auth::Bearer,
            )
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    /// Fetch the authenticated user's profile.
    pub async fn get_profile(&self) -> ApiResult<UserProfile> {
        self.send(Method::GET, "/users/profile", None, Auth::Bearer)
            .await
    }

    /// Update profile fields; absent fields are left unchanged.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        self.send(
            Method::PATCH,
            "/users/profile",
            Some(serde_json::to_value(request).map_err(|e| {
                ApiError::InvalidResponse(e.to_string())
            })?),
            Auth::Bearer,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Portfolio & vesting
    // ------------------------------------------------------------------

    /// All of the user's sale allocations with vesting progress.
    pub async fn get_portfolio(&self) -> ApiResult<Vec<AllocationRecord>> {
        self.send(Method::GET, "/portfolio", None, Auth::Bearer).await
    }

    /// Claimable vesting summary for one sale.
    pub async fn claimable_vesting(&self, sale_id: &str) -> ApiResult<ClaimableVesting> {
        self.send(
            Method::GET,
            &format!("/vesting/claimable/sale/{}", sale_id),
            None,
            Auth::Bearer,
        )
        .await
    }

    /// Claim history for one sale.
    pub async fn vesting_claims(&self, sale_id: &str) -> ApiResult<Vec<VestingClaim>> {
        self.send(
            Method::GET,
            &format!("/vesting/claims/sale/{}", sale_id),
            None,
            Auth::Bearer,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Rewards
    // ------------------------------------------------------------------

    /// Status of the one-time KYC completion reward.
    pub async fn kyc_reward(&self) -> ApiResult<KycRewardStatus> {
        self.send(Method::GET, "/rewards/kyc", None, Auth::Bearer).await
    }

    /// Claim the KYC completion reward.
    pub async fn claim_kyc_reward(&self) -> ApiResult<KycClaimResult> {
        self.send(Method::POST, "/rewards/kyc/claim", None, Auth::Bearer)
            .await
    }

    /// Status of the liquidity provision reward.
    pub async fn liquidity_reward(&self) -> ApiResult<LiquidityRewardStatus> {
        self.send(Method::GET, "/rewards/liquidity", None, Auth::Bearer)
            .await
    }

    /// Submit a liquidity reward claim to the given payout address.
    pub async fn claim_liquidity_reward(
        &self,
        wallet_address: &str,
    ) -> ApiResult<LiquidityClaimResult> {
        self.send(
            Method::POST,
            "/rewards/liquidity/claim",
            Some(json!({ "walletAddress": wallet_address })),
            Auth::Bearer,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Wallets
    // ------------------------------------------------------------------

    /// Wallets attached to the authenticated account.
    pub async fn list_wallets(&self) -> ApiResult<Vec<WalletRecord>> {
        self.send(Method::GET, "/wallets", None, Auth::Bearer).await
    }

    /// Attach a wallet address without the signature flow.
    pub async fn add_wallet(&self, request: &AddWalletRequest) -> ApiResult<WalletRecord> {
        self.send(
            Method::POST,
            "/wallets",
            Some(serde_json::to_value(request).map_err(|e| {
                ApiError::InvalidResponse(e.to_string())
            })?),
            Auth::Bearer,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Projects (public)
    // ------------------------------------------------------------------

    /// List launchpad projects, optionally filtered by sale status.
    pub async fn list_projects(&self, status: Option<ProjectStatus>) -> ApiResult<Vec<Project>> {
        let path = match status {
            Some(status) => format!("/projects?status={}", status.as_query()),
            None => "/projects".to_string(),
        };
        self.send(Method::GET, &path, None, Auth::Skip).await
    }

    /// Fetch a single project by id.
    pub async fn get_project(&self, project_id: &str) -> ApiResult<Project> {
        self.send(
            Method::GET,
            &format!("/projects/{}", project_id),
            None,
            Auth::Skip,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Exchange listing vote
    // ------------------------------------------------------------------

    /// Active ballot options with live tallies.
    pub async fn voting_options(&self) -> ApiResult<VotingOptions> {
        self.send(Method::GET, "/voting/options", None, Auth::Bearer)
            .await
    }

    /// The authenticated user's vote allowance and history.
    pub async fn voting_status(&self) -> ApiResult<VoteStatus> {
        self.send(Method::GET, "/voting/status", None, Auth::Bearer)
            .await
    }

    /// Cast the user's votes. The server enforces the required count
    /// and rejects duplicates.
    pub async fn cast_votes(&self, option_ids: &[String]) -> ApiResult<CastVoteResult> {
        self.send(
            Method::POST,
            "/voting/cast",
            Some(json!({ "optionIds": option_ids })),
            Auth::Bearer,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Google OAuth
    // ------------------------------------------------------------------

    /// URL the embedding shell navigates to for server-driven Google
    /// OAuth. The backend redirects back with `?token=...` or
    /// `?error=...` appended.
    pub fn google_auth_url(&self) -> String {
        self.api_url("/auth/google")
    }

    /// Exchange a client-obtained Google profile + access token for a
    /// SpringBoard session (SPA token flow).
    pub async fn google_token(&self, request: &GoogleTokenRequest) -> ApiResult<AuthPayload> {
        self.send(
            Method::POST,
            "/auth/google/token",
            Some(serde_json::to_value(request).map_err(|e| {
                ApiError::InvalidResponse(e.to_string())
            })?),
            Auth::Skip,
        )
        .await
    }
}
