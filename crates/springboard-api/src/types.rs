//! Request and response types for the SpringBoard REST API.
//!
//! The backend is inconsistent about casing and nesting (`accessToken`
//! vs `token`, `id` vs `_id`, `walletAddress` vs `wallet_address`), so
//! the deserialize types carry aliases for every convention seen in
//! the wild and normalize into clean client-side records.

use serde::{Deserialize, Serialize};
use springboard_storage::{AuthMethod, UserRecord};

// ==========================================
// Wallet auth
// ==========================================

/// Server-issued challenge the wallet must sign to prove ownership.
///
/// Ephemeral: consumed by the signing step, never persisted. Expiry is
/// enforced server-side; the client does not re-validate `expires_at`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceChallenge {
    /// Exact message to sign. Must not be altered, trimmed, or
    /// reformatted: the server re-derives the expected signature from
    /// this string verbatim.
    pub message: String,
    pub nonce: String,
    pub expires_at: String,
    /// Address the challenge was issued for. Not always echoed by the
    /// server; the auth layer fills it from the login attempt.
    #[serde(default)]
    pub wallet_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyWalletRequest {
    pub wallet_address: String,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterWalletRequest {
    pub wallet_address: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Normalized auth payload returned by verify/register/google-token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    #[serde(alias = "accessToken", alias = "token")]
    pub access_token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// User object inside an auth payload, accepting either casing.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(default, alias = "userName", alias = "name", alias = "UserName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "walletAddress")]
    pub wallet_address: Option<String>,
    #[serde(default, alias = "kycStatus")]
    pub kyc_status: Option<String>,
    #[serde(default, alias = "isKycVerified", alias = "IsKycVerified")]
    pub is_kyc_verified: Option<bool>,
}

impl AuthPayload {
    /// Build the persisted user record from this payload.
    ///
    /// `fallback_wallet` is the address the client authenticated with,
    /// used when the server omits it from the user object.
    pub fn into_user_record(self, auth_method: AuthMethod, fallback_wallet: &str) -> UserRecord {
        let kyc_verified = self.user.is_kyc_verified.or_else(|| {
            self.user
                .kyc_status
                .as_deref()
                .map(|s| matches!(s.to_ascii_uppercase().as_str(), "VERIFIED" | "COMPLETED" | "APPROVED"))
        });

        UserRecord {
            id: self.user.id,
            email: self.user.email,
            display_name: self.user.display_name,
            wallet_address: self
                .user
                .wallet_address
                .unwrap_or_else(|| fallback_wallet.to_string()),
            is_kyc_verified: kyc_verified,
            auth_method,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkWalletRequest {
    pub wallet_address: String,
    pub signature: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedWallet {
    pub wallet_address: String,
    #[serde(default)]
    pub linked_at: Option<String>,
}

// ==========================================
// Profile
// ==========================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "wallet_address")]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub is_kyc_verified: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

// ==========================================
// Portfolio & vesting
// ==========================================

/// One contribution to a token sale, with its vesting progress.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub sale_id: String,
    pub project_name: String,
    pub token_symbol: String,
    pub invested_usd: f64,
    pub total_vested: f64,
    pub total_claimed: f64,
    #[serde(default)]
    pub next_vesting_date: Option<String>,
    #[serde(default)]
    pub next_vesting_amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimableVesting {
    pub sale_id: String,
    pub token_symbol: String,
    pub claimable_amount: f64,
    #[serde(default)]
    pub next_unlock_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingClaim {
    #[serde(alias = "_id")]
    pub id: String,
    pub sale_id: String,
    pub amount: f64,
    #[serde(default)]
    pub tx_hash: Option<String>,
    pub claimed_at: String,
}

// ==========================================
// Rewards
// ==========================================

/// Status of the one-time KYC completion reward.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycRewardStatus {
    pub kyc_status: String,
    pub reward_status: String,
    pub reward_amount: f64,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub claimed_at: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    pub can_claim: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycClaimResult {
    pub reward_amount: f64,
    pub tx_hash: String,
    pub wallet_address: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRewardStatus {
    pub status: String,
    pub eligible_purchase_total: f64,
    #[serde(alias = "rewardAmountUSD")]
    pub reward_amount_usd: f64,
    pub reward_amount_tokens: f64,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    pub can_claim: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityClaimResult {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_id: String,
    pub eligible_purchase_total: f64,
    #[serde(alias = "rewardAmountUSD")]
    pub reward_amount_usd: f64,
    pub reward_amount_tokens: f64,
    pub wallet_address: String,
    pub status: String,
}

// ==========================================
// Wallets
// ==========================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub address: String,
    pub chain: String,
    #[serde(default, alias = "is_primary")]
    pub is_primary: bool,
}

/// Body for `POST /wallets`. This endpoint takes snake_case.
#[derive(Debug, Clone, Serialize)]
pub struct AddWalletRequest {
    pub address: String,
    pub chain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

// ==========================================
// Projects
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Live,
    Upcoming,
    Closed,
}

impl ProjectStatus {
    /// Value for the `?status=` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            ProjectStatus::Live => "LIVE",
            ProjectStatus::Upcoming => "UPCOMING",
            ProjectStatus::Closed => "CLOSED",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub token_price: Option<String>,
    #[serde(default)]
    pub soft_cap: Option<String>,
    #[serde(default)]
    pub hard_cap: Option<String>,
    #[serde(default)]
    pub raised: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub sale_start: Option<String>,
    #[serde(default)]
    pub sale_end: Option<String>,
}

// ==========================================
// Exchange listing vote
// ==========================================

/// One exchange on the listing ballot, with live tallies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingOption {
    #[serde(alias = "_id")]
    pub id: String,
    pub exchange_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub vote_count: u64,
    pub percentage: String,
    /// The exchange has confirmed the listing.
    #[serde(default)]
    pub is_confirmed: bool,
    /// The authenticated user already voted for this option.
    #[serde(default)]
    pub is_selected: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingOptions {
    pub options: Vec<VotingOption>,
    pub total_votes: u64,
    pub user_votes_count: u32,
    pub required_votes: u32,
    pub has_completed_voting: bool,
    pub can_vote: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotedOption {
    pub option_id: String,
    pub exchange_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub voted_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    pub votes_used: u32,
    pub votes_remaining: u32,
    pub required_votes: u32,
    pub has_completed_voting: bool,
    pub can_vote: bool,
    #[serde(default)]
    pub voted_options: Vec<VotedOption>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    #[serde(alias = "_id")]
    pub id: String,
    pub exchange_name: String,
    pub new_vote_count: u64,
    pub percentage: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteResult {
    pub voted_exchanges: Vec<VoteTally>,
    pub total_votes: u64,
    #[serde(default)]
    pub message: Option<String>,
}

// ==========================================
// Google OAuth (SPA token flow)
// ==========================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTokenRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub access_token: String,
}
