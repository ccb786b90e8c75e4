//! REST API gateway for the SpringBoard launchpad backend.
//!
//! A thin request wrapper around the versioned JSON API:
//! - builds absolute URLs from a configured base plus `/api/v1`
//! - attaches the bearer token from the session store unless a call
//!   opts out (the unauthenticated wallet-auth calls)
//! - normalizes the backend's success/error envelopes
//! - clears the session and fires the injected invalidation hook on 401
//!
//! Endpoint methods live in `endpoints.rs`; the envelope/message
//! normalization is pure and lives in `envelope.rs`.

mod client;
mod endpoints;
mod envelope;
mod error;
mod types;

pub use client::{ApiClient, SessionInvalidatedHook, API_PREFIX};
pub use error::{ApiError, ApiResult};
pub use types::{
    AddWalletRequest, AllocationRecord, AuthPayload, AuthUser, CastVoteResult, ClaimableVesting,
    GoogleTokenRequest, KycClaimResult, KycRewardStatus, LinkedWallet, LiquidityClaimResult,
    LiquidityRewardStatus, NonceChallenge, Project, ProjectStatus, RegisterWalletRequest,
    UpdateProfileRequest, UserProfile, VerifyWalletRequest, VestingClaim, VoteStatus, VoteTally,
    VotedOption, VotingOption, VotingOptions, WalletRecord,
};
