//! Storage key constants.

/// Storage keys used by the client
pub struct StorageKeys;

impl StorageKeys {
    /// Auth token (JWT issued by the backend)
    pub const AUTH_TOKEN: &'static str = "springboard_auth_token";

    /// Refresh token (optional, only present for OAuth sessions)
    pub const REFRESH_TOKEN: &'static str = "springboard_refresh_token";

    /// Serialized user record (JSON)
    pub const USER_RECORD: &'static str = "springboard_user";

    /// One-shot: OAuth failure message waiting to be surfaced
    pub const PENDING_OAUTH_ERROR: &'static str = "springboard_oauth_error";

    /// One-shot: just landed from an OAuth redirect, route to profile
    pub const OAUTH_LANDING: &'static str = "springboard_oauth_landing";
}
