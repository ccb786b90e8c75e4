//! Unverified JWT payload decoding.
//!
//! The OAuth redirect hands the client a backend-issued JWT. The client
//! only needs the identity claims to build a provisional user record;
//! signature verification stays server-side, where every authenticated
//! request is checked anyway.

use crate::OAuthError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

/// Identity claims carried in the redirect token's payload.
///
/// Non-authoritative: used only to populate display fields after the
/// redirect, never for authorization decisions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default, alias = "_id", alias = "id", alias = "userId")]
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "name", alias = "userName")]
    pub display_name: Option<String>,
    #[serde(default, alias = "walletAddress")]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decode the payload segment of a JWT without verifying the signature.
pub fn decode_claims(token: &str) -> Result<TokenClaims, OAuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(OAuthError::Token("not a three-segment JWT".into()));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| OAuthError::Token(format!("invalid payload encoding: {e}")))?;

    serde_json::from_slice(&payload)
        .map_err(|e| OAuthError::Token(format!("invalid payload claims: {e}")))
}
