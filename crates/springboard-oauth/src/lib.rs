//! Google OAuth bridge for the SpringBoard client.
//!
//! The backend drives the OAuth dance; this crate handles the landing.
//! It runs once at startup, before anything else reads the persisted
//! session: the server redirects back to the app origin with either
//! `?access_token=...` (+ optional `refresh_token`) or
//! `?error=google_auth_failed&message=...` appended. On success the
//! bridge decodes the token's identity claims (best-effort, never
//! verified client-side) into a provisional user record and adopts the
//! session through the auth controller; on failure it stashes the
//! message in the one-shot flash store for the UI to surface after the
//! redirect.

mod jwt;

pub use jwt::{decode_claims, TokenClaims};

use springboard_auth::{AuthController, AuthError};
use springboard_storage::{AuthMethod, FlashStore, StorageResult, UserRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

const ERR_GOOGLE_FAILED: &str = "Google sign-in failed. Please try again.";

/// Error type for OAuth bridge operations.
#[derive(Error, Debug)]
pub enum OAuthError {
    /// The redirect URL did not parse.
    #[error("Invalid redirect URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The redirect token could not be decoded.
    #[error("Invalid redirect token: {0}")]
    Token(String),

    /// Auth controller failure while adopting the session.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Flash store failure.
    #[error(transparent)]
    Storage(#[from] springboard_storage::StorageError),
}

/// What the redirect handler decided.
///
/// `redirect_to` is the bare app origin: query parameters must not
/// survive the handoff (the token must not linger in the address bar or
/// browser history), so the embedding shell navigates there next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthOutcome {
    /// Token adopted; the session is live.
    SessionEstablished { redirect_to: String },
    /// Failure message stashed for the UI to surface.
    ErrorStashed { redirect_to: String, message: String },
    /// No OAuth parameters present; normal startup proceeds.
    NotHandled,
}

/// Handles the server's OAuth redirect back into the app.
pub struct OAuthBridge {
    controller: Arc<AuthController>,
    flash: Arc<FlashStore>,
}

impl OAuthBridge {
    pub fn new(controller: Arc<AuthController>, flash: Arc<FlashStore>) -> Self {
        Self { controller, flash }
    }

    /// Process the URL the app started on.
    ///
    /// A token whose payload does not decode still establishes the
    /// session: the claims are display-only, so the record falls back
    /// to empty fields rather than failing the sign-in.
    pub fn handle_redirect(&self, current_url: &str) -> Result<OAuthOutcome, OAuthError> {
        let url = url::Url::parse(current_url)?;
        let redirect_to = url.origin().ascii_serialization();

        let mut access_token = None;
        let mut refresh_token = None;
        let mut error = None;
        let mut message = None;
        let mut error_description = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "access_token" => access_token = Some(value.into_owned()),
                "refresh_token" => refresh_token = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                "message" => message = Some(value.into_owned()),
                "error_description" => error_description = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(code) = error {
            let message = message
                .or(error_description)
                .unwrap_or_else(|| ERR_GOOGLE_FAILED.to_string());
            warn!(error = %code, message = %message, "OAuth redirect reported an error");
            self.flash.stash_oauth_error(&message)?;
            return Ok(OAuthOutcome::ErrorStashed {
                redirect_to,
                message,
            });
        }

        let token = match access_token {
            Some(t) => t,
            None => {
                debug!("No OAuth parameters in startup URL");
                return Ok(OAuthOutcome::NotHandled);
            }
        };

        let claims = decode_claims(&token).unwrap_or_else(|e| {
            warn!(error = %e, "OAuth token payload did not decode, using empty claims");
            TokenClaims::default()
        });

        let user = UserRecord {
            id: claims.sub,
            email: claims.email,
            display_name: claims.display_name,
            wallet_address: claims.wallet_address.unwrap_or_default(),
            is_kyc_verified: None,
            auth_method: AuthMethod::Google,
        };

        self.controller
            .adopt_external_session(&token, refresh_token.as_deref(), &user)?;
        self.flash.mark_oauth_landing()?;

        info!(user_id = %user.id, "Google sign-in completed");
        Ok(OAuthOutcome::SessionEstablished { redirect_to })
    }

    /// Take the stashed OAuth error for display, clearing it.
    pub fn take_pending_error(&self) -> StorageResult<Option<String>> {
        self.flash.take_oauth_error()
    }

    /// Whether the client just landed from an OAuth redirect. Read-once.
    pub fn take_landing_flag(&self) -> StorageResult<bool> {
        self.flash.take_oauth_landing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use serde_json::json;
    use springboard_api::{ApiResult, AuthPayload, NonceChallenge, RegisterWalletRequest};
    use springboard_auth::{AuthBackend, AuthStatus, WalletError, WalletProvider};
    use springboard_storage::{MemoryStorage, SessionStore};

    struct NoBackend;

    #[async_trait]
    impl AuthBackend for NoBackend {
        async fn wallet_nonce(&self, _wallet_address: &str) -> ApiResult<NonceChallenge> {
            panic!("backend must not be called by the OAuth bridge");
        }

        async fn verify_wallet(
            &self,
            _wallet_address: &str,
            _signature: &str,
        ) -> ApiResult<AuthPayload> {
            panic!("backend must not be called by the OAuth bridge");
        }

        async fn register_wallet(
            &self,
            _request: &RegisterWalletRequest,
        ) -> ApiResult<AuthPayload> {
            panic!("backend must not be called by the OAuth bridge");
        }
    }

    struct NoWallet;

    #[async_trait]
    impl WalletProvider for NoWallet {
        fn address(&self) -> Option<String> {
            None
        }

        async fn sign_message(&self, _message: &str) -> Result<String, WalletError> {
            panic!("wallet must not be called by the OAuth bridge");
        }

        fn disconnect(&self) {}
    }

    fn encode_jwt(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    struct Fixture {
        bridge: OAuthBridge,
        controller: Arc<AuthController>,
        store: Arc<SessionStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())));
        let controller = Arc::new(AuthController::new(
            Arc::new(NoBackend),
            Arc::new(NoWallet),
            store.clone(),
        ));
        let flash = Arc::new(FlashStore::new(Box::new(MemoryStorage::new())));
        Fixture {
            bridge: OAuthBridge::new(controller.clone(), flash),
            controller,
            store,
        }
    }

    #[test]
    fn token_redirect_establishes_a_google_session() {
        let f = fixture();
        let token = encode_jwt(&json!({
            "sub": "g1",
            "email": "g@example.com",
            "name": "G"
        }));
        let url =
            format!("https://app.springboard.fi/?access_token={token}&refresh_token=r-1");

        let outcome = f.bridge.handle_redirect(&url).unwrap();
        assert_eq!(
            outcome,
            OAuthOutcome::SessionEstablished {
                redirect_to: "https://app.springboard.fi".to_string()
            }
        );

        assert_eq!(f.controller.status(), AuthStatus::Authenticated);
        assert_eq!(f.store.get_token().unwrap().as_deref(), Some(token.as_str()));
        assert_eq!(f.store.get_refresh_token().unwrap().as_deref(), Some("r-1"));

        let user = f.store.get_user().unwrap().unwrap();
        assert_eq!(user.id, "g1");
        assert_eq!(user.email.as_deref(), Some("g@example.com"));
        assert_eq!(user.auth_method, AuthMethod::Google);

        assert!(f.bridge.take_landing_flag().unwrap());
        assert!(!f.bridge.take_landing_flag().unwrap());
    }

    #[test]
    fn error_redirect_stashes_the_message() {
        let f = fixture();
        let url =
            "https://app.springboard.fi/?error=google_auth_failed&message=Account%20suspended";

        let outcome = f.bridge.handle_redirect(url).unwrap();
        assert_eq!(
            outcome,
            OAuthOutcome::ErrorStashed {
                redirect_to: "https://app.springboard.fi".to_string(),
                message: "Account suspended".to_string(),
            }
        );

        assert_eq!(f.controller.status(), AuthStatus::Anonymous);
        assert!(!f.store.has_session().unwrap());

        // Read-once
        assert_eq!(
            f.bridge.take_pending_error().unwrap().as_deref(),
            Some("Account suspended")
        );
        assert_eq!(f.bridge.take_pending_error().unwrap(), None);
    }

    #[test]
    fn error_redirect_falls_back_to_description_then_generic() {
        let f = fixture();

        let outcome = f
            .bridge
            .handle_redirect(
                "https://app.springboard.fi/?error=google_auth_failed&error_description=denied",
            )
            .unwrap();
        assert!(matches!(
            outcome,
            OAuthOutcome::ErrorStashed { ref message, .. } if message == "denied"
        ));
        f.bridge.take_pending_error().unwrap();

        let outcome = f
            .bridge
            .handle_redirect("https://app.springboard.fi/?error=google_auth_failed")
            .unwrap();
        assert!(matches!(
            outcome,
            OAuthOutcome::ErrorStashed { ref message, .. }
                if message == "Google sign-in failed. Please try again."
        ));
    }

    #[test]
    fn undecodable_token_still_signs_in_with_empty_claims() {
        let f = fixture();
        let url = "https://app.springboard.fi/?access_token=opaque-token";

        let outcome = f.bridge.handle_redirect(url).unwrap();
        assert!(matches!(outcome, OAuthOutcome::SessionEstablished { .. }));

        assert_eq!(f.controller.status(), AuthStatus::Authenticated);
        assert_eq!(
            f.store.get_token().unwrap().as_deref(),
            Some("opaque-token")
        );

        let user = f.store.get_user().unwrap().unwrap();
        assert_eq!(user.id, "");
        assert_eq!(user.email, None);
        assert_eq!(user.auth_method, AuthMethod::Google);
    }

    #[test]
    fn plain_startup_url_is_not_handled() {
        let f = fixture();
        let outcome = f
            .bridge
            .handle_redirect("https://app.springboard.fi/projects?status=LIVE")
            .unwrap();
        assert_eq!(outcome, OAuthOutcome::NotHandled);
        assert!(!f.store.has_session().unwrap());
        assert_eq!(f.bridge.take_pending_error().unwrap(), None);
        assert!(!f.bridge.take_landing_flag().unwrap());
    }

    #[test]
    fn redirect_target_drops_path_and_query() {
        let f = fixture();
        let url = "http://localhost:3000/dashboard?error=google_auth_failed&message=denied";
        let outcome = f.bridge.handle_redirect(url).unwrap();
        match outcome {
            OAuthOutcome::ErrorStashed { redirect_to, .. } => {
                assert_eq!(redirect_to, "http://localhost:3000");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn invalid_url_is_rejected() {
        let f = fixture();
        assert!(matches!(
            f.bridge.handle_redirect("not a url"),
            Err(OAuthError::InvalidUrl(_))
        ));
    }
}
