//! SpringBoard launchpad client.
//!
//! Facade crate that assembles the client stack:
//! - [`springboard_storage`]: durable session store + one-shot flags
//! - [`springboard_api`]: REST gateway with envelope normalization and
//!   the 401 invalidation hook
//! - [`springboard_auth`]: wallet auth state machine and controller
//! - [`springboard_oauth`]: Google OAuth redirect handling
//!
//! ```no_run
//! use springboard_client::{Config, Springboard};
//! # use std::sync::Arc;
//! # fn wallet() -> Arc<dyn springboard_client::WalletProvider> { unimplemented!() }
//!
//! springboard_client::init_logging("info");
//! let client = Springboard::new(Config::new(), wallet())?;
//! client.restore_session()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod config;
mod logging;

pub use client::Springboard;
pub use config::{Config, DEFAULT_API_BASE_URL, DEFAULT_LOG_LEVEL};
pub use logging::init_logging;

pub use springboard_api::{ApiClient, ApiError, ApiResult, ProjectStatus};
pub use springboard_auth::{
    AuthController, AuthError, AuthResult, AuthStatus, PendingRegistration, WalletError,
    WalletProvider,
};
pub use springboard_oauth::{OAuthBridge, OAuthError, OAuthOutcome};
pub use springboard_storage::{AuthMethod, SessionStore, UserRecord};
