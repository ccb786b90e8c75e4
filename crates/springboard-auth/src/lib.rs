//! Wallet authentication flow for the SpringBoard client.
//!
//! Auth state lives in an explicit finite state machine
//! ([`machine`]) driven by the [`AuthController`]: nonce → sign →
//! verify, with a registration branch for wallets without an account,
//! and invalidation rules for wallet changes and server-side 401s.
//!
//! The controller talks to the backend through [`AuthBackend`] and to
//! the wallet through [`WalletProvider`], so the full flow is
//! exercisable in tests with mocks.

mod backend;
mod controller;
mod error;
mod machine;
mod wallet;

#[cfg(test)]
mod tests;

pub use backend::AuthBackend;
pub use controller::{AuthController, AuthStatusCallback};
pub use error::{AuthError, AuthResult};
pub use machine::{
    AuthMachine, AuthMachineInput, AuthMachineState, AuthStatus, PendingRegistration,
};
pub use wallet::{WalletError, WalletProvider};
