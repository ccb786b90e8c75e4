//! Registration branch scenarios.

use super::support::*;
use crate::{AuthError, AuthStatus};
use springboard_api::ApiError;
use springboard_storage::AuthMethod;

async fn login_to_needs_registration(h: &Harness) -> String {
    let ch = challenge(WALLET_A);
    let signature = signature_for(&ch.message);
    h.backend.queue_nonce(Ok(ch));
    h.backend.queue_verify(Err(ApiError::RegistrationRequired));

    let err = h.controller.login().await.unwrap_err();
    assert!(matches!(err, AuthError::RegistrationRequired));
    assert_eq!(h.controller.status(), AuthStatus::NeedsRegistration);
    signature
}

#[tokio::test]
async fn unknown_wallet_parks_a_pending_registration() {
    let h = harness();
    let signature = login_to_needs_registration(&h).await;

    let pending = h.controller.pending_registration().unwrap();
    assert_eq!(pending.wallet_address, WALLET_A);
    assert_eq!(pending.signature, signature);
    assert_eq!(pending.message, challenge(WALLET_A).message);

    // The branch is not an error state
    assert_eq!(h.controller.error_message(), None);
    assert!(!h.store.has_session().unwrap());
}

#[tokio::test]
async fn register_reuses_the_held_signature() {
    let h = harness();
    let signature = login_to_needs_registration(&h).await;

    h.backend.queue_register(Ok(auth_payload("u1", WALLET_A)));
    h.controller
        .register(Some("a@b.c"), Some("alice"))
        .await
        .unwrap();

    let calls = h.backend.register_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].wallet_address, WALLET_A);
    assert_eq!(calls[0].signature, signature);
    assert_eq!(calls[0].email.as_deref(), Some("a@b.c"));
    assert_eq!(calls[0].user_name.as_deref(), Some("alice"));
    drop(calls);

    // Only one signature prompt across the whole flow
    assert_eq!(h.wallet.signed_messages.lock().unwrap().len(), 1);

    assert_eq!(h.controller.status(), AuthStatus::Authenticated);
    assert!(h.store.has_session().unwrap());
    assert_eq!(
        h.store.get_user().unwrap().unwrap().auth_method,
        AuthMethod::Wallet
    );
    assert_eq!(h.controller.pending_registration(), None);
}

#[tokio::test]
async fn register_without_pending_registration_fails() {
    let h = harness();
    let err = h.controller.register(None, None).await.unwrap_err();
    assert!(matches!(err, AuthError::NoPendingRegistration));
    assert_eq!(h.controller.status(), AuthStatus::Anonymous);
}

#[tokio::test]
async fn register_conflict_falls_back_to_verify() {
    let h = harness();
    let signature = login_to_needs_registration(&h).await;

    // Another tab created the account first
    h.backend
        .queue_register(Err(request_failed(409, "Account already exists")));
    h.backend.queue_verify(Ok(auth_payload("u1", WALLET_A)));

    h.controller.register(None, None).await.unwrap();

    assert_eq!(h.controller.status(), AuthStatus::Authenticated);

    // One verify from the login that parked the registration, one from
    // the fallback, both carrying the held signature
    let calls = h.backend.verify_calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], (WALLET_A.to_string(), signature));
}

#[tokio::test]
async fn register_failure_keeps_the_registration_step() {
    let h = harness();
    login_to_needs_registration(&h).await;

    h.backend
        .queue_register(Err(request_failed(400, "email must be valid")));

    let err = h.controller.register(Some("nope"), None).await.unwrap_err();
    assert!(matches!(err, AuthError::Api(_)));

    // Form can be corrected and resubmitted
    assert_eq!(h.controller.status(), AuthStatus::NeedsRegistration);
    assert!(h.controller.pending_registration().is_some());
    assert_eq!(
        h.controller.error_message().as_deref(),
        Some("email must be valid")
    );
}

#[tokio::test]
async fn cancel_registration_discards_the_signature() {
    let h = harness();
    login_to_needs_registration(&h).await;

    h.controller.cancel_registration().unwrap();
    assert_eq!(h.controller.status(), AuthStatus::Anonymous);
    assert_eq!(h.controller.pending_registration(), None);

    let err = h.controller.register(None, None).await.unwrap_err();
    assert!(matches!(err, AuthError::NoPendingRegistration));
}

#[tokio::test]
async fn wallet_change_drops_the_pending_registration() {
    let h = harness();
    login_to_needs_registration(&h).await;

    h.controller.wallet_changed(Some(WALLET_B)).unwrap();
    assert_eq!(h.controller.pending_registration(), None);
    assert_eq!(h.controller.status(), AuthStatus::Anonymous);
}

#[tokio::test]
async fn same_wallet_reconnect_keeps_the_pending_registration() {
    let h = harness();
    login_to_needs_registration(&h).await;

    h.controller.wallet_changed(Some(WALLET_A)).unwrap();
    assert!(h.controller.pending_registration().is_some());
    assert_eq!(h.controller.status(), AuthStatus::NeedsRegistration);

    // Connect events do not restart login while registration is open
    h.controller.wallet_connected(WALLET_A).await.unwrap();
    assert_eq!(h.controller.status(), AuthStatus::NeedsRegistration);
}
