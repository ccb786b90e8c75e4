//! Mock wallet and backend for scenario tests.

use crate::backend::AuthBackend;
use crate::controller::AuthController;
use crate::wallet::{WalletError, WalletProvider};
use async_trait::async_trait;
use springboard_api::{
    ApiError, ApiResult, AuthPayload, AuthUser, NonceChallenge, RegisterWalletRequest,
};
use springboard_storage::{MemoryStorage, SessionStore};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const WALLET_A: &str = "0xA11CE0000000000000000000000000000000000a";
pub const WALLET_B: &str = "0xB0B00000000000000000000000000000000000bb";

/// What the mock wallet does when asked to sign.
pub enum SignBehavior {
    /// Sign and return a deterministic signature.
    Sign,
    /// User declines the prompt.
    Reject,
    /// Provider-level failure.
    Fail(String),
    /// Switch the active account to the given address, then sign.
    SwitchThenSign(Option<String>),
}

pub struct MockWallet {
    address: Mutex<Option<String>>,
    behavior: Mutex<SignBehavior>,
    pub signed_messages: Mutex<Vec<String>>,
}

impl MockWallet {
    pub fn connected(address: &str) -> Arc<Self> {
        Arc::new(Self {
            address: Mutex::new(Some(address.to_string())),
            behavior: Mutex::new(SignBehavior::Sign),
            signed_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn disconnected() -> Arc<Self> {
        Arc::new(Self {
            address: Mutex::new(None),
            behavior: Mutex::new(SignBehavior::Sign),
            signed_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn set_behavior(&self, behavior: SignBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn set_address(&self, address: Option<&str>) {
        *self.address.lock().unwrap() = address.map(String::from);
    }
}

pub fn signature_for(message: &str) -> String {
    format!("sig({message})")
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn address(&self) -> Option<String> {
        self.address.lock().unwrap().clone()
    }

    async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        self.signed_messages
            .lock()
            .unwrap()
            .push(message.to_string());

        let behavior = self.behavior.lock().unwrap();
        match &*behavior {
            SignBehavior::Sign => Ok(signature_for(message)),
            SignBehavior::Reject => Err(WalletError::Rejected),
            SignBehavior::Fail(reason) => Err(WalletError::Provider(reason.clone())),
            SignBehavior::SwitchThenSign(new_address) => {
                *self.address.lock().unwrap() = new_address.clone();
                Ok(signature_for(message))
            }
        }
    }

    fn disconnect(&self) {
        *self.address.lock().unwrap() = None;
    }
}

/// Scripted backend: each call pops the next queued response.
#[derive(Default)]
pub struct MockBackend {
    pub nonce_responses: Mutex<VecDeque<ApiResult<NonceChallenge>>>,
    pub verify_responses: Mutex<VecDeque<ApiResult<AuthPayload>>>,
    pub register_responses: Mutex<VecDeque<ApiResult<AuthPayload>>>,
    pub verify_calls: Mutex<Vec<(String, String)>>,
    pub register_calls: Mutex<Vec<RegisterWalletRequest>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn queue_nonce(&self, response: ApiResult<NonceChallenge>) {
        self.nonce_responses.lock().unwrap().push_back(response);
    }

    pub fn queue_verify(&self, response: ApiResult<AuthPayload>) {
        self.verify_responses.lock().unwrap().push_back(response);
    }

    pub fn queue_register(&self, response: ApiResult<AuthPayload>) {
        self.register_responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn wallet_nonce(&self, wallet_address: &str) -> ApiResult<NonceChallenge> {
        self.nonce_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected nonce call for {wallet_address}"))
    }

    async fn verify_wallet(
        &self,
        wallet_address: &str,
        signature: &str,
    ) -> ApiResult<AuthPayload> {
        self.verify_calls
            .lock()
            .unwrap()
            .push((wallet_address.to_string(), signature.to_string()));
        self.verify_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected verify call for {wallet_address}"))
    }

    async fn register_wallet(&self, request: &RegisterWalletRequest) -> ApiResult<AuthPayload> {
        self.register_calls.lock().unwrap().push(request.clone());
        self.register_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected register call"))
    }
}

/// Backend whose nonce call parks until released, so a test can hold
/// one attempt mid-flight and observe the controller from outside.
#[derive(Default)]
pub struct GatedBackend {
    pub release: Notify,
    pub nonce_calls: AtomicUsize,
}

impl GatedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn nonce_call_count(&self) -> usize {
        self.nonce_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthBackend for GatedBackend {
    async fn wallet_nonce(&self, wallet_address: &str) -> ApiResult<NonceChallenge> {
        self.nonce_calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(challenge(wallet_address))
    }

    async fn verify_wallet(
        &self,
        wallet_address: &str,
        _signature: &str,
    ) -> ApiResult<AuthPayload> {
        Ok(auth_payload("u1", wallet_address))
    }

    async fn register_wallet(&self, _request: &RegisterWalletRequest) -> ApiResult<AuthPayload> {
        panic!("unexpected register call")
    }
}

pub fn challenge(address: &str) -> NonceChallenge {
    NonceChallenge {
        message: format!("springboard.fi wants you to sign in\nAddress: {address}\nNonce: n-1"),
        nonce: "n-1".to_string(),
        expires_at: "2026-01-01T00:00:00Z".to_string(),
        wallet_address: Some(address.to_string()),
    }
}

pub fn auth_payload(user_id: &str, wallet: &str) -> AuthPayload {
    AuthPayload {
        access_token: format!("jwt-{user_id}"),
        refresh_token: Some(format!("refresh-{user_id}")),
        user: AuthUser {
            id: user_id.to_string(),
            email: None,
            display_name: None,
            role: None,
            wallet_address: Some(wallet.to_string()),
            kyc_status: None,
            is_kyc_verified: None,
        },
    }
}

pub fn request_failed(status: u16, message: &str) -> ApiError {
    ApiError::RequestFailed {
        status,
        message: message.to_string(),
    }
}

pub fn fresh_store() -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Box::new(MemoryStorage::new())))
}

pub struct Harness {
    pub controller: AuthController,
    pub wallet: Arc<MockWallet>,
    pub backend: Arc<MockBackend>,
    pub store: Arc<SessionStore>,
}

/// Controller wired to a connected mock wallet and empty store.
pub fn harness() -> Harness {
    let wallet = MockWallet::connected(WALLET_A);
    let backend = MockBackend::new();
    let store = fresh_store();
    let controller = AuthController::new(backend.clone(), wallet.clone(), store.clone());
    Harness {
        controller,
        wallet,
        backend,
        store,
    }
}
