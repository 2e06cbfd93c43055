//! Security-Key Gate
//!
//! Guarantees at most one key-verification prompt is visible at a time, no
//! matter how many callers ask for the key concurrently.
//!
//! ```text
//! Idle ──ensure_key──▶ Verifying ──▶ Verified
//!   ▲                           └──▶ Unverified
//!   └──────────── reset (logout) ─────────┘
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot, watch};

use super::single_flight::SingleFlight;
use crate::error::KeyError;
use crate::logic::errors::format_key_error;

/// Passphrase prompts shown before giving up on a mismatching key
pub const MAX_PROMPT_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Verifying,
    Verified,
    Unverified,
}

/// External key manager
#[async_trait]
pub trait KeyManager: Send + Sync {
    /// Whether the security key is already held in memory
    async fn has_key(&self) -> Result<bool, KeyError>;

    /// Verification key stored on the POD, if the user set one up
    async fn verification_key(&self) -> Result<Option<String>, KeyError>;

    /// Derive and keep the key from a passphrase; `KeyError::Mismatch` when
    /// it does not match the verification key
    async fn init_keys(&self, passphrase: &str) -> Result<(), KeyError>;

    async fn forget_key(&self) -> Result<(), KeyError>;
}

/// Modal "collect key from user" prompt
#[async_trait]
pub trait KeyPrompt: Send + Sync {
    /// Ask for the passphrase. `error` carries the reason a previous attempt
    /// failed so it can be shown inline.
    async fn collect_key(&self, error: Option<String>) -> Result<String, KeyError>;
}

/// A pending passphrase request delivered to the UI loop
pub struct KeyPromptRequest {
    pub error: Option<String>,
    reply: oneshot::Sender<Option<String>>,
}

impl KeyPromptRequest {
    /// New request plus the receiver its answer arrives on
    pub fn pending(error: Option<String>) -> (Self, oneshot::Receiver<Option<String>>) {
        let (reply, answer) = oneshot::channel();
        (Self { error, reply }, answer)
    }

    pub fn submit(self, passphrase: String) {
        let _ = self.reply.send(Some(passphrase));
    }

    pub fn cancel(self) {
        let _ = self.reply.send(None);
    }
}

impl fmt::Debug for KeyPromptRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPromptRequest")
            .field("error", &self.error)
            .finish()
    }
}

/// Prompt that forwards requests to the UI loop over a channel
#[derive(Clone)]
pub struct ChannelKeyPrompt {
    tx: mpsc::UnboundedSender<KeyPromptRequest>,
}

impl ChannelKeyPrompt {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<KeyPromptRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl KeyPrompt for ChannelKeyPrompt {
    async fn collect_key(&self, error: Option<String>) -> Result<String, KeyError> {
        let (request, answer) = KeyPromptRequest::pending(error);
        self.tx
            .send(request)
            .map_err(|_| KeyError::Cancelled)?;
        match answer.await {
            Ok(Some(passphrase)) => Ok(passphrase),
            Ok(None) | Err(_) => Err(KeyError::Cancelled),
        }
    }
}

/// In-memory key manager comparing the passphrase against a configured
/// verification key
#[derive(Debug, Default)]
pub struct MemoryKeyManager {
    verification: Option<String>,
    key: Mutex<Option<String>>,
}

impl MemoryKeyManager {
    pub fn new(verification: Option<String>) -> Self {
        Self {
            verification,
            key: Mutex::new(None),
        }
    }
}

#[async_trait]
impl KeyManager for MemoryKeyManager {
    async fn has_key(&self) -> Result<bool, KeyError> {
        Ok(self
            .key
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some())
    }

    async fn verification_key(&self) -> Result<Option<String>, KeyError> {
        Ok(self.verification.clone())
    }

    async fn init_keys(&self, passphrase: &str) -> Result<(), KeyError> {
        if let Some(expected) = &self.verification {
            if expected != passphrase {
                return Err(KeyError::Mismatch);
            }
        }
        *self.key.lock().unwrap_or_else(PoisonError::into_inner) = Some(passphrase.to_string());
        Ok(())
    }

    async fn forget_key(&self) -> Result<(), KeyError> {
        self.key.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

struct GateInner {
    keys: Arc<dyn KeyManager>,
    prompt: Arc<dyn KeyPrompt>,
    flight: SingleFlight<bool>,
    state: watch::Sender<GateState>,
}

/// Moves a `Verifying` gate to `Unverified` if verification is dropped before
/// it records an outcome
struct VerifyingGuard<'a> {
    state: &'a watch::Sender<GateState>,
}

impl Drop for VerifyingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if *state == GateState::Verifying {
                *state = GateState::Unverified;
                true
            } else {
                false
            }
        });
    }
}

impl GateInner {
    async fn verify(&self) -> bool {
        self.state.send_replace(GateState::Verifying);
        let _guard = VerifyingGuard { state: &self.state };
        let next = match self.run_verification().await {
            Ok(true) => GateState::Verified,
            Ok(false) => GateState::Unverified,
            Err(e) => {
                warn!("security key verification failed: {}", e);
                GateState::Unverified
            }
        };
        self.state.send_replace(next);
        next == GateState::Verified
    }

    async fn run_verification(&self) -> Result<bool, KeyError> {
        if self.keys.has_key().await? {
            debug!("security key already in memory");
            return Ok(true);
        }
        if self.keys.verification_key().await?.is_none() {
            debug!("no verification key configured, nothing to prompt for");
            return Ok(true);
        }

        let mut error = None;
        for attempt in 1..=MAX_PROMPT_ATTEMPTS {
            let passphrase = self.prompt.collect_key(error.take()).await?;
            match self.keys.init_keys(&passphrase).await {
                Ok(()) => break,
                Err(KeyError::Mismatch) => {
                    info!("security key mismatch (attempt {})", attempt);
                    error = Some(format_key_error(&KeyError::Mismatch));
                    if attempt == MAX_PROMPT_ATTEMPTS {
                        return Err(KeyError::Mismatch);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        self.keys.has_key().await
    }
}

/// Process-lifetime service; clone the handle to share it
#[derive(Clone)]
pub struct SecurityKeyGate {
    inner: Arc<GateInner>,
}

impl SecurityKeyGate {
    pub fn new(keys: Arc<dyn KeyManager>, prompt: Arc<dyn KeyPrompt>) -> Self {
        let (state, _) = watch::channel(GateState::Idle);
        Self {
            inner: Arc::new(GateInner {
                keys,
                prompt,
                flight: SingleFlight::new(),
                state,
            }),
        }
    }

    pub fn state(&self) -> GateState {
        *self.inner.state.borrow()
    }

    pub fn is_key_saved(&self) -> bool {
        self.state() == GateState::Verified
    }

    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.inner.state.subscribe()
    }

    /// Make sure the security key is available, prompting at most once
    /// across all concurrent callers
    pub async fn ensure_key(&self) -> bool {
        if self.state() == GateState::Verified {
            return true;
        }
        let inner = Arc::clone(&self.inner);
        self.inner
            .flight
            .run(|| async move { inner.verify().await })
            .await
            .unwrap_or(false)
    }

    /// Pick up a key that was loaded outside the gate (e.g. at login)
    pub async fn refresh(&self) {
        if self.inner.flight.in_flight() {
            return;
        }
        match self.inner.keys.has_key().await {
            Ok(true) => {
                self.inner.state.send_replace(GateState::Verified);
            }
            Ok(false) => {}
            Err(e) => warn!("could not check security key: {}", e),
        }
    }

    /// Forget the key and return to `Idle` (logout)
    pub async fn reset(&self) -> Result<(), KeyError> {
        self.inner.keys.forget_key().await?;
        self.inner.state.send_replace(GateState::Idle);
        info!("security key forgotten");
        Ok(())
    }
}

impl fmt::Debug for SecurityKeyGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityKeyGate")
            .field("state", &self.state())
            .finish()
    }
}
