//! Integration tests for the security key gate
//!
//! These tests verify the single-prompt guarantee:
//! 1. Concurrent callers share one prompt and one result
//! 2. A verified key short-circuits later calls
//! 3. Mismatches re-prompt with an inline error, then give up
//! 4. Logout returns the gate to idle

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use solidtui::error::KeyError;
use solidtui::model::{ScaffoldState, SecurityKeyStatus, StatusBarConfig, StatusKey};
use solidtui::services::{ChannelKeyPrompt, GateState, KeyManager, KeyPrompt, SecurityKeyGate};
use solidtui::ui::Scaffold;

/// Key manager that only holds a key after `init_keys` succeeds
struct MockKeys {
    expected: String,
    held: Mutex<bool>,
}

impl MockKeys {
    fn new(expected: &str) -> Arc<Self> {
        Arc::new(Self {
            expected: expected.to_string(),
            held: Mutex::new(false),
        })
    }
}

#[async_trait]
impl KeyManager for MockKeys {
    async fn has_key(&self) -> Result<bool, KeyError> {
        Ok(*self.held.lock().unwrap())
    }

    async fn verification_key(&self) -> Result<Option<String>, KeyError> {
        Ok(Some(self.expected.clone()))
    }

    async fn init_keys(&self, passphrase: &str) -> Result<(), KeyError> {
        if passphrase != self.expected {
            return Err(KeyError::Mismatch);
        }
        *self.held.lock().unwrap() = true;
        Ok(())
    }

    async fn forget_key(&self) -> Result<(), KeyError> {
        *self.held.lock().unwrap() = false;
        Ok(())
    }
}

/// Prompt that answers from a script after a short delay, recording the
/// inline error it was shown each time
struct ScriptedPrompt {
    answers: Mutex<Vec<String>>,
    calls: AtomicUsize,
    errors: Mutex<Vec<Option<String>>>,
}

impl ScriptedPrompt {
    fn new(answers: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().rev().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
            errors: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyPrompt for ScriptedPrompt {
    async fn collect_key(&self, error: Option<String>) -> Result<String, KeyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.errors.lock().unwrap().push(error);
        // Give concurrent callers time to pile up behind this prompt
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.answers.lock().unwrap().pop().ok_or(KeyError::Cancelled)
    }
}

/// Test: Two back-to-back requests produce exactly one prompt
#[tokio::test]
async fn test_concurrent_callers_share_one_prompt() {
    let prompt = ScriptedPrompt::new(&["secret"]);
    let gate = SecurityKeyGate::new(MockKeys::new("secret"), prompt.clone());

    let (first, second) = tokio::join!(gate.ensure_key(), gate.ensure_key());

    assert!(first);
    assert!(second);
    assert_eq!(prompt.calls(), 1, "only one prompt may be shown");
    assert_eq!(gate.state(), GateState::Verified);
}

/// Test: Callers on separate tasks also share the prompt
#[tokio::test]
async fn test_spawned_callers_share_one_prompt() {
    let prompt = ScriptedPrompt::new(&["secret"]);
    let gate = SecurityKeyGate::new(MockKeys::new("secret"), prompt.clone());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gate = gate.clone();
            tokio::spawn(async move { gate.ensure_key().await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(prompt.calls(), 1);
}

/// Test: Once verified, later requests do not prompt again
#[tokio::test]
async fn test_verified_key_is_not_prompted_again() {
    let prompt = ScriptedPrompt::new(&["secret"]);
    let gate = SecurityKeyGate::new(MockKeys::new("secret"), prompt.clone());

    assert!(gate.ensure_key().await);
    assert!(gate.ensure_key().await);
    assert!(gate.is_key_saved());
    assert_eq!(prompt.calls(), 1);
}

/// Test: A wrong passphrase re-prompts with the mismatch shown inline
#[tokio::test]
async fn test_mismatch_reprompts_with_error() {
    let prompt = ScriptedPrompt::new(&["wrong", "secret"]);
    let gate = SecurityKeyGate::new(MockKeys::new("secret"), prompt.clone());

    assert!(gate.ensure_key().await);
    assert_eq!(prompt.calls(), 2);

    let errors = prompt.errors.lock().unwrap().clone();
    assert!(errors[0].is_none(), "first prompt has no error");
    assert!(errors[1].is_some(), "second prompt explains the mismatch");
}

/// Test: Repeated mismatches leave the gate unverified
#[tokio::test]
async fn test_repeated_mismatch_gives_up() {
    let prompt = ScriptedPrompt::new(&["a", "b", "c", "secret"]);
    let gate = SecurityKeyGate::new(MockKeys::new("secret"), prompt.clone());

    assert!(!gate.ensure_key().await);
    assert_eq!(prompt.calls(), 3);
    assert_eq!(gate.state(), GateState::Unverified);

    // A later request starts a fresh verification
    assert!(gate.ensure_key().await);
    assert_eq!(prompt.calls(), 4);
}

/// Test: Cancelling the prompt resolves every waiter with false
#[tokio::test]
async fn test_cancelled_prompt_resolves_all_waiters() {
    let prompt = ScriptedPrompt::new(&[]);
    let gate = SecurityKeyGate::new(MockKeys::new("secret"), prompt.clone());

    let (first, second) = tokio::join!(gate.ensure_key(), gate.ensure_key());
    assert!(!first);
    assert!(!second);
    assert_eq!(prompt.calls(), 1);
}

/// Test: Logout forgets the key and the next request prompts again
#[tokio::test]
async fn test_reset_returns_to_idle() {
    let prompt = ScriptedPrompt::new(&["secret", "secret"]);
    let keys = MockKeys::new("secret");
    let gate = SecurityKeyGate::new(keys.clone(), prompt.clone());

    assert!(gate.ensure_key().await);
    gate.reset().await.unwrap();
    assert_eq!(gate.state(), GateState::Idle);
    assert!(!keys.has_key().await.unwrap());

    assert!(gate.ensure_key().await);
    assert_eq!(prompt.calls(), 2);
}

/// Test: The UI channel prompt delivers one request for concurrent callers,
/// and the status bar picks up the verified state
#[tokio::test]
async fn test_channel_prompt_and_status_bar_sync() {
    let (prompt, mut requests) = ChannelKeyPrompt::channel();
    let gate = SecurityKeyGate::new(MockKeys::new("secret"), Arc::new(prompt));

    let scaffold = Scaffold::builder()
        .menu(vec![solidtui::model::MenuItem::new("home", "Home", "⌂")])
        .status_bar(StatusBarConfig::new().security_key(SecurityKeyStatus::default()))
        .security_key_gate(gate.clone())
        .build()
        .unwrap();

    let entry_saved = |scaffold: &Scaffold| {
        scaffold
            .compose_status_bar(1000)
            .unwrap()
            .entries
            .iter()
            .find(|e| e.key == StatusKey::SecurityKey)
            .map(|e| !e.warn)
            .unwrap()
    };
    assert!(!entry_saved(&scaffold));

    let a = tokio::spawn({
        let gate = gate.clone();
        async move { gate.ensure_key().await }
    });
    let b = tokio::spawn({
        let gate = gate.clone();
        async move { gate.ensure_key().await }
    });

    // The UI loop routes the request into a dialog and the user submits
    let request = requests.recv().await.unwrap();
    let mut state = ScaffoldState::default();
    state.open_key_prompt(request);
    if let Some(solidtui::model::Dialog::KeyPrompt { request, .. }) = state.ui.dialog.take() {
        request.submit("secret".to_string());
    }

    assert!(a.await.unwrap());
    assert!(b.await.unwrap());
    assert!(requests.try_recv().is_err(), "no second prompt was requested");
    assert!(entry_saved(&scaffold));
}
