//! Theme mode controller
//!
//! Owns the persisted light/dark/system preference. Every mutation is written
//! to the preference store before subscribers are notified.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{watch, Mutex};

use super::prefs::PreferenceStore;
use crate::error::PreferenceError;
use crate::logic::ui::cycle_theme_mode;
use crate::model::ThemeMode;

/// Preference key under which the mode string is stored
pub const THEME_MODE_KEY: &str = "theme_mode";

struct ControllerInner {
    store: Arc<dyn PreferenceStore>,
    mode: watch::Sender<ThemeMode>,
    initialized: AtomicBool,
    /// Serializes load and persist so concurrent toggles are applied in order
    write_lock: Mutex<()>,
}

#[derive(Clone)]
pub struct ThemeController {
    inner: Arc<ControllerInner>,
}

impl ThemeController {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let (mode, _) = watch::channel(ThemeMode::default());
        Self {
            inner: Arc::new(ControllerInner {
                store,
                mode,
                initialized: AtomicBool::new(false),
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Load the persisted mode. Calling it again after a successful load is a
    /// no-op; an unreadable value falls back to `System`.
    pub async fn init(&self) -> Result<ThemeMode, PreferenceError> {
        let _guard = self.inner.write_lock.lock().await;
        if self.inner.initialized.load(Ordering::Acquire) {
            return Ok(self.mode());
        }

        let stored = self.inner.store.get(THEME_MODE_KEY).await?;
        let mode = match stored.as_deref().map(str::parse::<ThemeMode>) {
            Some(Ok(mode)) => mode,
            Some(Err(e)) => {
                warn!("ignoring stored theme mode: {}", e);
                ThemeMode::System
            }
            None => ThemeMode::System,
        };

        self.inner.initialized.store(true, Ordering::Release);
        self.inner.mode.send_replace(mode);
        debug!("theme mode loaded: {}", mode);
        Ok(mode)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::Acquire)
    }

    pub fn mode(&self) -> ThemeMode {
        *self.inner.mode.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.inner.mode.subscribe()
    }

    /// Advance system → light → dark → system
    pub async fn toggle(&self) -> Result<ThemeMode, PreferenceError> {
        let _guard = self.inner.write_lock.lock().await;
        let next = cycle_theme_mode(self.mode());
        self.persist(next).await?;
        Ok(next)
    }

    pub async fn set_mode(&self, mode: ThemeMode) -> Result<(), PreferenceError> {
        let _guard = self.inner.write_lock.lock().await;
        self.persist(mode).await
    }

    async fn persist(&self, mode: ThemeMode) -> Result<(), PreferenceError> {
        self.inner.store.set(THEME_MODE_KEY, mode.as_str()).await?;
        self.inner.initialized.store(true, Ordering::Release);
        self.inner.mode.send_replace(mode);
        debug!("theme mode set to {}", mode);
        Ok(())
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("mode", &self.mode())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prefs::{JsonPreferenceStore, MemoryPreferenceStore};

    #[tokio::test]
    async fn test_defaults_to_system() {
        let controller = ThemeController::new(Arc::new(MemoryPreferenceStore::new()));
        assert_eq!(controller.init().await.unwrap(), ThemeMode::System);
    }

    #[tokio::test]
    async fn test_toggle_cycles_through_all_modes() {
        let controller = ThemeController::new(Arc::new(MemoryPreferenceStore::new()));
        controller.init().await.unwrap();

        assert_eq!(controller.toggle().await.unwrap(), ThemeMode::Light);
        assert_eq!(controller.toggle().await.unwrap(), ThemeMode::Dark);
        assert_eq!(controller.toggle().await.unwrap(), ThemeMode::System);
    }

    #[tokio::test]
    async fn test_toggle_persists_before_notifying() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let controller = ThemeController::new(store.clone());
        let mut rx = controller.subscribe();

        controller.toggle().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ThemeMode::Light);
        assert_eq!(store.get(THEME_MODE_KEY).await.unwrap().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let store = Arc::new(MemoryPreferenceStore::with_value(THEME_MODE_KEY, "dark"));
        let controller = ThemeController::new(store.clone());
        assert_eq!(controller.init().await.unwrap(), ThemeMode::Dark);

        controller.set_mode(ThemeMode::Light).await.unwrap();
        store.set(THEME_MODE_KEY, "dark").await.unwrap();
        // Second init does not reload
        assert_eq!(controller.init().await.unwrap(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_unknown_stored_value_falls_back() {
        let store = Arc::new(MemoryPreferenceStore::with_value(THEME_MODE_KEY, "sepia"));
        let controller = ThemeController::new(store);
        assert_eq!(controller.init().await.unwrap(), ThemeMode::System);
    }

    #[tokio::test]
    async fn test_mode_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let first = ThemeController::new(Arc::new(JsonPreferenceStore::new(&path)));
        first.init().await.unwrap();
        first.set_mode(ThemeMode::Dark).await.unwrap();

        let second = ThemeController::new(Arc::new(JsonPreferenceStore::new(&path)));
        assert_eq!(second.init().await.unwrap(), ThemeMode::Dark);
    }
}
