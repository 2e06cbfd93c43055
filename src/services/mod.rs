//! Process-lifetime Services
//!
//! Constructor-injected services handed to the scaffold and widgets:
//! - single_flight: at-most-one-in-flight primitive
//! - security_key: security key gate, key manager and prompt seams
//! - prefs: persisted key-value preferences
//! - theme: theme mode controller
//! - storage: POD storage seam
//! - local_pod: filesystem-backed POD storage
//! - files: file browser upload/download/delete flow

pub mod files;
pub mod local_pod;
pub mod prefs;
pub mod security_key;
pub mod single_flight;
pub mod storage;
pub mod theme;

// Re-export commonly used types for convenience
pub use files::FileBrowser;
pub use local_pod::LocalPodStorage;
pub use prefs::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use security_key::{
    ChannelKeyPrompt, GateState, KeyManager, KeyPrompt, KeyPromptRequest, MemoryKeyManager,
    SecurityKeyGate,
};
pub use single_flight::SingleFlight;
pub use storage::{ContainerListing, PodEntry, PodStorage};
pub use theme::ThemeController;
