//! SolidTUI Library
//!
//! Responsive terminal scaffolding for apps backed by a personal online data
//! store: navigation rail/drawer, app bar, status bar, theme toggle, About
//! dialog, security-key gate and POD file browser.
//!
//! Hosts build a [`ui::Scaffold`], keep a [`model::ScaffoldState`] next to
//! it, call `Scaffold::render` each frame and feed key/mouse input through
//! [`handlers`]. The returned [`model::ScaffoldEvent`]s name handler ids
//! that the host dispatches through a [`model::HandlerRegistry`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod model;
pub mod services;
pub mod ui;

pub use error::{ConfigError, FileOpError, KeyError, PreferenceError, ScaffoldError, StorageError};
