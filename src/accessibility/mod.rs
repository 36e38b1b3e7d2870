//! Accessibility settings shared across the application
//!
//! The store is the single source of truth for font scale, contrast, voice
//! mode and locale. Rendering surfaces and the speech feedback controller
//! subscribe to it; dispatched voice intents mutate it.

mod store;
mod types;

pub use store::{SettingsError, SettingsStore};
pub use types::{AccessibilitySettings, FontScale, Locale, SettingsChange};
