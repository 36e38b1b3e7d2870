//! AssistMe - voice commands and accessibility controls
//!
//! AssistMe lets users operate an app by speaking short commands and keeps
//! the user's accessibility preferences (font scale, high contrast, spoken
//! feedback, language) in one observable store.
//!
//! ## Flow
//!
//! 1. **Listen**: `SessionManager` opens one recognition session at a time on
//!    the host's speech-to-text service.
//! 2. **Classify**: the final transcript is matched against an ordered,
//!    per-locale keyword rule table, producing an `Intent`.
//! 3. **Dispatch**: the intent mutates the `SettingsStore` or calls an app
//!    collaborator (router, logout, assistant).
//! 4. **Speak**: the outcome is read back through a FIFO feedback queue,
//!    only while voice mode is on.

pub mod accessibility;
pub mod config;
pub mod domain;
pub mod voice;

pub use domain::*;
