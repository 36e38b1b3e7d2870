//! Voice command engine
//!
//! This module provides:
//! 1. Single-session listening on the platform speech-to-text service
//! 2. Ordered keyword classification of final transcripts into intents
//! 3. Dispatch of intents to the settings store and app collaborators
//! 4. Queued spoken feedback gated by voice mode
//!
//! Architecture:
//! - SessionManager: Listening lifecycle state machine, orchestrates the rest
//! - IntentClassifier: Normalizes transcripts, walks the rule table
//! - RuleTable / IntentRule: Data-driven, priority-ordered keyword rules
//! - ActionDispatcher: Maps intents to side effects and feedback phrases
//! - FeedbackController: FIFO utterance queue on the text-to-speech service
//!
//! The engine defines no threads. Hosts call the `SessionManager` event
//! methods as platform completions arrive and drain `poll_events()`.

pub mod actions;
mod availability;
mod classifier;
mod dispatcher;
mod error;
mod feedback;
pub mod host;
mod manager;
pub mod phrases;
mod types;

#[cfg(test)]
mod tests;

// Re-export from actions
pub use actions::{IntentRule, RuleError, RuleMatch, RuleTable, SlotExtractor, default_english_rules};

// Re-export from availability
pub use availability::{Capability, CapabilityProvider, StaticCapabilities};

// Re-export from classifier
pub use classifier::{IntentClassifier, normalize};

// Re-export from dispatcher
pub use dispatcher::{
    ActionDispatcher, AssistantSurface, CollaboratorError, Collaborators, DispatchError,
    DispatchOutcome, DispatchResult, LogoutHandler, Navigator, ScreenReader,
};

// Re-export from error
pub use error::EngineError;

// Re-export from feedback
pub use feedback::{FeedbackConfig, FeedbackController};

// Re-export from host
pub use host::{
    RecognitionErrorCode, RecognitionRequest, SessionId, SpeechError, SpeechRecognizer,
    SpeechSynthesizer, Utterance, UtteranceId,
};

// Re-export from manager
pub use manager::{DEFAULT_LISTEN_TIMEOUT, EngineConfig, SessionManager, SpeechHost};

// Re-export from types
pub use types::{CommandSession, EngineEvent, ListenOutcome, SessionOutcome, SessionState};
