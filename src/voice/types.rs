//! Command session types and engine events.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::dispatcher::DispatchError;
use super::error::EngineError;
use super::host::SessionId;
use crate::domain::Intent;

/// Command session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session alive
    #[default]
    Idle,
    /// Waiting for a final transcript from the recognizer
    Listening,
    /// Classifying and dispatching the transcript
    Processing,
    /// Playing feedback for this session
    Speaking,
    /// Failed; returns to idle once the error phrase is emitted
    Error,
}

impl SessionState {
    /// Returns true if a session occupies the engine
    pub fn is_active(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }

    pub fn is_listening(&self) -> bool {
        matches!(self, SessionState::Listening)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Listening => write!(f, "Listening"),
            SessionState::Processing => write!(f, "Processing"),
            SessionState::Speaking => write!(f, "Speaking"),
            SessionState::Error => write!(f, "Error"),
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Intent dispatched normally
    Completed(Intent),
    /// Intent handled with a spoken fallback
    Degraded { intent: Intent, error: DispatchError },
    /// Listening failed or speech was unavailable
    Failed(EngineError),
    /// Cancelled by the user
    Cancelled,
}

/// One listen -> classify -> act -> speak cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSession {
    pub id: SessionId,
    pub state: SessionState,
    /// Final transcript, set once
    pub transcript: Option<String>,
    pub intent: Option<Intent>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Outcome held while feedback plays
    pub(crate) pending_outcome: Option<SessionOutcome>,
}

impl CommandSession {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            transcript: None,
            intent: None,
            started_at,
            ended_at: None,
            pending_outcome: None,
        }
    }
}

/// Result of a listen request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenOutcome {
    /// Recognition session opened
    Started(SessionId),
    /// Another session is alive; nothing changed
    Busy {
        active: SessionId,
        state: SessionState,
    },
    /// Speech-to-text is not supported here; carries the user-facing message
    Unavailable(String),
    /// The recognizer refused to start; the session already ended
    Failed(EngineError),
}

/// Events from the session manager
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// State changed
    StateChanged {
        session: SessionId,
        state: SessionState,
    },
    /// Final transcript received
    TranscriptReceived { session: SessionId, text: String },
    /// Transcript classified
    IntentClassified { session: SessionId, intent: Intent },
    /// Feedback phrase produced; `spoken` is false when voice output was
    /// muted or unavailable and the text should be shown instead
    Feedback {
        session: SessionId,
        text: String,
        spoken: bool,
    },
    /// One-off user-visible notice (capability problems)
    Notice { message: String },
    /// Error occurred
    Error {
        session: Option<SessionId>,
        error: EngineError,
    },
    /// Session returned to idle
    SessionEnded {
        session: CommandSession,
        outcome: SessionOutcome,
    },
}
