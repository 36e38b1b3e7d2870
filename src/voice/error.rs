//! Engine error taxonomy.
//!
//! None of these ever reach the user as a fault: each one ends in a spoken
//! or visible message and a return to idle. They are surfaced through
//! `EngineEvent::Error` for diagnostics.

use super::dispatcher::DispatchError;
use super::host::RecognitionErrorCode;
use crate::accessibility::SettingsError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Host lacks speech-to-text or text-to-speech
    #[error("Speech capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Mid-session recognition failure
    #[error("Recognition error: {0}")]
    Recognition(RecognitionErrorCode),

    /// Classified, but the action could not complete
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
