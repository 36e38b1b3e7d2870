//! Interfaces to the platform speech services.
//!
//! Both services are owned by the host. The engine submits requests through
//! these traits and the host reports completions back by calling the
//! `SessionManager` event methods (`on_result`, `on_error`, `on_end`,
//! `on_utterance_end`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accessibility::Locale;

/// Identifies one listen -> classify -> act -> speak cycle
pub type SessionId = Uuid;

/// Identifies one queued utterance
pub type UtteranceId = u64;

/// Error reported by a host speech service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech service unavailable: {0}")]
    Unavailable(String),

    #[error("Recognition failed: {0}")]
    Recognition(RecognitionErrorCode),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),
}

/// Error codes reported by the speech-to-text service mid-session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecognitionErrorCode {
    /// Nothing was heard before the service gave up
    NoSpeech,
    /// Microphone could not be opened
    AudioCapture,
    /// Microphone permission was denied
    NotAllowed,
    Network,
    Aborted,
    /// Listen window elapsed without a final transcript
    Timeout,
    Other(String),
}

impl RecognitionErrorCode {
    /// Map a platform error code ("no-speech", "not-allowed", ...)
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "no-speech" => RecognitionErrorCode::NoSpeech,
            "audio-capture" => RecognitionErrorCode::AudioCapture,
            "not-allowed" | "service-not-allowed" => RecognitionErrorCode::NotAllowed,
            "network" => RecognitionErrorCode::Network,
            "aborted" => RecognitionErrorCode::Aborted,
            "timeout" => RecognitionErrorCode::Timeout,
            other => RecognitionErrorCode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecognitionErrorCode::NoSpeech => "no-speech",
            RecognitionErrorCode::AudioCapture => "audio-capture",
            RecognitionErrorCode::NotAllowed => "not-allowed",
            RecognitionErrorCode::Network => "network",
            RecognitionErrorCode::Aborted => "aborted",
            RecognitionErrorCode::Timeout => "timeout",
            RecognitionErrorCode::Other(code) => code,
        }
    }
}

impl std::fmt::Display for RecognitionErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters for opening a recognition session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionRequest {
    pub session: SessionId,
    /// Language tag derived from the current locale (e.g. "en-US")
    pub language: String,
    /// Always false: only final transcripts are consumed
    pub interim_results: bool,
}

impl RecognitionRequest {
    pub fn new(session: SessionId, locale: Locale) -> Self {
        Self {
            session,
            language: locale.language_tag().to_string(),
            interim_results: false,
        }
    }
}

/// Platform speech-to-text service
pub trait SpeechRecognizer {
    /// Open a recognition session. Results arrive later via the manager's
    /// event methods tagged with `request.session`.
    fn start(&mut self, request: &RecognitionRequest) -> Result<(), SpeechError>;

    /// Stop listening without producing a result
    fn abort(&mut self, session: SessionId);
}

/// A single utterance handed to the text-to-speech service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub rate: f32,
    pub locale: Locale,
    /// Host voice name; `None` lets the host pick a voice for the locale
    pub voice: Option<String>,
}

/// Platform text-to-speech service (one utterance at a time)
pub trait SpeechSynthesizer {
    /// Start playing an utterance. Completion is reported through
    /// `SessionManager::on_utterance_end(utterance.id)`.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stop the current utterance immediately
    fn cancel(&mut self);
}
