//! Command session manager.
//!
//! Owns the listening lifecycle:
//!
//! ```text
//! Idle -> Listening -> Processing -> Speaking -> Idle
//!             |             \-----------------> Idle   (no feedback due)
//!             \-> Error -> Idle                        (platform error, cancel, timeout)
//! Idle -> Error -> Idle                                (speech-to-text unsupported)
//! ```
//!
//! At most one session is alive. A listen request while one is active is
//! answered with `ListenOutcome::Busy` and changes nothing.

use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::availability::{Capability, CapabilityProvider};
use super::classifier::IntentClassifier;
use super::dispatcher::{ActionDispatcher, Collaborators, DispatchOutcome};
use super::error::EngineError;
use super::feedback::{FeedbackConfig, FeedbackController};
use super::host::{
    RecognitionErrorCode, RecognitionRequest, SessionId, SpeechError, SpeechRecognizer,
    SpeechSynthesizer, UtteranceId,
};
use super::phrases;
use super::types::{CommandSession, EngineEvent, ListenOutcome, SessionOutcome, SessionState};
use crate::accessibility::{Locale, SettingsStore};

/// Default listen window before a session is abandoned
pub const DEFAULT_LISTEN_TIMEOUT: Duration = Duration::from_secs(15);

/// Platform speech services handed to the engine
pub struct SpeechHost {
    pub recognizer: Box<dyn SpeechRecognizer>,
    pub synthesizer: Box<dyn SpeechSynthesizer>,
    pub capabilities: Box<dyn CapabilityProvider>,
}

/// Engine tuning
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Listening longer than this without a final transcript fails the session
    pub listen_timeout: Duration,
    pub feedback: FeedbackConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            listen_timeout: DEFAULT_LISTEN_TIMEOUT,
            feedback: FeedbackConfig::default(),
        }
    }
}

/// Orchestrates recognition, classification, dispatch and feedback
pub struct SessionManager {
    settings: Rc<SettingsStore>,
    classifier: IntentClassifier,
    dispatcher: ActionDispatcher,
    feedback: FeedbackController,
    recognizer: Box<dyn SpeechRecognizer>,
    capabilities: Box<dyn CapabilityProvider>,
    listen_timeout: Duration,
    session: Option<CommandSession>,
    availability_cache: Option<Capability>,
    notice_shown: bool,
    event_tx: Sender<EngineEvent>,
    event_rx: Receiver<EngineEvent>,
    pub last_error: Option<EngineError>,
}

impl SessionManager {
    pub fn new(
        settings: Rc<SettingsStore>,
        host: SpeechHost,
        collaborators: Collaborators,
        classifier: IntentClassifier,
        config: EngineConfig,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let output = host.capabilities.text_to_speech();
        if let Capability::Unavailable(reason) = &output {
            warn!("[assistme:voice] Speech output unavailable: {}", reason);
            let _ = event_tx.send(EngineEvent::Notice {
                message: format!("Spoken feedback is not available on this device. {}", reason),
            });
        }

        let feedback = FeedbackController::new(&settings, host.synthesizer, output, config.feedback);
        let dispatcher = ActionDispatcher::new(settings.clone(), collaborators);

        Self {
            settings,
            classifier,
            dispatcher,
            feedback,
            recognizer: host.recognizer,
            capabilities: host.capabilities,
            listen_timeout: config.listen_timeout,
            session: None,
            availability_cache: None,
            notice_shown: false,
            event_tx,
            event_rx,
            last_error: None,
        }
    }

    /// Current state (Idle when no session is alive)
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map(|s| s.state)
            .unwrap_or(SessionState::Idle)
    }

    /// The live session, if any
    pub fn session(&self) -> Option<&CommandSession> {
        self.session.as_ref()
    }

    pub fn settings(&self) -> &Rc<SettingsStore> {
        &self.settings
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn feedback(&self) -> &FeedbackController {
        &self.feedback
    }

    /// Whether speech-to-text can be used (cached for the manager's lifetime)
    pub fn speech_to_text(&mut self) -> Capability {
        if let Some(capability) = &self.availability_cache {
            return capability.clone();
        }
        let capability = self.capabilities.speech_to_text();
        self.availability_cache = Some(capability.clone());
        capability
    }

    /// Change the recognition and synthesis language
    pub fn set_locale(&mut self, code: &str) -> Result<Locale, EngineError> {
        Ok(self.settings.set_locale(code)?)
    }

    /// Open a new command session
    pub fn start_listening(&mut self) -> ListenOutcome {
        self.start_listening_at(Utc::now())
    }

    pub fn start_listening_at(&mut self, now: DateTime<Utc>) -> ListenOutcome {
        if let Some(active) = &self.session {
            info!(
                "[assistme:voice] Listen request ignored, session {} is {}",
                active.id, active.state
            );
            return ListenOutcome::Busy {
                active: active.id,
                state: active.state,
            };
        }

        let session = CommandSession::new(now);
        let id = session.id;
        self.session = Some(session);

        if let Capability::Unavailable(reason) = self.speech_to_text() {
            return self.reject_unavailable(reason);
        }

        let request = RecognitionRequest::new(id, self.settings.snapshot().locale);
        match self.recognizer.start(&request) {
            Ok(()) => {
                info!("[assistme:voice] Session {} listening ({})", id, request.language);
                self.set_state(SessionState::Listening);
                ListenOutcome::Started(id)
            }
            Err(SpeechError::Unavailable(reason)) => {
                self.availability_cache = Some(Capability::Unavailable(reason.clone()));
                self.reject_unavailable(reason)
            }
            Err(SpeechError::Recognition(code)) => {
                self.fail_recognition(code.clone());
                ListenOutcome::Failed(EngineError::Recognition(code))
            }
            Err(e) => {
                let code = RecognitionErrorCode::Other(e.to_string());
                self.fail_recognition(code.clone());
                ListenOutcome::Failed(EngineError::Recognition(code))
            }
        }
    }

    /// Recognizer reported that audio capture began
    pub fn on_start(&mut self, session: SessionId) {
        if self.is_current(session, SessionState::Listening) {
            debug!("[assistme:voice] Session {} capturing audio", session);
        }
    }

    /// Recognizer produced the final transcript
    pub fn on_result(&mut self, session: SessionId, transcript: &str) {
        if !self.is_current(session, SessionState::Listening) {
            debug!("[assistme:voice] Ignoring result for inactive session {}", session);
            return;
        }
        if transcript.trim().is_empty() {
            self.fail_recognition(RecognitionErrorCode::NoSpeech);
            return;
        }

        if let Some(active) = self.session.as_mut() {
            active.transcript = Some(transcript.to_string());
        }
        self.emit(EngineEvent::TranscriptReceived {
            session,
            text: transcript.to_string(),
        });
        self.set_state(SessionState::Processing);

        let settings = self.settings.snapshot();
        let intent = self.classifier.classify(transcript, &settings);
        info!("[assistme:voice] Session {} classified as {}", session, intent);
        self.emit(EngineEvent::IntentClassified {
            session,
            intent: intent.clone(),
        });

        let result = self.dispatcher.dispatch(&intent);
        if let Some(active) = self.session.as_mut() {
            active.intent = Some(intent.clone());
        }

        let outcome = match result.outcome.clone() {
            DispatchOutcome::Handled => SessionOutcome::Completed(intent),
            DispatchOutcome::Degraded(error) => {
                self.report(Some(session), EngineError::Dispatch(error.clone()));
                SessionOutcome::Degraded { intent, error }
            }
        };

        for phrase in result.phrases() {
            self.deliver(session, phrase);
        }
        self.speak_or_finish(outcome);
    }

    /// Recognizer failed mid-session
    pub fn on_error(&mut self, session: SessionId, code: RecognitionErrorCode) {
        if !self.is_current(session, SessionState::Listening) {
            debug!("[assistme:voice] Ignoring error '{}' for inactive session {}", code, session);
            return;
        }
        self.fail_recognition(code);
    }

    /// Recognizer stopped. Ending while still listening means nothing was heard.
    pub fn on_end(&mut self, session: SessionId) {
        if self.is_current(session, SessionState::Listening) {
            self.fail_recognition(RecognitionErrorCode::NoSpeech);
        }
    }

    /// Synthesizer finished an utterance
    pub fn on_utterance_end(&mut self, utterance: UtteranceId) {
        self.feedback.on_utterance_end(utterance);
        self.settle_speaking();
    }

    /// Abandon the live session. Returns false if there was nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        match self.state() {
            SessionState::Listening => {
                if let Some(id) = self.session.as_ref().map(|s| s.id) {
                    self.recognizer.abort(id);
                }
                self.fail_recognition(RecognitionErrorCode::Aborted);
                true
            }
            SessionState::Speaking => {
                self.feedback.cancel_all();
                self.finish(SessionOutcome::Cancelled);
                true
            }
            _ => false,
        }
    }

    /// Enforce the listen timeout. Returns true if the session was abandoned.
    pub fn check_timeout(&mut self, now: DateTime<Utc>) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if session.state != SessionState::Listening {
            return false;
        }

        let elapsed = (now - session.started_at).to_std().unwrap_or_default();
        if elapsed < self.listen_timeout {
            return false;
        }

        let id = session.id;
        info!("[assistme:voice] Session {} timed out after {:?}", id, elapsed);
        self.recognizer.abort(id);
        self.fail_recognition(RecognitionErrorCode::Timeout);
        true
    }

    /// Poll for events (call each frame). Also applies settings changes to
    /// the feedback queue, which may end a session whose speech was muted.
    pub fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.feedback.sync_settings();
        self.settle_speaking();
        self.event_rx.try_iter().collect()
    }

    fn is_current(&self, session: SessionId, state: SessionState) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.id == session && s.state == state)
    }

    fn set_state(&mut self, state: SessionState) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        debug!("[assistme:voice] Session {}: {} -> {}", session.id, session.state, state);
        session.state = state;
        let id = session.id;
        self.emit(EngineEvent::StateChanged { session: id, state });
    }

    fn reject_unavailable(&mut self, reason: String) -> ListenOutcome {
        warn!("[assistme:voice] Speech recognition unavailable: {}", reason);
        self.set_state(SessionState::Error);

        let message = phrases::listening_unavailable(&reason);
        if !self.notice_shown {
            self.notice_shown = true;
            self.emit(EngineEvent::Notice {
                message: message.clone(),
            });
            if let Some(id) = self.session.as_ref().map(|s| s.id) {
                self.deliver(id, &message);
            }
        }

        let error = EngineError::CapabilityUnavailable(reason);
        let session = self.session.as_ref().map(|s| s.id);
        self.report(session, error.clone());
        self.finish(SessionOutcome::Failed(error));
        ListenOutcome::Unavailable(message)
    }

    fn fail_recognition(&mut self, code: RecognitionErrorCode) {
        let Some(id) = self.session.as_ref().map(|s| s.id) else {
            return;
        };
        warn!("[assistme:voice] Session {} recognition failed: {}", id, code);
        self.set_state(SessionState::Error);

        let phrase = phrases::recognition_failed(&code);
        let outcome = match code {
            RecognitionErrorCode::Aborted => SessionOutcome::Cancelled,
            code => {
                let error = EngineError::Recognition(code);
                self.report(Some(id), error.clone());
                SessionOutcome::Failed(error)
            }
        };

        self.deliver(id, &phrase);
        self.finish(outcome);
    }

    /// Hand a phrase to the feedback controller and publish it for display
    fn deliver(&mut self, session: SessionId, phrase: &str) {
        let spoken = self.feedback.speak(phrase).is_some();
        self.emit(EngineEvent::Feedback {
            session,
            text: phrase.to_string(),
            spoken,
        });
    }

    fn speak_or_finish(&mut self, outcome: SessionOutcome) {
        if self.feedback.is_idle() {
            self.finish(outcome);
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.pending_outcome = Some(outcome);
        }
        self.set_state(SessionState::Speaking);
    }

    fn settle_speaking(&mut self) {
        if self.state() == SessionState::Speaking && self.feedback.is_idle() {
            let outcome = self
                .session
                .as_mut()
                .and_then(|s| s.pending_outcome.take())
                .unwrap_or(SessionOutcome::Cancelled);
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.state = SessionState::Idle;
        session.ended_at = Some(Utc::now());
        session.pending_outcome = None;
        info!("[assistme:voice] Session {} ended: {:?}", session.id, outcome);

        self.emit(EngineEvent::StateChanged {
            session: session.id,
            state: SessionState::Idle,
        });
        self.emit(EngineEvent::SessionEnded { session, outcome });
    }

    fn report(&mut self, session: Option<SessionId>, error: EngineError) {
        self.last_error = Some(error.clone());
        self.emit(EngineEvent::Error { session, error });
    }

    fn emit(&self, event: EngineEvent) {
        // Receiver lives as long as self
        let _ = self.event_tx.send(event);
    }
}
