//! Shared test utilities: recording fakes for the host speech services and
//! the app collaborators, plus a harness that wires them into a manager.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use assistme::Destination;
use assistme::accessibility::{AccessibilitySettings, SettingsStore};
use assistme::voice::{
    AssistantSurface, Capability, CollaboratorError, Collaborators, EngineConfig, EngineEvent,
    IntentClassifier, ListenOutcome, LogoutHandler, Navigator, RecognitionRequest, ScreenReader,
    SessionId, SessionManager, SpeechError, SpeechHost, SpeechRecognizer, SpeechSynthesizer,
    StaticCapabilities, Utterance,
};

/// Everything the fakes observed
#[derive(Debug, Default)]
pub struct Recorder {
    pub recognition_requests: Vec<RecognitionRequest>,
    pub aborted: Vec<SessionId>,
    pub spoken: Vec<Utterance>,
    pub synth_cancels: usize,
    pub navigated: Vec<Destination>,
    pub logouts: usize,
    pub assistant_opened: usize,
}

pub type Log = Rc<RefCell<Recorder>>;

pub struct FakeRecognizer {
    log: Log,
    start_error: Option<SpeechError>,
}

impl SpeechRecognizer for FakeRecognizer {
    fn start(&mut self, request: &RecognitionRequest) -> Result<(), SpeechError> {
        if let Some(error) = self.start_error.clone() {
            return Err(error);
        }
        self.log.borrow_mut().recognition_requests.push(request.clone());
        Ok(())
    }

    fn abort(&mut self, session: SessionId) {
        self.log.borrow_mut().aborted.push(session);
    }
}

pub struct FakeSynthesizer(Log);

impl SpeechSynthesizer for FakeSynthesizer {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        self.0.borrow_mut().spoken.push(utterance.clone());
        Ok(())
    }

    fn cancel(&mut self) {
        self.0.borrow_mut().synth_cancels += 1;
    }
}

struct FakeNavigator(Log);

impl Navigator for FakeNavigator {
    fn navigate(&mut self, destination: Destination) -> Result<(), CollaboratorError> {
        self.0.borrow_mut().navigated.push(destination);
        Ok(())
    }
}

struct FakeLogout(Log);

impl LogoutHandler for FakeLogout {
    fn logout(&mut self) {
        self.0.borrow_mut().logouts += 1;
    }
}

struct FakeAssistant {
    log: Log,
    present: bool,
}

impl AssistantSurface for FakeAssistant {
    fn is_available(&self) -> bool {
        self.present
    }

    fn open(&mut self) -> Result<(), CollaboratorError> {
        self.log.borrow_mut().assistant_opened += 1;
        Ok(())
    }
}

struct FakeScreen;

impl ScreenReader for FakeScreen {
    fn visible_text(&self) -> Option<String> {
        Some("Welcome back. You have 2 new messages.".to_string())
    }
}

/// Knobs for building a harness
pub struct HarnessOptions {
    pub settings: AccessibilitySettings,
    pub speech_to_text: Capability,
    pub text_to_speech: Capability,
    pub start_error: Option<SpeechError>,
    pub assistant_present: bool,
    pub classifier: IntentClassifier,
    pub config: EngineConfig,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            settings: AccessibilitySettings::default(),
            speech_to_text: Capability::Available,
            text_to_speech: Capability::Available,
            start_error: None,
            assistant_present: true,
            classifier: IntentClassifier::default(),
            config: EngineConfig::default(),
        }
    }
}

pub struct Harness {
    pub manager: SessionManager,
    pub store: Rc<SettingsStore>,
    pub log: Log,
    /// Spoken utterances already reported finished
    completed: usize,
}

impl Harness {
    /// Default settings (voice mode off)
    pub fn new() -> Self {
        Self::build(HarnessOptions::default())
    }

    /// Voice mode on, so feedback is spoken
    pub fn with_voice() -> Self {
        Self::build(HarnessOptions {
            settings: AccessibilitySettings {
                voice_mode_enabled: true,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    pub fn build(options: HarnessOptions) -> Self {
        let log: Log = Rc::new(RefCell::new(Recorder::default()));
        let store = Rc::new(SettingsStore::with_settings(options.settings));

        let host = SpeechHost {
            recognizer: Box::new(FakeRecognizer {
                log: log.clone(),
                start_error: options.start_error,
            }),
            synthesizer: Box::new(FakeSynthesizer(log.clone())),
            capabilities: Box::new(StaticCapabilities {
                speech_to_text: options.speech_to_text,
                text_to_speech: options.text_to_speech,
            }),
        };
        let collaborators = Collaborators {
            navigator: Box::new(FakeNavigator(log.clone())),
            logout: Box::new(FakeLogout(log.clone())),
            assistant: Box::new(FakeAssistant {
                log: log.clone(),
                present: options.assistant_present,
            }),
            screen_reader: Some(Box::new(FakeScreen)),
        };

        let manager = SessionManager::new(
            store.clone(),
            host,
            collaborators,
            options.classifier,
            options.config,
        );

        Self {
            manager,
            store,
            log,
            completed: 0,
        }
    }

    /// Start listening, expecting success
    pub fn listen(&mut self) -> SessionId {
        match self.manager.start_listening() {
            ListenOutcome::Started(id) => id,
            other => panic!("Expected listening to start, got {:?}", other),
        }
    }

    /// Listen and deliver a final transcript
    pub fn say(&mut self, transcript: &str) -> SessionId {
        let id = self.listen();
        self.manager.on_result(id, transcript);
        id
    }

    /// Report every spoken utterance as finished, including ones queued
    /// behind them
    pub fn finish_speech(&mut self) {
        loop {
            let next = self.log.borrow().spoken.get(self.completed).map(|u| u.id);
            let Some(id) = next else { break };
            self.completed += 1;
            self.manager.on_utterance_end(id);
        }
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.log.borrow().spoken.iter().map(|u| u.text.clone()).collect()
    }

    pub fn events(&mut self) -> Vec<EngineEvent> {
        self.manager.poll_events()
    }

    /// Feedback text published for a session, spoken or not
    pub fn feedback_texts(events: &[EngineEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Feedback { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}
