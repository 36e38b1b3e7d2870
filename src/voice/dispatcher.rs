//! Action dispatch - executing classified intents
//!
//! Every intent maps to exactly one handler. Handlers act through the
//! settings store or an external collaborator and describe the result in a
//! feedback phrase. Collaborator failures never escape: they degrade to a
//! spoken notice and the intent still counts as handled.

use std::rc::Rc;

use tracing::{info, warn};

use super::phrases;
use crate::accessibility::SettingsStore;
use crate::domain::{Destination, FontDirection, HealthTopic, Intent};

/// Failure reported by an external collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

/// Reasons an intent could not fully complete
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown destination: {0}")]
    UnknownDestination(String),

    #[error("Navigation to {destination} failed: {source}")]
    NavigationFailed {
        destination: Destination,
        source: CollaboratorError,
    },

    #[error("Assistant is not available on this screen")]
    AssistantUnavailable,

    #[error("Assistant failed to open: {0}")]
    AssistantFailed(CollaboratorError),
}

/// Navigation collaborator (the router)
pub trait Navigator {
    fn navigate(&mut self, destination: Destination) -> Result<(), CollaboratorError>;
}

/// Logout collaborator, fire-and-forget
pub trait LogoutHandler {
    fn logout(&mut self);
}

/// Chat-assistant surface
pub trait AssistantSurface {
    /// Presence probe for the current screen
    fn is_available(&self) -> bool;
    fn open(&mut self) -> Result<(), CollaboratorError>;
}

/// Reads the visible page content aloud when voice mode is switched on
pub trait ScreenReader {
    fn visible_text(&self) -> Option<String>;
}

/// External collaborators the dispatcher acts through
pub struct Collaborators {
    pub navigator: Box<dyn Navigator>,
    pub logout: Box<dyn LogoutHandler>,
    pub assistant: Box<dyn AssistantSurface>,
    pub screen_reader: Option<Box<dyn ScreenReader>>,
}

/// How a dispatched intent ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    /// Handled with a spoken fallback instead of the requested action
    Degraded(DispatchError),
}

/// Result of dispatching one intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub feedback: Option<String>,
    /// Spoken after `feedback` (page read-aloud)
    pub follow_up: Option<String>,
    pub outcome: DispatchOutcome,
}

impl DispatchResult {
    fn handled(feedback: impl Into<String>) -> Self {
        Self {
            feedback: Some(feedback.into()),
            follow_up: None,
            outcome: DispatchOutcome::Handled,
        }
    }

    fn degraded(feedback: impl Into<String>, error: DispatchError) -> Self {
        warn!("[assistme:voice] Degraded dispatch: {}", error);
        Self {
            feedback: Some(feedback.into()),
            follow_up: None,
            outcome: DispatchOutcome::Degraded(error),
        }
    }

    /// Feedback phrases in speaking order
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.feedback.iter().chain(self.follow_up.iter()).map(String::as_str)
    }
}

/// Maps intents to side effects
pub struct ActionDispatcher {
    settings: Rc<SettingsStore>,
    collaborators: Collaborators,
}

impl ActionDispatcher {
    pub fn new(settings: Rc<SettingsStore>, collaborators: Collaborators) -> Self {
        Self {
            settings,
            collaborators,
        }
    }

    /// Execute an intent. Never fails; problems come back as `Degraded`.
    pub fn dispatch(&mut self, intent: &Intent) -> DispatchResult {
        info!("[assistme:voice] Dispatching {}", intent);
        match intent {
            Intent::Navigate(target) => self.navigate(target),
            Intent::AdjustFont(direction) => self.adjust_font(*direction),
            Intent::ToggleContrast => {
                self.settings.toggle_contrast();
                DispatchResult::handled(phrases::contrast(self.settings.snapshot().high_contrast))
            }
            Intent::ToggleVoice => self.toggle_voice(),
            Intent::Logout => {
                self.collaborators.logout.logout();
                DispatchResult::handled(phrases::farewell())
            }
            Intent::HealthInfo(topic) => Self::health_info(*topic),
            Intent::OpenAssistant => self.open_assistant(),
            Intent::Unrecognized(transcript) => {
                DispatchResult::handled(phrases::unrecognized(transcript))
            }
        }
    }

    fn navigate(&mut self, target: &str) -> DispatchResult {
        let Some(destination) = Destination::from_str(target) else {
            return DispatchResult::degraded(
                phrases::unknown_destination(target),
                DispatchError::UnknownDestination(target.to_string()),
            );
        };

        match self.collaborators.navigator.navigate(destination) {
            Ok(()) => DispatchResult::handled(phrases::navigating(destination)),
            Err(source) => DispatchResult::degraded(
                phrases::navigation_failed(destination),
                DispatchError::NavigationFailed {
                    destination,
                    source,
                },
            ),
        }
    }

    fn adjust_font(&mut self, direction: FontDirection) -> DispatchResult {
        let before = self.settings.snapshot().font_scale;
        match direction {
            FontDirection::Increase => self.settings.increase_font_scale(),
            FontDirection::Decrease => self.settings.decrease_font_scale(),
        }
        let after = self.settings.snapshot().font_scale;

        if before == after {
            DispatchResult::handled(phrases::font_at_limit(direction))
        } else {
            DispatchResult::handled(phrases::font_adjusted(direction, after))
        }
    }

    fn toggle_voice(&mut self) -> DispatchResult {
        self.settings.toggle_voice_mode();
        let enabled = self.settings.snapshot().voice_mode_enabled;

        let mut result = DispatchResult::handled(phrases::voice_mode(enabled));
        if enabled {
            result.follow_up = self
                .collaborators
                .screen_reader
                .as_ref()
                .and_then(|reader| reader.visible_text())
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty());
        }
        result
    }

    fn health_info(topic: HealthTopic) -> DispatchResult {
        DispatchResult::handled(phrases::health_advisory(topic))
    }

    fn open_assistant(&mut self) -> DispatchResult {
        if !self.collaborators.assistant.is_available() {
            return DispatchResult::degraded(
                phrases::assistant_unavailable(),
                DispatchError::AssistantUnavailable,
            );
        }
        match self.collaborators.assistant.open() {
            Ok(()) => DispatchResult::handled(phrases::opening_assistant()),
            Err(e) => DispatchResult::degraded(
                phrases::assistant_unavailable(),
                DispatchError::AssistantFailed(e),
            ),
        }
    }
}
