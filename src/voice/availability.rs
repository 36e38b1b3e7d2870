//! Host speech capability reporting.

use serde::{Deserialize, Serialize};

/// Whether a host speech service can be used in this session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Capability {
    Available,
    /// Unavailable with a user-facing explanation
    Unavailable(String),
}

impl Capability {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable(reason.into())
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available)
    }

    /// The explanation, if the service is unavailable
    pub fn reason(&self) -> Option<&str> {
        match self {
            Capability::Available => None,
            Capability::Unavailable(reason) => Some(reason),
        }
    }
}

/// Probe for host speech services.
///
/// Capability is a static property of the host for the lifetime of a
/// session; callers may cache the answer.
pub trait CapabilityProvider {
    fn speech_to_text(&self) -> Capability;
    fn text_to_speech(&self) -> Capability;
}

/// Provider with fixed answers (headless hosts, tests)
#[derive(Debug, Clone)]
pub struct StaticCapabilities {
    pub speech_to_text: Capability,
    pub text_to_speech: Capability,
}

impl StaticCapabilities {
    pub fn available() -> Self {
        Self {
            speech_to_text: Capability::Available,
            text_to_speech: Capability::Available,
        }
    }
}

impl CapabilityProvider for StaticCapabilities {
    fn speech_to_text(&self) -> Capability {
        self.speech_to_text.clone()
    }

    fn text_to_speech(&self) -> Capability {
        self.text_to_speech.clone()
    }
}
