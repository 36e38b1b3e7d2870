use serde::{Deserialize, Serialize};

/// Action family a rule resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Navigate,
    AdjustFont,
    ToggleContrast,
    ToggleVoice,
    Logout,
    HealthInfo,
    OpenAssistant,
    Unrecognized,
}

impl IntentKind {
    /// Whether intents of this family carry a slot
    pub fn requires_slot(&self) -> bool {
        matches!(
            self,
            IntentKind::Navigate | IntentKind::AdjustFont | IntentKind::HealthInfo
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Navigate => "navigate",
            IntentKind::AdjustFont => "adjust_font",
            IntentKind::ToggleContrast => "toggle_contrast",
            IntentKind::ToggleVoice => "toggle_voice",
            IntentKind::Logout => "logout",
            IntentKind::HealthInfo => "health_info",
            IntentKind::OpenAssistant => "open_assistant",
            IntentKind::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a font scale step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontDirection {
    Increase,
    Decrease,
}

impl FontDirection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "increase" | "up" | "bigger" => Some(FontDirection::Increase),
            "decrease" | "down" | "smaller" => Some(FontDirection::Decrease),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontDirection::Increase => "increase",
            FontDirection::Decrease => "decrease",
        }
    }
}

/// Topics answered with a fixed advisory phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTopic {
    Emergency,
    Medication,
    Mood,
    Appointment,
}

impl HealthTopic {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "emergency" => Some(HealthTopic::Emergency),
            "medication" | "medicine" => Some(HealthTopic::Medication),
            "mood" => Some(HealthTopic::Mood),
            "appointment" | "appointments" => Some(HealthTopic::Appointment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTopic::Emergency => "emergency",
            HealthTopic::Medication => "medication",
            HealthTopic::Mood => "mood",
            HealthTopic::Appointment => "appointment",
        }
    }
}

/// The classified meaning of a spoken command
///
/// `Navigate` keeps the spoken destination as text; resolving it against the
/// known routes is the dispatcher's job so unknown places can be reported
/// back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "slot", rename_all = "snake_case")]
pub enum Intent {
    Navigate(String),
    AdjustFont(FontDirection),
    ToggleContrast,
    ToggleVoice,
    Logout,
    HealthInfo(HealthTopic),
    OpenAssistant,
    /// Carries the raw transcript so it can be echoed back
    Unrecognized(String),
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Navigate(_) => IntentKind::Navigate,
            Intent::AdjustFont(_) => IntentKind::AdjustFont,
            Intent::ToggleContrast => IntentKind::ToggleContrast,
            Intent::ToggleVoice => IntentKind::ToggleVoice,
            Intent::Logout => IntentKind::Logout,
            Intent::HealthInfo(_) => IntentKind::HealthInfo,
            Intent::OpenAssistant => IntentKind::OpenAssistant,
            Intent::Unrecognized(_) => IntentKind::Unrecognized,
        }
    }

    /// Build an intent from a rule's tag and its extracted slot.
    ///
    /// Returns `None` when a required slot is missing or does not parse.
    pub fn from_parts(kind: IntentKind, slot: Option<&str>) -> Option<Self> {
        match kind {
            IntentKind::Navigate => slot
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Intent::Navigate(s.to_string())),
            IntentKind::AdjustFont => slot.and_then(FontDirection::from_str).map(Intent::AdjustFont),
            IntentKind::ToggleContrast => Some(Intent::ToggleContrast),
            IntentKind::ToggleVoice => Some(Intent::ToggleVoice),
            IntentKind::Logout => Some(Intent::Logout),
            IntentKind::HealthInfo => slot.and_then(HealthTopic::from_str).map(Intent::HealthInfo),
            IntentKind::OpenAssistant => Some(Intent::OpenAssistant),
            IntentKind::Unrecognized => Some(Intent::Unrecognized(slot.unwrap_or_default().to_string())),
        }
    }

    /// The slot value as text, if this intent carries one
    pub fn slot(&self) -> Option<&str> {
        match self {
            Intent::Navigate(target) => Some(target),
            Intent::AdjustFont(direction) => Some(direction.as_str()),
            Intent::HealthInfo(topic) => Some(topic.as_str()),
            Intent::Unrecognized(transcript) => Some(transcript),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.slot() {
            Some(slot) => write!(f, "{}({})", self.kind(), slot),
            None => write!(f, "{}", self.kind()),
        }
    }
}
