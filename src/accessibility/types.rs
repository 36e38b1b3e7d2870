//! Accessibility setting values.

use serde::{Deserialize, Serialize};

/// Text size, ordered smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontScale {
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
}

impl FontScale {
    /// One step larger, clamped at `XLarge`
    pub fn step_up(self) -> Self {
        match self {
            FontScale::Small => FontScale::Medium,
            FontScale::Medium => FontScale::Large,
            FontScale::Large | FontScale::XLarge => FontScale::XLarge,
        }
    }

    /// One step smaller, clamped at `Small`
    pub fn step_down(self) -> Self {
        match self {
            FontScale::XLarge => FontScale::Large,
            FontScale::Large => FontScale::Medium,
            FontScale::Medium | FontScale::Small => FontScale::Small,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontScale::Small => "small",
            FontScale::Medium => "medium",
            FontScale::Large => "large",
            FontScale::XLarge => "xlarge",
        }
    }

    /// Spoken form ("extra large" rather than "xlarge")
    pub fn spoken_name(&self) -> &'static str {
        match self {
            FontScale::XLarge => "extra large",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for FontScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
    De,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Es, Locale::Fr, Locale::De];

    /// Parse a short code ("es") or a language tag ("es-ES"), case-insensitive
    pub fn from_code(code: &str) -> Option<Self> {
        let lower = code.trim().to_lowercase();
        let primary = lower.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            "fr" => Some(Locale::Fr),
            "de" => Some(Locale::De),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }

    /// Language tag requested from the speech services
    pub fn language_tag(&self) -> &'static str {
        match self {
            Locale::En => "en-US",
            Locale::Es => "es-ES",
            Locale::Fr => "fr-FR",
            Locale::De => "de-DE",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Accessibility settings shared by every surface of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub font_scale: FontScale,

    #[serde(default)]
    pub high_contrast: bool,

    /// Gates spoken feedback
    #[serde(default)]
    pub voice_mode_enabled: bool,

    #[serde(default)]
    pub locale: Locale,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            font_scale: FontScale::Medium,
            high_contrast: false,
            voice_mode_enabled: false,
            locale: Locale::En,
        }
    }
}

/// A single applied mutation, as seen by subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SettingsChange {
    FontScale(FontScale),
    HighContrast(bool),
    VoiceMode(bool),
    Locale(Locale),
}
