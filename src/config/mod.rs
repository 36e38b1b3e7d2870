//! Configuration loading and management

mod io;
mod speech;

pub use speech::SpeechSettings;

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::accessibility::{AccessibilitySettings, Locale};
use crate::voice::{EngineConfig, FeedbackConfig, IntentClassifier, IntentRule, RuleTable};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Accessibility settings applied at startup
    #[serde(default)]
    pub accessibility: AccessibilitySettings,

    /// Speech service settings
    #[serde(default)]
    pub speech: SpeechSettings,

    /// Rule tables keyed by locale code. A table for "en" replaces the
    /// built-in one; other locales fall back to English when absent.
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<IntentRule>>,
}

impl Config {
    /// Build the classifier from the configured rule tables
    pub fn classifier(&self) -> Result<IntentClassifier> {
        let mut fallback = RuleTable::english();
        let mut tables = Vec::new();

        for (code, rules) in &self.rules {
            let locale = Locale::from_code(code)
                .with_context(|| format!("Unsupported locale in [rules]: {}", code))?;
            let table = RuleTable::new(rules.clone())
                .with_context(|| format!("Invalid rule table for locale '{}'", code))?;
            if locale == Locale::En {
                fallback = table;
            } else {
                tables.push((locale, table));
            }
        }

        let classifier = tables
            .into_iter()
            .fold(IntentClassifier::new(fallback), |classifier, (locale, table)| {
                classifier.with_table(locale, table)
            });
        Ok(classifier)
    }

    /// Engine tuning derived from the speech settings
    pub fn engine_config(&self) -> Result<EngineConfig> {
        if !(self.speech.rate > 0.0 && self.speech.rate <= 10.0) {
            bail!("speech.rate must be in (0, 10], got {}", self.speech.rate);
        }
        if self.speech.listen_timeout_secs == 0 {
            bail!("speech.listen_timeout_secs must be at least 1");
        }

        let mut voices = HashMap::new();
        for (code, voice) in &self.speech.voices {
            let locale = Locale::from_code(code)
                .with_context(|| format!("Unsupported locale in [speech.voices]: {}", code))?;
            voices.insert(locale, voice.clone());
        }

        Ok(EngineConfig {
            listen_timeout: Duration::from_secs(self.speech.listen_timeout_secs),
            feedback: FeedbackConfig {
                rate: self.speech.rate,
                voices,
            },
        })
    }
}
