//! Intent classification.
//!
//! Deterministic keyword matching: the transcript is lower-cased and checked
//! against the rule table for the active locale. No stemming, no scoring.

use std::collections::HashMap;

use tracing::debug;

use super::actions::{RuleMatch, RuleTable};
use crate::accessibility::{AccessibilitySettings, Locale};
use crate::domain::Intent;

/// Classifies final transcripts into intents
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    /// Per-locale tables; locales without one use `fallback`
    tables: HashMap<Locale, RuleTable>,
    fallback: RuleTable,
}

impl IntentClassifier {
    /// Classifier using only the given table for every locale
    pub fn new(fallback: RuleTable) -> Self {
        Self {
            tables: HashMap::new(),
            fallback,
        }
    }

    /// Register a table for one locale
    pub fn with_table(mut self, locale: Locale, table: RuleTable) -> Self {
        self.tables.insert(locale, table);
        self
    }

    /// Table used for a locale
    pub fn table_for(&self, locale: Locale) -> &RuleTable {
        self.tables.get(&locale).unwrap_or(&self.fallback)
    }

    /// Classify a transcript. Total: anything that matches no rule is
    /// `Unrecognized` carrying the transcript exactly as heard.
    pub fn classify(&self, transcript: &str, settings: &AccessibilitySettings) -> Intent {
        match self.match_rule(transcript, settings.locale) {
            Some(RuleMatch { rule, intent }) => {
                debug!("[assistme:voice] '{}' matched rule '{}' -> {}", transcript, rule, intent);
                intent
            }
            None => {
                debug!("[assistme:voice] '{}' matched no rule", transcript);
                Intent::Unrecognized(transcript.to_string())
            }
        }
    }

    /// The matching rule, if any
    pub fn match_rule(&self, transcript: &str, locale: Locale) -> Option<RuleMatch> {
        let normalized = normalize(transcript);
        if normalized.is_empty() {
            return None;
        }
        self.table_for(locale).match_text(&normalized)
    }
}

/// Lower-case and trim
pub fn normalize(transcript: &str) -> String {
    transcript.trim().to_lowercase()
}
