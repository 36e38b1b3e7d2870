//! Intent rules - mapping spoken phrases to intents
//!
//! A rule matches when every keyword group is satisfied: at least one phrase
//! of each group must appear in the (lower-cased) transcript. Rules are tried
//! in ascending priority; the first match wins.
//!
//! Example configuration:
//! ```toml
//! [[rules.en]]
//! name = "nav-messages"
//! priority = 11
//! intent = "navigate"
//! keywords = [["messages", "inbox"]]
//! slot = { fixed = "messages" }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{Intent, IntentKind};

/// How a rule derives its slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotExtractor {
    /// Always the same value (e.g. a canonical destination)
    Fixed(String),
    /// The text following the earliest matched phrase of a keyword group
    TextAfter { group: usize },
}

impl SlotExtractor {
    pub fn fixed(value: impl Into<String>) -> Self {
        SlotExtractor::Fixed(value.into())
    }
}

/// Error type for rule table validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Rule '{0}' has no keyword groups")]
    NoKeywords(String),

    #[error("Rule '{rule}' has an empty keyword group at index {group}")]
    EmptyGroup { rule: String, group: usize },

    #[error("Rule '{rule}' needs a slot for intent {intent}")]
    MissingSlot { rule: String, intent: IntentKind },

    #[error("Rule '{rule}' has invalid slot value '{value}' for intent {intent}")]
    InvalidSlot {
        rule: String,
        intent: IntentKind,
        value: String,
    },

    #[error("Rule '{rule}' extracts text after group {group}, which does not exist")]
    SlotGroupOutOfRange { rule: String, group: usize },

    #[error("Rule '{rule}' extracts free text, which only navigation accepts")]
    FreeTextSlot { rule: String },

    #[error("Rule '{0}' targets the fallback intent, which is never matched by rules")]
    FallbackRule(String),
}

/// A single entry of the intent rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    /// Identifier used in logs and listings
    pub name: String,

    /// Lower runs first
    pub priority: u32,

    pub intent: IntentKind,

    /// AND across groups, OR within a group
    pub keywords: Vec<Vec<String>>,

    #[serde(default)]
    pub slot: Option<SlotExtractor>,
}

/// Result of a rule match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Name of the rule that matched
    pub rule: String,
    pub intent: Intent,
}

impl IntentRule {
    /// Create a rule with no keyword groups yet
    pub fn new(name: impl Into<String>, priority: u32, intent: IntentKind) -> Self {
        Self {
            name: name.into(),
            priority,
            intent,
            keywords: Vec::new(),
            slot: None,
        }
    }

    /// Add a keyword group; any one of its phrases satisfies it
    pub fn any_of<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords
            .push(phrases.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_slot(mut self, slot: SlotExtractor) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Lower-case and trim every phrase, dropping blanks
    fn normalized(mut self) -> Self {
        for group in &mut self.keywords {
            *group = group
                .iter()
                .map(|phrase| phrase.trim().to_lowercase())
                .filter(|phrase| !phrase.is_empty())
                .collect();
        }
        self
    }

    fn validate(&self) -> Result<(), RuleError> {
        if self.intent == IntentKind::Unrecognized {
            return Err(RuleError::FallbackRule(self.name.clone()));
        }
        if self.keywords.is_empty() {
            return Err(RuleError::NoKeywords(self.name.clone()));
        }
        if let Some(group) = self.keywords.iter().position(|g| g.is_empty()) {
            return Err(RuleError::EmptyGroup {
                rule: self.name.clone(),
                group,
            });
        }

        match &self.slot {
            None if self.intent.requires_slot() => Err(RuleError::MissingSlot {
                rule: self.name.clone(),
                intent: self.intent,
            }),
            Some(SlotExtractor::Fixed(value)) => {
                if Intent::from_parts(self.intent, Some(value.as_str())).is_none() {
                    return Err(RuleError::InvalidSlot {
                        rule: self.name.clone(),
                        intent: self.intent,
                        value: value.clone(),
                    });
                }
                Ok(())
            }
            Some(SlotExtractor::TextAfter { group }) => {
                if self.intent != IntentKind::Navigate {
                    return Err(RuleError::FreeTextSlot {
                        rule: self.name.clone(),
                    });
                }
                if *group >= self.keywords.len() {
                    return Err(RuleError::SlotGroupOutOfRange {
                        rule: self.name.clone(),
                        group: *group,
                    });
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Check a normalized (lower-cased) transcript against this rule
    pub fn matches(&self, normalized: &str) -> Option<RuleMatch> {
        let mut hits = Vec::with_capacity(self.keywords.len());
        for group in &self.keywords {
            hits.push(earliest_hit(normalized, group)?);
        }

        let slot = match &self.slot {
            None => None,
            Some(SlotExtractor::Fixed(value)) => Some(value.clone()),
            Some(SlotExtractor::TextAfter { group }) => {
                let (pos, phrase) = hits.get(*group)?;
                let rest = clean_free_text(&normalized[pos + phrase.len()..]);
                if rest.is_empty() {
                    return None;
                }
                Some(rest)
            }
        };

        Intent::from_parts(self.intent, slot.as_deref()).map(|intent| RuleMatch {
            rule: self.name.clone(),
            intent,
        })
    }
}

/// Position and phrase of the earliest occurrence of any phrase in the group.
/// On a tie the longer phrase wins.
fn earliest_hit<'a>(text: &str, group: &'a [String]) -> Option<(usize, &'a str)> {
    group
        .iter()
        .filter_map(|phrase| text.find(phrase.as_str()).map(|pos| (pos, phrase.as_str())))
        .min_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())))
}

const FILLER_WORDS: &[&str] = &["the", "my", "a", "an"];

fn clean_free_text(text: &str) -> String {
    let trimmed = text.trim().trim_end_matches(['.', '!', '?', ',']);
    let mut words: Vec<&str> = trimmed.split_whitespace().collect();
    while words.first().is_some_and(|w| FILLER_WORDS.contains(w)) {
        words.remove(0);
    }
    if words.last().is_some_and(|w| matches!(*w, "page" | "screen")) && words.len() > 1 {
        words.pop();
    }
    words.join(" ")
}

/// An ordered, validated rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<IntentRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::english()
    }
}

impl RuleTable {
    /// Validate and order rules. Equal priorities keep their given order.
    pub fn new(rules: Vec<IntentRule>) -> Result<Self, RuleError> {
        let mut rules: Vec<IntentRule> = rules.into_iter().map(IntentRule::normalized).collect();
        for rule in &rules {
            rule.validate()?;
        }
        rules.sort_by_key(|rule| rule.priority);
        Ok(Self { rules })
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First matching rule for an already normalized transcript
    pub fn match_text(&self, normalized: &str) -> Option<RuleMatch> {
        self.rules.iter().find_map(|rule| rule.matches(normalized))
    }

    /// Built-in English table
    pub fn english() -> Self {
        let table = Self::new(default_english_rules());
        debug_assert!(table.is_ok(), "built-in rule table is invalid: {:?}", table.as_ref().err());
        table.unwrap_or_else(|_| Self { rules: Vec::new() })
    }
}

const FONT_WORDS: [&str; 5] = ["font", "text", "letters", "writing", "size"];

/// Default English rules. Navigation comes first so that "open messages"
/// is never captured by the broader assistant rule.
pub fn default_english_rules() -> Vec<IntentRule> {
    use IntentKind::*;

    vec![
        IntentRule::new("nav-dashboard", 10, Navigate)
            .any_of(["dashboard", "go home"])
            .with_slot(SlotExtractor::fixed("dashboard")),
        IntentRule::new("nav-messages", 11, Navigate)
            .any_of(["messages", "message", "inbox"])
            .with_slot(SlotExtractor::fixed("messages")),
        IntentRule::new("nav-tasks", 12, Navigate)
            .any_of(["tasks", "task", "to do list", "todo"])
            .with_slot(SlotExtractor::fixed("tasks")),
        IntentRule::new("nav-settings", 13, Navigate)
            .any_of(["settings", "preferences"])
            .with_slot(SlotExtractor::fixed("settings")),
        IntentRule::new("nav-request-support", 14, Navigate)
            .any_of(["request support"])
            .with_slot(SlotExtractor::fixed("request-support")),
        IntentRule::new("nav-other", 20, Navigate)
            .any_of(["go to", "navigate to", "take me to"])
            .with_slot(SlotExtractor::TextAfter { group: 0 }),
        IntentRule::new("font-increase", 30, AdjustFont)
            .any_of(["increase", "bigger", "larger", "enlarge", "raise"])
            .any_of(FONT_WORDS)
            .with_slot(SlotExtractor::fixed("increase")),
        IntentRule::new("font-zoom-in", 31, AdjustFont)
            .any_of(["zoom in"])
            .with_slot(SlotExtractor::fixed("increase")),
        IntentRule::new("font-decrease", 32, AdjustFont)
            .any_of(["decrease", "smaller", "reduce", "shrink", "lower"])
            .any_of(FONT_WORDS)
            .with_slot(SlotExtractor::fixed("decrease")),
        IntentRule::new("font-zoom-out", 33, AdjustFont)
            .any_of(["zoom out"])
            .with_slot(SlotExtractor::fixed("decrease")),
        IntentRule::new("contrast", 40, ToggleContrast).any_of(["contrast"]),
        IntentRule::new("voice", 50, ToggleVoice).any_of(["voice", "read aloud", "read out loud"]),
        IntentRule::new("logout", 60, Logout)
            .any_of(["log out", "logout", "sign out", "sign off", "log off"]),
        IntentRule::new("health-emergency", 70, HealthInfo)
            .any_of(["emergency", "ambulance", "call for help"])
            .with_slot(SlotExtractor::fixed("emergency")),
        IntentRule::new("health-help-now", 71, HealthInfo)
            .any_of(["help"])
            .any_of(["help now", "help me now", "right now", "urgent", "immediately"])
            .with_slot(SlotExtractor::fixed("emergency")),
        IntentRule::new("health-medication", 72, HealthInfo)
            .any_of(["medication", "medicine", "pills", "pill", "tablets"])
            .with_slot(SlotExtractor::fixed("medication")),
        IntentRule::new("health-mood", 73, HealthInfo)
            .any_of(["mood", "feeling", "i feel"])
            .with_slot(SlotExtractor::fixed("mood")),
        IntentRule::new("health-appointment", 74, HealthInfo)
            .any_of(["appointment", "schedule"])
            .with_slot(SlotExtractor::fixed("appointment")),
        IntentRule::new("assistant", 80, OpenAssistant)
            .any_of(["assistant", "chatbot", "chat bot", "chat", "help"]),
    ]
}
