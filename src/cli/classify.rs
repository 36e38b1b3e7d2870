//! Classify command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use assistme::Intent;
use assistme::accessibility::{AccessibilitySettings, Locale};
use assistme::config::Config;

/// JSON shape of `assistme classify --json`
#[derive(Debug, Serialize)]
struct ClassifyReport<'a> {
    transcript: &'a str,
    locale: Locale,
    /// Name of the matching rule, absent for unrecognized input
    rule: Option<String>,
    #[serde(flatten)]
    intent: Intent,
}

/// Classify one utterance against the active rule table
pub fn classify_command(
    config_path: Option<&Path>,
    text: &str,
    locale: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let classifier = config.classifier()?;
    let locale = super::resolve_locale(&config, locale)?;

    let settings = AccessibilitySettings {
        locale,
        ..config.accessibility
    };
    let intent = classifier.classify(text, &settings);
    let rule = classifier.match_rule(text, locale).map(|m| m.rule);

    if json {
        let report = ClassifyReport {
            transcript: text,
            locale,
            rule,
            intent,
        };
        let output =
            serde_json::to_string_pretty(&report).context("Failed to serialize classification")?;
        println!("{}", output);
        return Ok(());
    }

    match rule {
        Some(rule) => println!("{}  (rule: {})", intent, rule),
        None => println!("{}", intent),
    }
    Ok(())
}
