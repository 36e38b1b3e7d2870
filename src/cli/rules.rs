//! Rules command implementation

use anyhow::Result;
use std::path::Path;

use assistme::config::Config;
use assistme::voice::{IntentRule, SlotExtractor};

/// List the rule table for a locale in the order it is evaluated
pub fn rules_command(config_path: Option<&Path>, locale: Option<&str>) -> Result<()> {
    let config = Config::load(config_path)?;
    let classifier = config.classifier()?;
    let locale = super::resolve_locale(&config, locale)?;
    let table = classifier.table_for(locale);

    println!("Rules for {} ({}):\n", locale.code(), table.len());
    for rule in table.rules() {
        println!(
            "  {:>4}  {:<22} {:<14} {}",
            rule.priority,
            rule.name,
            rule.intent.as_str(),
            describe(rule)
        );
    }

    Ok(())
}

fn describe(rule: &IntentRule) -> String {
    let groups: Vec<String> = rule
        .keywords
        .iter()
        .map(|group| format!("[{}]", group.join(" | ")))
        .collect();
    let mut text = groups.join(" + ");

    match &rule.slot {
        Some(SlotExtractor::Fixed(value)) => text.push_str(&format!(" -> {}", value)),
        Some(SlotExtractor::TextAfter { group }) => {
            text.push_str(&format!(" -> <text after group {}>", group))
        }
        None => {}
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistme::IntentKind;

    #[test]
    fn test_describe_rule() {
        let rule = IntentRule::new("font-increase", 30, IntentKind::AdjustFont)
            .any_of(["increase", "bigger"])
            .any_of(["font", "text"])
            .with_slot(SlotExtractor::fixed("increase"));
        assert_eq!(
            describe(&rule),
            "[increase | bigger] + [font | text] -> increase"
        );

        let rule = IntentRule::new("nav-other", 20, IntentKind::Navigate)
            .any_of(["go to"])
            .with_slot(SlotExtractor::TextAfter { group: 0 });
        assert_eq!(describe(&rule), "[go to] -> <text after group 0>");
    }
}
