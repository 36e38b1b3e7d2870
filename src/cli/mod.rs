//! CLI command implementations

pub mod classify;
pub mod init;
pub mod rules;
pub mod run;

use anyhow::{Context, Result};

use assistme::accessibility::Locale;
use assistme::config::Config;

/// Resolve a `--locale` override, falling back to the configured locale
fn resolve_locale(config: &Config, locale: Option<&str>) -> Result<Locale> {
    match locale {
        Some(code) => Locale::from_code(code)
            .with_context(|| format!("Unsupported locale: {} (expected en, es, fr or de)", code)),
        None => Ok(config.accessibility.locale),
    }
}
