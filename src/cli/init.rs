//! Init command implementation

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use assistme::config::Config;

/// Default configuration content for assistme init
pub const DEFAULT_CONFIG: &str = r#"# AssistMe Configuration
# ======================

# ============================================================================
# ACCESSIBILITY - Preferences applied at startup
# ============================================================================
#
# Available options:
#   font_scale          - "small", "medium", "large" or "xlarge" (default: "medium")
#   high_contrast       - High contrast theme (default: false)
#   voice_mode_enabled  - Speak command feedback aloud (default: false)
#   locale              - "en", "es", "fr" or "de" (default: "en")

[accessibility]
font_scale = "medium"
high_contrast = false
voice_mode_enabled = false
locale = "en"

# ============================================================================
# SPEECH - Recognition and spoken feedback
# ============================================================================
#
#   rate                - Speaking rate, 1.0 is the platform default (default: 0.8)
#   listen_timeout_secs - Give up listening after this many seconds (default: 15)

[speech]
rate = 0.8
listen_timeout_secs = 15

# Preferred synthesis voice per locale (platform voice names)
[speech.voices]
# en = "Samantha"
# es = "Monica"

# ============================================================================
# RULES - Voice command tables
# ============================================================================
#
# The built-in English table is used unless you define [[rules.en]].
# Other locales fall back to English until they have a table of their own.
#
# A rule matches when every keyword group has at least one phrase in the
# transcript. Rules run in ascending priority; the first match wins.
#
#   intent   - navigate, adjust_font, toggle_contrast, toggle_voice, logout,
#              health_info, open_assistant
#   slot     - { fixed = "<value>" } or { text_after = { group = <n> } }
#              (required for navigate, adjust_font and health_info)
#
# [[rules.es]]
# name = "nav-mensajes"
# priority = 10
# intent = "navigate"
# keywords = [["mensajes", "bandeja"]]
# slot = { fixed = "messages" }
#
# [[rules.es]]
# name = "fuente-mas"
# priority = 30
# intent = "adjust_font"
# keywords = [["aumentar", "agrandar"], ["letra", "texto"]]
# slot = { fixed = "increase" }
"#;

/// Write a commented default config (~/.assistme/config.toml unless --config is given)
pub async fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistme::voice::RuleTable;

    #[test]
    fn test_default_config_is_valid() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.engine_config().is_ok());
        assert_eq!(
            config.classifier().unwrap().table_for(config.accessibility.locale),
            &RuleTable::english()
        );
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init_command(Some(path.clone()), false).await.unwrap();
        assert!(init_command(Some(path.clone()), false).await.is_err());

        std::fs::write(&path, "garbage").unwrap();
        init_command(Some(path.clone()), true).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
