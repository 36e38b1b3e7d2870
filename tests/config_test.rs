//! Configuration file tests: load from disk and drive an engine with it.

mod common;

use std::time::Duration;

use tempfile::TempDir;

use assistme::accessibility::{FontScale, Locale};
use assistme::config::Config;
use assistme::voice::SessionState;
use assistme::{Destination, Intent};
use common::{Harness, HarnessOptions};

const SPANISH_CONFIG: &str = r#"
[accessibility]
font_scale = "large"
voice_mode_enabled = true
locale = "es"

[speech]
rate = 0.9
listen_timeout_secs = 10

[speech.voices]
es = "Monica"

[[rules.es]]
name = "nav-mensajes"
priority = 10
intent = "navigate"
keywords = [["mensajes", "bandeja"]]
slot = { fixed = "messages" }

[[rules.es]]
name = "fuente-mas"
priority = 30
intent = "adjust_font"
keywords = [["aumentar", "agrandar"], ["letra", "texto"]]
slot = { fixed = "increase" }

[[rules.es]]
name = "ir-a"
priority = 20
intent = "navigate"
keywords = [["ir a", "llévame a"]]
slot = { text_after = { group = 0 } }
"#;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_engine_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, SPANISH_CONFIG);

    let config = Config::load(Some(&path)).unwrap();
    let engine_config = config.engine_config().unwrap();
    assert_eq!(engine_config.listen_timeout, Duration::from_secs(10));

    let mut h = Harness::build(HarnessOptions {
        settings: config.accessibility,
        classifier: config.classifier().unwrap(),
        config: engine_config,
        ..Default::default()
    });

    h.say("abre la bandeja");
    assert_eq!(h.log.borrow().navigated, vec![Destination::Messages]);
    {
        let log = h.log.borrow();
        assert_eq!(log.recognition_requests[0].language, "es-ES");
        assert_eq!(log.spoken[0].voice.as_deref(), Some("Monica"));
        assert_eq!(log.spoken[0].rate, 0.9);
    }
    h.finish_speech();
    assert_eq!(h.manager.state(), SessionState::Idle);

    h.say("aumentar el texto");
    assert_eq!(h.store.snapshot().font_scale, FontScale::XLarge);
}

#[test]
fn test_rule_order_follows_priority_not_file_order() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, SPANISH_CONFIG);
    let classifier = Config::load(Some(&path)).unwrap().classifier().unwrap();

    let names: Vec<&str> = classifier
        .table_for(Locale::Es)
        .rules()
        .iter()
        .map(|rule| rule.name.as_str())
        .collect();
    assert_eq!(names, vec!["nav-mensajes", "ir-a", "fuente-mas"]);

    let matched = classifier.match_rule("Llévame a la cocina", Locale::Es).unwrap();
    assert_eq!(matched.rule, "ir-a");
    assert_eq!(matched.intent, Intent::Navigate("la cocina".to_string()));
}

#[test]
fn test_invalid_rule_table_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
        [[rules.en]]
        name = "empty"
        priority = 1
        intent = "logout"
        keywords = [[]]
        "#,
    );

    let config = Config::load(Some(&path)).unwrap();
    let err = config.classifier().unwrap_err();
    assert!(format!("{:#}", err).contains("empty keyword group"));
}

#[test]
fn test_save_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, SPANISH_CONFIG);
    let config = Config::load(Some(&path)).unwrap();

    let copy = dir.path().join("copy.toml");
    config.save_to_file(&copy).unwrap();
    assert_eq!(Config::from_file(&copy).unwrap(), config);
}
