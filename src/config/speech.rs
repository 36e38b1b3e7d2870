//! Speech settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Speech service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Speaking rate for feedback (1.0 = host default)
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// Seconds to wait for a final transcript before giving up
    #[serde(default = "default_listen_timeout_secs")]
    pub listen_timeout_secs: u64,

    /// Preferred synthesis voice per locale code, e.g. `en = "Samantha"`
    #[serde(default)]
    pub voices: BTreeMap<String, String>,
}

fn default_rate() -> f32 {
    0.8 // slower than normal speech, easier to follow
}

fn default_listen_timeout_secs() -> u64 {
    15
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            listen_timeout_secs: default_listen_timeout_secs(),
            voices: BTreeMap::new(),
        }
    }
}
