//! Spoken feedback queue.
//!
//! The host synthesizer plays one utterance at a time, so phrases are queued
//! FIFO and the next one starts when the host reports completion. Nothing is
//! queued while voice mode is off.

use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::Receiver;

use tracing::{debug, warn};

use super::availability::Capability;
use super::host::{SpeechSynthesizer, Utterance, UtteranceId};
use crate::accessibility::{Locale, SettingsChange, SettingsStore};

/// Fixed synthesis parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackConfig {
    /// Speaking rate (1.0 = host default)
    pub rate: f32,
    /// Preferred host voice per locale
    pub voices: HashMap<Locale, String>,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            rate: 0.8,
            voices: HashMap::new(),
        }
    }
}

/// Queues and plays feedback phrases
pub struct FeedbackController {
    synthesizer: Box<dyn SpeechSynthesizer>,
    capability: Capability,
    config: FeedbackConfig,
    changes: Receiver<SettingsChange>,
    voice_enabled: bool,
    locale: Locale,
    queue: VecDeque<Utterance>,
    current: Option<Utterance>,
    next_id: UtteranceId,
}

impl FeedbackController {
    pub fn new(
        settings: &SettingsStore,
        synthesizer: Box<dyn SpeechSynthesizer>,
        capability: Capability,
        config: FeedbackConfig,
    ) -> Self {
        let snapshot = settings.snapshot();
        Self {
            synthesizer,
            capability,
            config,
            changes: settings.subscribe(),
            voice_enabled: snapshot.voice_mode_enabled,
            locale: snapshot.locale,
            queue: VecDeque::new(),
            current: None,
            next_id: 1,
        }
    }

    /// Queue a phrase. Returns `None` when the phrase was dropped (voice mode
    /// off, no synthesizer, or nothing to say). Never blocks.
    pub fn speak(&mut self, phrase: &str) -> Option<UtteranceId> {
        self.sync_settings();

        let text = phrase.trim();
        if text.is_empty() {
            return None;
        }
        if !self.voice_enabled {
            debug!("[assistme:voice] Voice mode off, not speaking: {}", text);
            return None;
        }
        if let Capability::Unavailable(reason) = &self.capability {
            debug!("[assistme:voice] Speech output unavailable ({}), not speaking", reason);
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.queue.push_back(Utterance {
            id,
            text: text.to_string(),
            rate: self.config.rate,
            locale: self.locale,
            voice: self.config.voices.get(&self.locale).cloned(),
        });
        self.pump();
        Some(id)
    }

    /// Host completion callback. Returns true if `id` was the utterance
    /// being played.
    pub fn on_utterance_end(&mut self, id: UtteranceId) -> bool {
        match &self.current {
            Some(current) if current.id == id => {
                self.current = None;
                self.pump();
                true
            }
            _ => {
                debug!("[assistme:voice] Ignoring completion of stale utterance {}", id);
                false
            }
        }
    }

    /// Stop playback and drop everything queued
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        if self.current.take().is_some() {
            self.synthesizer.cancel();
        }
    }

    /// Nothing playing and nothing queued
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }

    /// Utterances waiting behind the one being played
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// The utterance being played
    pub fn current(&self) -> Option<&Utterance> {
        self.current.as_ref()
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Apply pending settings notifications
    pub fn sync_settings(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            match change {
                SettingsChange::VoiceMode(enabled) => {
                    self.voice_enabled = enabled;
                    if !enabled {
                        self.cancel_all();
                    }
                }
                SettingsChange::Locale(locale) => self.locale = locale,
                SettingsChange::FontScale(_) | SettingsChange::HighContrast(_) => {}
            }
        }
    }

    fn pump(&mut self) {
        while self.current.is_none() {
            let Some(next) = self.queue.pop_front() else {
                return;
            };
            match self.synthesizer.speak(&next) {
                Ok(()) => {
                    debug!("[assistme:voice] Speaking #{}: {}", next.id, next.text);
                    self.current = Some(next);
                }
                Err(e) => warn!("[assistme:voice] Dropping utterance #{}: {}", next.id, e),
            }
        }
    }
}
