//! Observable settings store.

use std::cell::{Cell, RefCell};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use super::types::{AccessibilitySettings, Locale, SettingsChange};

/// Error type for settings mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Unsupported locale: {0}")]
    InvalidLocale(String),
}

/// Process-wide accessibility settings.
///
/// Owned by the application root and handed to consumers behind an `Rc`.
/// All mutation happens on the UI thread, so interior mutability is enough:
/// every mutator runs to completion before anyone can read again.
pub struct SettingsStore {
    settings: Cell<AccessibilitySettings>,
    subscribers: RefCell<Vec<Sender<SettingsChange>>>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::with_settings(AccessibilitySettings::default())
    }
}

impl SettingsStore {
    /// Create a store with application defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with previously saved settings
    pub fn with_settings(settings: AccessibilitySettings) -> Self {
        Self {
            settings: Cell::new(settings),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Current settings (copied out, never torn)
    pub fn snapshot(&self) -> AccessibilitySettings {
        self.settings.get()
    }

    /// Receive every change applied from now on
    pub fn subscribe(&self) -> Receiver<SettingsChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    pub fn increase_font_scale(&self) {
        let current = self.snapshot();
        let next = current.font_scale.step_up();
        if next != current.font_scale {
            self.apply(SettingsChange::FontScale(next));
        }
    }

    pub fn decrease_font_scale(&self) {
        let current = self.snapshot();
        let next = current.font_scale.step_down();
        if next != current.font_scale {
            self.apply(SettingsChange::FontScale(next));
        }
    }

    pub fn toggle_contrast(&self) {
        let enabled = !self.snapshot().high_contrast;
        self.apply(SettingsChange::HighContrast(enabled));
    }

    pub fn toggle_voice_mode(&self) {
        let enabled = !self.snapshot().voice_mode_enabled;
        self.apply(SettingsChange::VoiceMode(enabled));
    }

    /// Switch language; the code may be a short code or a language tag
    pub fn set_locale(&self, code: &str) -> Result<Locale, SettingsError> {
        let locale =
            Locale::from_code(code).ok_or_else(|| SettingsError::InvalidLocale(code.to_string()))?;
        if locale != self.snapshot().locale {
            self.apply(SettingsChange::Locale(locale));
        }
        Ok(locale)
    }

    fn apply(&self, change: SettingsChange) {
        let mut settings = self.snapshot();
        match change {
            SettingsChange::FontScale(scale) => settings.font_scale = scale,
            SettingsChange::HighContrast(enabled) => settings.high_contrast = enabled,
            SettingsChange::VoiceMode(enabled) => settings.voice_mode_enabled = enabled,
            SettingsChange::Locale(locale) => settings.locale = locale,
        }
        self.settings.set(settings);
        debug!("[assistme:settings] Applied {:?}", change);

        // Dropped receivers are pruned here
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.send(change).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::FontScale;

    #[test]
    fn test_font_scale_is_idempotent_at_boundaries() {
        let store = SettingsStore::new();
        for _ in 0..6 {
            store.increase_font_scale();
        }
        assert_eq!(store.snapshot().font_scale, FontScale::XLarge);

        for _ in 0..6 {
            store.decrease_font_scale();
        }
        assert_eq!(store.snapshot().font_scale, FontScale::Small);
    }

    #[test]
    fn test_clamped_step_emits_nothing() {
        let store = SettingsStore::with_settings(AccessibilitySettings {
            font_scale: FontScale::XLarge,
            ..Default::default()
        });
        let rx = store.subscribe();

        store.increase_font_scale();
        assert!(rx.try_recv().is_err());

        store.decrease_font_scale();
        assert_eq!(rx.try_recv(), Ok(SettingsChange::FontScale(FontScale::Large)));
    }

    #[test]
    fn test_toggles_notify_subscribers() {
        let store = SettingsStore::new();
        let rx = store.subscribe();

        store.toggle_contrast();
        store.toggle_voice_mode();
        store.toggle_contrast();

        let changes: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            changes,
            vec![
                SettingsChange::HighContrast(true),
                SettingsChange::VoiceMode(true),
                SettingsChange::HighContrast(false),
            ]
        );
        assert!(!store.snapshot().high_contrast);
        assert!(store.snapshot().voice_mode_enabled);
    }

    #[test]
    fn test_set_locale_rejects_unknown_codes() {
        let store = SettingsStore::new();
        assert_eq!(
            store.set_locale("klingon"),
            Err(SettingsError::InvalidLocale("klingon".to_string()))
        );
        assert_eq!(store.snapshot().locale, Locale::En);

        assert_eq!(store.set_locale("es-ES"), Ok(Locale::Es));
        assert_eq!(store.snapshot().locale, Locale::Es);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let store = SettingsStore::new();
        let rx = store.subscribe();
        drop(rx);
        store.toggle_contrast();
        assert!(store.subscribers.borrow().is_empty());
    }
}
