//! Unit tests for the action dispatcher.

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::accessibility::{AccessibilitySettings, FontScale, SettingsStore};
use crate::domain::{Destination, FontDirection, HealthTopic, Intent};

#[derive(Default)]
struct Calls {
    navigated: Vec<Destination>,
    logouts: usize,
    assistant_opened: usize,
}

struct FakeNavigator {
    calls: Rc<RefCell<Calls>>,
    broken: bool,
}

impl Navigator for FakeNavigator {
    fn navigate(&mut self, destination: Destination) -> Result<(), CollaboratorError> {
        if self.broken {
            return Err(CollaboratorError("router not mounted".to_string()));
        }
        self.calls.borrow_mut().navigated.push(destination);
        Ok(())
    }
}

struct FakeLogout(Rc<RefCell<Calls>>);

impl LogoutHandler for FakeLogout {
    fn logout(&mut self) {
        self.0.borrow_mut().logouts += 1;
    }
}

struct FakeAssistant {
    calls: Rc<RefCell<Calls>>,
    present: bool,
}

impl AssistantSurface for FakeAssistant {
    fn is_available(&self) -> bool {
        self.present
    }

    fn open(&mut self) -> Result<(), CollaboratorError> {
        self.calls.borrow_mut().assistant_opened += 1;
        Ok(())
    }
}

struct FakeScreen(&'static str);

impl ScreenReader for FakeScreen {
    fn visible_text(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

struct Fixture {
    store: Rc<SettingsStore>,
    calls: Rc<RefCell<Calls>>,
    dispatcher: ActionDispatcher,
}

fn fixture(settings: AccessibilitySettings, assistant_present: bool, broken_router: bool) -> Fixture {
    let store = Rc::new(SettingsStore::with_settings(settings));
    let calls = Rc::new(RefCell::new(Calls::default()));
    let dispatcher = ActionDispatcher::new(
        store.clone(),
        Collaborators {
            navigator: Box::new(FakeNavigator {
                calls: calls.clone(),
                broken: broken_router,
            }),
            logout: Box::new(FakeLogout(calls.clone())),
            assistant: Box::new(FakeAssistant {
                calls: calls.clone(),
                present: assistant_present,
            }),
            screen_reader: Some(Box::new(FakeScreen("Good morning. You have 3 tasks today."))),
        },
    );
    Fixture {
        store,
        calls,
        dispatcher,
    }
}

fn default_fixture() -> Fixture {
    fixture(AccessibilitySettings::default(), true, false)
}

#[test]
fn test_navigate_known_destination() {
    let mut f = default_fixture();
    let result = f.dispatcher.dispatch(&Intent::Navigate("dashboard".to_string()));

    assert_eq!(result.feedback.as_deref(), Some("Going to dashboard"));
    assert_eq!(result.outcome, DispatchOutcome::Handled);
    assert_eq!(f.calls.borrow().navigated, vec![Destination::Dashboard]);
}

#[test]
fn test_navigate_unknown_destination_degrades() {
    let mut f = default_fixture();
    let result = f.dispatcher.dispatch(&Intent::Navigate("kitchen".to_string()));

    assert_eq!(
        result.outcome,
        DispatchOutcome::Degraded(DispatchError::UnknownDestination("kitchen".to_string()))
    );
    assert!(result.feedback.unwrap().contains("kitchen is not available"));
    // Rejected locally, never sent to the router
    assert!(f.calls.borrow().navigated.is_empty());
}

#[test]
fn test_navigation_failure_degrades() {
    let mut f = fixture(AccessibilitySettings::default(), true, true);
    let result = f.dispatcher.dispatch(&Intent::Navigate("tasks".to_string()));

    assert!(matches!(
        result.outcome,
        DispatchOutcome::Degraded(DispatchError::NavigationFailed {
            destination: Destination::Tasks,
            ..
        })
    ));
    assert!(result.feedback.is_some());
}

#[test]
fn test_adjust_font_steps_and_clamps() {
    let mut f = default_fixture();
    let result = f.dispatcher.dispatch(&Intent::AdjustFont(FontDirection::Increase));
    assert_eq!(f.store.snapshot().font_scale, FontScale::Large);
    assert_eq!(result.feedback.as_deref(), Some("Font size increased to large"));

    f.dispatcher.dispatch(&Intent::AdjustFont(FontDirection::Increase));
    let result = f.dispatcher.dispatch(&Intent::AdjustFont(FontDirection::Increase));
    assert_eq!(f.store.snapshot().font_scale, FontScale::XLarge);
    assert_eq!(result.outcome, DispatchOutcome::Handled);
    assert_eq!(
        result.feedback.as_deref(),
        Some("Font size is already at the largest setting")
    );
}

#[test]
fn test_toggles_mutate_store() {
    let mut f = default_fixture();
    let result = f.dispatcher.dispatch(&Intent::ToggleContrast);
    assert!(f.store.snapshot().high_contrast);
    assert_eq!(result.feedback.as_deref(), Some("High contrast on"));

    let result = f.dispatcher.dispatch(&Intent::ToggleVoice);
    assert!(f.store.snapshot().voice_mode_enabled);
    assert_eq!(result.feedback.as_deref(), Some("Voice mode on"));
    assert_eq!(
        result.follow_up.as_deref(),
        Some("Good morning. You have 3 tasks today.")
    );

    let result = f.dispatcher.dispatch(&Intent::ToggleVoice);
    assert!(!f.store.snapshot().voice_mode_enabled);
    assert_eq!(result.follow_up, None);
}

#[test]
fn test_logout_speaks_farewell() {
    let mut f = default_fixture();
    let result = f.dispatcher.dispatch(&Intent::Logout);
    assert_eq!(f.calls.borrow().logouts, 1);
    assert!(result.feedback.unwrap().starts_with("Goodbye"));
}

#[test]
fn test_health_info_has_no_side_effects() {
    let mut f = default_fixture();
    let before = f.store.snapshot();
    let result = f.dispatcher.dispatch(&Intent::HealthInfo(HealthTopic::Emergency));

    assert_eq!(f.store.snapshot(), before);
    assert!(f.calls.borrow().navigated.is_empty());
    assert_eq!(
        result.feedback.as_deref(),
        Some(phrases::health_advisory(HealthTopic::Emergency))
    );
}

#[test]
fn test_assistant_probe() {
    let mut f = default_fixture();
    let result = f.dispatcher.dispatch(&Intent::OpenAssistant);
    assert_eq!(result.outcome, DispatchOutcome::Handled);
    assert_eq!(f.calls.borrow().assistant_opened, 1);

    let mut f = fixture(AccessibilitySettings::default(), false, false);
    let result = f.dispatcher.dispatch(&Intent::OpenAssistant);
    assert_eq!(
        result.outcome,
        DispatchOutcome::Degraded(DispatchError::AssistantUnavailable)
    );
    assert_eq!(result.feedback.as_deref(), Some("The assistant is not available here."));
    assert_eq!(f.calls.borrow().assistant_opened, 0);
}

#[test]
fn test_unrecognized_echoes_transcript() {
    let mut f = default_fixture();
    let result = f.dispatcher.dispatch(&Intent::Unrecognized("xyz nonsense".to_string()));
    assert!(result.feedback.unwrap().contains("\"xyz nonsense\""));
}

#[test]
fn test_phrases_order() {
    let mut f = default_fixture();
    let result = f.dispatcher.dispatch(&Intent::ToggleVoice);
    let phrases: Vec<&str> = result.phrases().collect();
    assert_eq!(phrases, vec!["Voice mode on", "Good morning. You have 3 tasks today."]);
}

#[test]
fn test_session_state_display() {
    assert_eq!(SessionState::Listening.to_string(), "Listening");
    assert_eq!(SessionState::Speaking.to_string(), "Speaking");
    assert!(!SessionState::Idle.is_active());
}
