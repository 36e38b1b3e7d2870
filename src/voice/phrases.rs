//! Spoken feedback phrases.

use crate::accessibility::FontScale;
use crate::domain::{Destination, FontDirection, HealthTopic};
use crate::voice::host::RecognitionErrorCode;

/// Commands suggested when nothing matched
pub const EXAMPLE_COMMANDS: &[&str] = &["go to dashboard", "increase font", "open messages"];

pub fn navigating(destination: Destination) -> String {
    format!("Going to {}", destination.spoken_name())
}

pub fn unknown_destination(target: &str) -> String {
    format!(
        "Sorry, {} is not available. You can go to dashboard, messages, tasks, settings, or request support.",
        target
    )
}

pub fn navigation_failed(destination: Destination) -> String {
    format!("Sorry, I could not open {} right now.", destination.spoken_name())
}

pub fn font_adjusted(direction: FontDirection, scale: FontScale) -> String {
    match direction {
        FontDirection::Increase => format!("Font size increased to {}", scale.spoken_name()),
        FontDirection::Decrease => format!("Font size decreased to {}", scale.spoken_name()),
    }
}

pub fn font_at_limit(direction: FontDirection) -> String {
    match direction {
        FontDirection::Increase => "Font size is already at the largest setting".to_string(),
        FontDirection::Decrease => "Font size is already at the smallest setting".to_string(),
    }
}

pub fn contrast(enabled: bool) -> String {
    if enabled {
        "High contrast on".to_string()
    } else {
        "High contrast off".to_string()
    }
}

pub fn voice_mode(enabled: bool) -> String {
    if enabled {
        "Voice mode on".to_string()
    } else {
        "Voice mode off".to_string()
    }
}

pub fn farewell() -> String {
    "Goodbye. Signing you out now.".to_string()
}

/// Fixed advisory per health topic. No action is ever taken on the user's
/// behalf, emergencies included.
pub fn health_advisory(topic: HealthTopic) -> &'static str {
    match topic {
        HealthTopic::Emergency => {
            "If this is an emergency, please call emergency services immediately at 911 or your local emergency number. I cannot place calls for you."
        }
        HealthTopic::Medication => {
            "You can find your medication schedule in your daily tasks. If your medications change, please tell your caregiver."
        }
        HealthTopic::Mood => {
            "You can log how you are feeling on your dashboard. Your caregiver can see it and check in with you."
        }
        HealthTopic::Appointment => {
            "Your upcoming appointments are on your dashboard. To book a new one, send a message to your caregiver."
        }
    }
}

pub fn opening_assistant() -> String {
    "Opening the assistant".to_string()
}

pub fn assistant_unavailable() -> String {
    "The assistant is not available here.".to_string()
}

/// Echo the transcript and suggest commands
pub fn unrecognized(transcript: &str) -> String {
    let examples = EXAMPLE_COMMANDS
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "I heard \"{}\", but I don't know that command. Try saying {}.",
        transcript, examples
    )
}

/// Recovery phrase after a failed listen
pub fn recognition_failed(code: &RecognitionErrorCode) -> String {
    match code {
        RecognitionErrorCode::NotAllowed | RecognitionErrorCode::AudioCapture => {
            "I cannot use the microphone. Please check the microphone permission and try again."
                .to_string()
        }
        RecognitionErrorCode::NoSpeech | RecognitionErrorCode::Timeout => {
            "I didn't catch that. Please try again.".to_string()
        }
        RecognitionErrorCode::Aborted => "Listening cancelled.".to_string(),
        _ => "Something went wrong while listening. Please try again.".to_string(),
    }
}

pub fn listening_unavailable(reason: &str) -> String {
    format!("Voice commands are not available on this device. {}", reason)
}
