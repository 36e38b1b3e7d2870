//! Core domain types for AssistMe voice control

mod intent;
mod route;

pub use intent::{FontDirection, HealthTopic, Intent, IntentKind};
pub use route::Destination;
