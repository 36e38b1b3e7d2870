use serde::{Deserialize, Serialize};

/// A screen the navigation collaborator knows how to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    Dashboard,
    Messages,
    Tasks,
    Settings,
    RequestSupport,
}

impl Destination {
    pub const ALL: [Destination; 5] = [
        Destination::Dashboard,
        Destination::Messages,
        Destination::Tasks,
        Destination::Settings,
        Destination::RequestSupport,
    ];

    /// Parse a destination identifier (supports a few spoken aliases)
    /// - dashboard: dashboard, home
    /// - messages: messages, message, inbox
    /// - tasks: tasks, task, todo, to do
    /// - settings: settings, setting, preferences
    /// - request-support: request-support, request support, support
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "home" => Some(Destination::Dashboard),
            "messages" | "message" | "inbox" => Some(Destination::Messages),
            "tasks" | "task" | "todo" | "to do" => Some(Destination::Tasks),
            "settings" | "setting" | "preferences" => Some(Destination::Settings),
            "request-support" | "request support" | "support" => {
                Some(Destination::RequestSupport)
            }
            _ => None,
        }
    }

    /// The identifier handed to the navigation collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Dashboard => "dashboard",
            Destination::Messages => "messages",
            Destination::Tasks => "tasks",
            Destination::Settings => "settings",
            Destination::RequestSupport => "request-support",
        }
    }

    /// Route path of the screen
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Dashboard => "/dashboard",
            Destination::Messages => "/messages",
            Destination::Tasks => "/tasks",
            Destination::Settings => "/settings",
            Destination::RequestSupport => "/request-support",
        }
    }

    /// Human readable name used in spoken feedback
    pub fn spoken_name(&self) -> &'static str {
        match self {
            Destination::RequestSupport => "request support",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_aliases() {
        assert_eq!(Destination::from_str("Home"), Some(Destination::Dashboard));
        assert_eq!(Destination::from_str(" inbox "), Some(Destination::Messages));
        assert_eq!(
            Destination::from_str("request support"),
            Some(Destination::RequestSupport)
        );
        assert_eq!(Destination::from_str("kitchen"), None);
    }

    #[test]
    fn test_destination_identifiers_round_trip() {
        for destination in Destination::ALL {
            assert_eq!(Destination::from_str(destination.as_str()), Some(destination));
        }
    }
}
