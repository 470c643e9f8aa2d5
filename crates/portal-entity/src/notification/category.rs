//! Notification category enumeration.

use serde::{Deserialize, Serialize};

/// Category of a notification, used for filtering in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// Asset handed over or returned.
    Assignment,
    /// Acta signed, approved, rejected...
    Acta,
    /// Clearance workflow steps.
    PazYSalvo,
    /// Ticket status changes and chat.
    Ticket,
    /// System-level notices.
    System,
}

impl NotificationCategory {
    /// Return the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Acta => "acta",
            Self::PazYSalvo => "paz_y_salvo",
            Self::Ticket => "ticket",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
