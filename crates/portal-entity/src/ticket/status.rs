//! Ticket status and priority enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status")]
pub enum TicketStatus {
    /// Newly opened.
    Abierto,
    /// A technician is working on it.
    EnProceso,
    /// Fixed, waiting for confirmation.
    Resuelto,
    /// Closed.
    Cerrado,
    /// Withdrawn before resolution.
    Cancelado,
}

impl TicketStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TicketStatus; 5] = [
        Self::Abierto,
        Self::EnProceso,
        Self::Resuelto,
        Self::Cerrado,
        Self::Cancelado,
    ];

    /// Destinations reachable from this status.
    pub const fn allowed_transitions(self) -> &'static [TicketStatus] {
        match self {
            Self::Abierto => &[Self::EnProceso, Self::Cancelado],
            Self::EnProceso => &[Self::Resuelto, Self::Cancelado],
            Self::Resuelto => &[Self::Cerrado, Self::EnProceso],
            Self::Cerrado | Self::Cancelado => &[],
        }
    }

    /// Whether `next` is reachable from this status.
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Whether the ticket still counts as open work.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Abierto | Self::EnProceso)
    }

    /// Return the status as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abierto => "Abierto",
            Self::EnProceso => "EnProceso",
            Self::Resuelto => "Resuelto",
            Self::Cerrado => "Cerrado",
            Self::Cancelado => "Cancelado",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket urgency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "ticket_priority")]
pub enum TicketPriority {
    Baja,
    #[default]
    Media,
    Alta,
    Critica,
}

impl TicketPriority {
    /// Return the priority as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baja => "Baja",
            Self::Media => "Media",
            Self::Alta => "Alta",
            Self::Critica => "Critica",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use TicketStatus::*;
        let allowed = [
            (Abierto, EnProceso),
            (Abierto, Cancelado),
            (EnProceso, Resuelto),
            (EnProceso, Cancelado),
            (Resuelto, Cerrado),
            (Resuelto, EnProceso),
        ];
        for from in TicketStatus::ALL {
            for to in TicketStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_and_open() {
        assert!(TicketStatus::Cerrado.allowed_transitions().is_empty());
        assert!(TicketStatus::Cancelado.allowed_transitions().is_empty());
        assert!(TicketStatus::Abierto.is_open());
        assert!(TicketStatus::EnProceso.is_open());
        assert!(!TicketStatus::Resuelto.is_open());
    }

    #[test]
    fn test_default_priority() {
        assert_eq!(TicketPriority::default(), TicketPriority::Media);
    }
}
