//! Acta status and its transition table.
//!
//! | From      | Allowed to                     |
//! |-----------|--------------------------------|
//! | Pendiente | Firmada, Rechazada, Anulada    |
//! | Firmada   | Aprobada, Rechazada, Anulada   |
//! | Aprobada  | Anulada                        |
//! | Rechazada | Pendiente, Anulada             |
//! | Anulada   | (terminal)                     |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use portal_core::AppError;

/// Status of an acta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "acta_status")]
pub enum ActaStatus {
    /// Waiting for the employee's signature.
    Pendiente,
    /// Signed, waiting for IT approval.
    Firmada,
    /// Approved by IT.
    Aprobada,
    /// Rejected; may be sent back to `Pendiente`.
    Rechazada,
    /// Voided. Terminal.
    Anulada,
}

impl ActaStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ActaStatus; 5] = [
        Self::Pendiente,
        Self::Firmada,
        Self::Aprobada,
        Self::Rechazada,
        Self::Anulada,
    ];

    /// Destinations reachable from this status.
    pub const fn allowed_transitions(self) -> &'static [ActaStatus] {
        match self {
            Self::Pendiente => &[Self::Firmada, Self::Rechazada, Self::Anulada],
            Self::Firmada => &[Self::Aprobada, Self::Rechazada, Self::Anulada],
            Self::Aprobada => &[Self::Anulada],
            Self::Rechazada => &[Self::Pendiente, Self::Anulada],
            Self::Anulada => &[],
        }
    }

    /// Whether `next` is a legal destination from this status.
    pub fn can_transition_to(self, next: ActaStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Only `Anulada` is final.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Anulada)
    }

    /// Return the status as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente",
            Self::Firmada => "Firmada",
            Self::Aprobada => "Aprobada",
            Self::Rechazada => "Rechazada",
            Self::Anulada => "Anulada",
        }
    }
}

impl fmt::Display for ActaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActaStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown acta status: '{s}'")))
    }
}

/// String-level transition check. Unknown states on either side fail closed.
pub fn is_valid_transition(current: &str, next: &str) -> bool {
    match (current.parse::<ActaStatus>(), next.parse::<ActaStatus>()) {
        (Ok(current), Ok(next)) => current.can_transition_to(next),
        _ => false,
    }
}

/// String-level final-state check. Unknown states are not final.
pub fn is_final_state(state: &str) -> bool {
    state.parse::<ActaStatus>().is_ok_and(ActaStatus::is_final)
}

/// Allowed destinations for a status name; empty for an unknown one.
pub fn valid_transitions(current: &str) -> Vec<ActaStatus> {
    current
        .parse::<ActaStatus>()
        .map(|status| status.allowed_transitions().to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use ActaStatus::*;

    fn expected(from: ActaStatus) -> HashSet<ActaStatus> {
        let allowed: &[ActaStatus] = match from {
            Pendiente => &[Firmada, Rechazada, Anulada],
            Firmada => &[Aprobada, Rechazada, Anulada],
            Aprobada => &[Anulada],
            Rechazada => &[Pendiente, Anulada],
            Anulada => &[],
        };
        allowed.iter().copied().collect()
    }

    #[test]
    fn test_exhaustive_table() {
        for from in ActaStatus::ALL {
            for to in ActaStatus::ALL {
                assert_eq!(
                    is_valid_transition(from.as_str(), to.as_str()),
                    expected(from).contains(&to),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_unknown_states_fail_closed() {
        assert!(!is_valid_transition("Pendiente", "Bogus"));
        assert!(!is_valid_transition("Bogus", "Firmada"));
        assert!(!is_valid_transition("", ""));
        assert!(!is_valid_transition("pendiente", "firmada"));
    }

    #[test]
    fn test_final_state() {
        assert!(is_final_state("Anulada"));
        for status in [Pendiente, Firmada, Aprobada, Rechazada] {
            assert!(!is_final_state(status.as_str()));
        }
        assert!(!is_final_state("Bogus"));
    }

    #[test]
    fn test_valid_transitions_sets() {
        assert!(valid_transitions("Anulada").is_empty());
        assert!(valid_transitions("Nope").is_empty());

        let from_pending: HashSet<_> = valid_transitions("Pendiente").into_iter().collect();
        assert_eq!(from_pending, HashSet::from([Firmada, Rechazada, Anulada]));
    }

    #[test]
    fn test_only_final_state_has_no_exits() {
        for status in ActaStatus::ALL {
            assert_eq!(status.is_final(), status.allowed_transitions().is_empty());
        }
    }

    #[test]
    fn test_handover_lifecycle() {
        let mut status = Pendiente;

        assert!(status.can_transition_to(Firmada));
        status = Firmada;

        assert!(status.can_transition_to(Aprobada));
        status = Aprobada;

        assert!(!status.can_transition_to(Pendiente));
        assert!(status.can_transition_to(Anulada));
        status = Anulada;

        for next in ActaStatus::ALL {
            assert!(!status.can_transition_to(next));
        }
    }

    #[test]
    fn test_serde_uses_stored_names() {
        assert_eq!(serde_json::to_string(&Rechazada).unwrap(), "\"Rechazada\"");
        assert_eq!("Firmada".parse::<ActaStatus>().unwrap(), Firmada);
    }
}
