//! Who may move a ticket where.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_entity::ticket::{Ticket, TicketStatus};

/// Check a status change requested by `actor`.
///
/// Staff with ticket work permission may make any move in the table. The
/// requester may cancel an open ticket, close a resolved one, or send it
/// back to work.
pub fn check_status_change(
    ticket: &Ticket,
    actor: Uuid,
    is_worker: bool,
    next: TicketStatus,
) -> Result<(), AppError> {
    if !ticket.status.can_transition_to(next) {
        return Err(AppError::validation(format!(
            "Ticket cannot move from {} to {next}",
            ticket.status
        )));
    }
    if is_worker {
        return Ok(());
    }
    if ticket.requester_id != actor {
        return Err(AppError::authorization("You cannot change this ticket"));
    }
    match (ticket.status, next) {
        (_, TicketStatus::Cancelado)
        | (TicketStatus::Resuelto, TicketStatus::Cerrado)
        | (TicketStatus::Resuelto, TicketStatus::EnProceso) => Ok(()),
        _ => Err(AppError::authorization(
            "Only IT staff can move the ticket to this status",
        )),
    }
}

/// Set the new status and its timestamps.
pub fn apply_status(ticket: &mut Ticket, next: TicketStatus, now: DateTime<Utc>) {
    match next {
        TicketStatus::Resuelto => ticket.resolved_at = Some(now),
        TicketStatus::EnProceso => ticket.resolved_at = None,
        TicketStatus::Cerrado | TicketStatus::Cancelado => ticket.closed_at = Some(now),
        TicketStatus::Abierto => {}
    }
    ticket.status = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::error::ErrorKind;
    use portal_entity::ticket::TicketPriority;

    fn ticket(status: TicketStatus) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            title: "Pantalla rota".into(),
            description: "No enciende".into(),
            requester_id: Uuid::new_v4(),
            asset_id: None,
            assigned_to: None,
            priority: TicketPriority::Alta,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            resolved_at: None,
            closed_at: None,
        }
    }

    #[test]
    fn test_worker_follows_table() {
        let t = ticket(TicketStatus::Abierto);
        let tech = Uuid::new_v4();
        assert!(check_status_change(&t, tech, true, TicketStatus::EnProceso).is_ok());
        let err = check_status_change(&t, tech, true, TicketStatus::Resuelto).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_requester_moves() {
        let open = ticket(TicketStatus::Abierto);
        let me = open.requester_id;
        assert!(check_status_change(&open, me, false, TicketStatus::Cancelado).is_ok());
        assert_eq!(
            check_status_change(&open, me, false, TicketStatus::EnProceso)
                .unwrap_err()
                .kind,
            ErrorKind::Authorization
        );

        let resolved = ticket(TicketStatus::Resuelto);
        let me = resolved.requester_id;
        assert!(check_status_change(&resolved, me, false, TicketStatus::Cerrado).is_ok());
        assert!(check_status_change(&resolved, me, false, TicketStatus::EnProceso).is_ok());
    }

    #[test]
    fn test_stranger_cannot_move() {
        let t = ticket(TicketStatus::Abierto);
        let err = check_status_change(&t, Uuid::new_v4(), false, TicketStatus::Cancelado)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_apply_status_timestamps() {
        let mut t = ticket(TicketStatus::EnProceso);
        let now = Utc::now();
        apply_status(&mut t, TicketStatus::Resuelto, now);
        assert_eq!(t.resolved_at, Some(now));

        apply_status(&mut t, TicketStatus::EnProceso, now);
        assert!(t.resolved_at.is_none());
        assert!(t.closed_at.is_none());

        apply_status(&mut t, TicketStatus::Cancelado, now);
        assert_eq!(t.status, TicketStatus::Cancelado);
        assert_eq!(t.closed_at, Some(now));
    }
}
