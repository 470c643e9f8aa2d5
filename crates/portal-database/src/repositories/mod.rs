//! Repository implementations for all Portal TI entities.

pub mod acta;
pub mod asset;
pub mod assignment;
pub mod audit;
pub mod notification;
pub mod paz_y_salvo;
pub mod ticket;
pub mod user;

pub use acta::{ActaFilter, ActaRepository};
pub use asset::AssetRepository;
pub use assignment::AssignmentRepository;
pub use audit::AuditLogRepository;
pub use notification::NotificationRepository;
pub use paz_y_salvo::{PazYSalvoFilter, PazYSalvoRepository};
pub use ticket::TicketRepository;
pub use user::UserRepository;

use portal_core::error::{AppError, ErrorKind};

/// Outcome of a version-guarded update.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedUpdate<T> {
    /// The row matched the expected version and was written.
    Updated(T),
    /// The row exists but another writer got there first.
    Conflict,
}

impl<T> VersionedUpdate<T> {
    /// Turn a conflict into a 409 error.
    pub fn into_result(self, what: &str) -> Result<T, AppError> {
        match self {
            Self::Updated(value) => Ok(value),
            Self::Conflict => Err(AppError::conflict(format!(
                "{what} was modified by another request; reload and retry"
            ))),
        }
    }
}

/// Map an insert/update error, turning unique violations into conflicts.
pub(crate) fn write_error(e: sqlx::Error, context: &'static str, duplicate: &str) -> AppError {
    let is_unique = e
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if is_unique {
        AppError::with_source(ErrorKind::Conflict, duplicate.to_string(), e)
    } else {
        AppError::with_source(ErrorKind::Database, context, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_update_into_result() {
        assert_eq!(VersionedUpdate::Updated(7).into_result("Paz y salvo").unwrap(), 7);

        let err = VersionedUpdate::<u8>::Conflict
            .into_result("Paz y salvo")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.starts_with("Paz y salvo"));
    }

    #[test]
    fn test_write_error_non_database() {
        let err = write_error(sqlx::Error::RowNotFound, "Failed to create asset", "dup");
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.message, "Failed to create asset");
    }
}
