//! In-memory acta mutations.
//!
//! Each function checks the transition table first and leaves the acta
//! untouched when the move is not allowed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_entity::acta::{Acta, ActaStatus, SigningMethod};

fn ensure(acta: &Acta, next: ActaStatus) -> Result<(), AppError> {
    if acta.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Acta cannot move from {} to {}",
            acta.status, next
        )))
    }
}

/// Uploaded file attached to a signature.
#[derive(Debug, Clone)]
pub struct SignedFile {
    /// Original file name.
    pub file_name: String,
    /// Storage path.
    pub path: String,
}

/// Check that the acta may be signed, before any file is stored.
pub fn check_can_sign(acta: &Acta) -> Result<(), AppError> {
    ensure(acta, ActaStatus::Firmada)
}

/// Mark the acta signed with the given method.
pub fn mark_signed(
    acta: &mut Acta,
    method: SigningMethod,
    file: Option<SignedFile>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    ensure(acta, ActaStatus::Firmada)?;
    if method.has_file() != file.is_some() {
        return Err(AppError::validation(format!(
            "Signing method {method} does not match the supplied file"
        )));
    }

    acta.status = ActaStatus::Firmada;
    acta.signing_method = Some(method);
    acta.signed_at = Some(now);
    if let Some(file) = file {
        acta.file_name = Some(file.file_name);
        acta.file_path = Some(file.path);
        acta.uploaded_at = Some(now);
    }
    Ok(())
}

/// Approve a signed acta.
pub fn approve(
    acta: &mut Acta,
    approver: Uuid,
    comment: Option<String>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    ensure(acta, ActaStatus::Aprobada)?;
    acta.status = ActaStatus::Aprobada;
    acta.approved_by = Some(approver);
    acta.approved_at = Some(now);
    acta.approval_comment = comment;
    Ok(())
}

/// Reject the acta with observations for the employee.
pub fn reject(acta: &mut Acta, observations: String) -> Result<(), AppError> {
    if observations.trim().is_empty() {
        return Err(AppError::validation("Rejection observations are required"));
    }
    ensure(acta, ActaStatus::Rechazada)?;
    acta.status = ActaStatus::Rechazada;
    acta.observations = Some(observations);
    Ok(())
}

/// Send a rejected acta back to `Pendiente`.
///
/// Returns the path of the previously stored file, if any, so the caller
/// can remove it.
pub fn reopen(acta: &mut Acta) -> Result<Option<String>, AppError> {
    ensure(acta, ActaStatus::Pendiente)?;
    acta.status = ActaStatus::Pendiente;
    acta.signing_method = None;
    acta.file_name = None;
    acta.uploaded_at = None;
    acta.signed_at = None;
    acta.approved_at = None;
    acta.approved_by = None;
    acta.approval_comment = None;
    Ok(acta.file_path.take())
}

/// Void the acta.
pub fn annul(acta: &mut Acta, reason: Option<String>) -> Result<(), AppError> {
    ensure(acta, ActaStatus::Anulada)?;
    acta.status = ActaStatus::Anulada;
    if reason.is_some() {
        acta.observations = reason;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::error::ErrorKind;

    fn pending() -> Acta {
        Acta {
            id: Uuid::new_v4(),
            assignment_id: Uuid::new_v4(),
            status: ActaStatus::Pendiente,
            signing_method: None,
            file_name: None,
            file_path: None,
            observations: None,
            approval_comment: None,
            approved_by: None,
            created_at: Utc::now(),
            uploaded_at: None,
            signed_at: None,
            approved_at: None,
        }
    }

    fn pdf() -> SignedFile {
        SignedFile {
            file_name: "acta.pdf".into(),
            path: "actas/x/acta.pdf".into(),
        }
    }

    #[test]
    fn test_digital_signature() {
        let mut acta = pending();
        mark_signed(&mut acta, SigningMethod::Digital, None, Utc::now()).unwrap();
        assert_eq!(acta.status, ActaStatus::Firmada);
        assert_eq!(acta.signing_method, Some(SigningMethod::Digital));
        assert!(acta.signed_at.is_some());
        assert!(acta.uploaded_at.is_none());
        assert!(!acta.has_file());
    }

    #[test]
    fn test_upload_signature_records_file() {
        let mut acta = pending();
        mark_signed(&mut acta, SigningMethod::PdfSubido, Some(pdf()), Utc::now()).unwrap();
        assert_eq!(acta.file_path.as_deref(), Some("actas/x/acta.pdf"));
        assert!(acta.uploaded_at.is_some());
    }

    #[test]
    fn test_method_and_file_must_agree() {
        let mut acta = pending();
        let err = mark_signed(&mut acta, SigningMethod::AdminSubida, None, Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(acta.status, ActaStatus::Pendiente);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut acta = pending();
        let admin = Uuid::new_v4();
        mark_signed(&mut acta, SigningMethod::Digital, None, Utc::now()).unwrap();
        approve(&mut acta, admin, Some("ok".into()), Utc::now()).unwrap();
        assert_eq!(acta.approved_by, Some(admin));

        let err = reopen(&mut acta).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(acta.status, ActaStatus::Aprobada);

        annul(&mut acta, None).unwrap();
        assert_eq!(acta.status, ActaStatus::Anulada);
        assert!(mark_signed(&mut acta, SigningMethod::Digital, None, Utc::now()).is_err());
        assert!(annul(&mut acta, None).is_err());
    }

    #[test]
    fn test_reject_then_reopen_clears_file() {
        let mut acta = pending();
        mark_signed(&mut acta, SigningMethod::PdfSubido, Some(pdf()), Utc::now()).unwrap();
        reject(&mut acta, "Firma ilegible".into()).unwrap();
        assert_eq!(acta.observations.as_deref(), Some("Firma ilegible"));

        let old = reopen(&mut acta).unwrap();
        assert_eq!(old.as_deref(), Some("actas/x/acta.pdf"));
        assert_eq!(acta.status, ActaStatus::Pendiente);
        assert!(acta.file_path.is_none());
        assert!(acta.signed_at.is_none());
        assert!(acta.signing_method.is_none());
    }

    #[test]
    fn test_reject_needs_observations() {
        let mut acta = pending();
        assert!(reject(&mut acta, "  ".into()).is_err());
        assert_eq!(acta.status, ActaStatus::Pendiente);
    }

    #[test]
    fn test_approve_requires_signature() {
        let mut acta = pending();
        assert!(approve(&mut acta, Uuid::new_v4(), None, Utc::now()).is_err());
        assert!(check_can_sign(&acta).is_ok());
    }
}
