//! Clearance workflow rules applied to an in-memory document.
//!
//! Every function validates the current status, mutates the document and
//! appends one history record per status step. Nothing here touches the
//! database; the service persists the result with a version check.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_entity::assignment::{AssignmentState, AssignmentView};
use portal_entity::paz_y_salvo::signing::{
    all_mandatory_signed, default_chain, final_hash, is_turn_of, next_pending, signature_hash,
    unassigned_mandatory,
};
use portal_entity::paz_y_salvo::{
    AssetSnapshotRecord, AttachmentRecord, ExceptionRecord, HistoryRecord, PazYSalvo,
    PazYSalvoStatus, SignatureRecord, SignatureRole, SignatureState, SnapshotState,
};

/// Signer requested for one step of the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerAssignment {
    /// Chain step.
    pub role: SignatureRole,
    /// Who signs it.
    pub signer_id: Option<Uuid>,
    /// Whether approval waits for this step. Defaults to `true`.
    #[serde(default)]
    pub mandatory: Option<bool>,
}

/// Who is acting on the document.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    /// User id.
    pub id: Uuid,
    /// Administrators may sign on behalf of any step.
    pub is_admin: bool,
}

/// Result of a successful signature.
#[derive(Debug, Clone, PartialEq)]
pub struct SignOutcome {
    /// The last mandatory signature was collected.
    pub approved: bool,
    /// Assigned signer of the next pending step, if any.
    pub next_signer: Option<Uuid>,
}

/// Reject a stale client copy before doing any work.
pub fn check_version(doc: &PazYSalvo, expected: Option<i32>) -> AppResult<()> {
    match expected {
        Some(v) if v != doc.row_version => Err(AppError::conflict(format!(
            "Paz y salvo is at version {}, not {v}; reload and retry",
            doc.row_version
        ))),
        _ => Ok(()),
    }
}

/// Build the signature chain for a new clearance.
///
/// An empty request yields the default four-step chain. Orders follow the
/// request order starting at 1.
pub fn build_chain(signers: &[SignerAssignment]) -> AppResult<Vec<SignatureRecord>> {
    if signers.is_empty() {
        return Ok(default_chain());
    }

    let mut seen = HashSet::new();
    let mut chain = Vec::with_capacity(signers.len());
    for (signer, order) in signers.iter().zip(1u32..) {
        if !seen.insert(signer.role) {
            return Err(AppError::validation(format!(
                "Signature role {} appears more than once",
                signer.role
            )));
        }
        let mut record = SignatureRecord::pending(signer.role, signer.signer_id, order);
        record.mandatory = signer.mandatory.unwrap_or(true);
        chain.push(record);
    }
    Ok(chain)
}

/// Snapshot of the employee's assets at the time of the request.
pub fn build_snapshot(assignments: &[AssignmentView]) -> Vec<AssetSnapshotRecord> {
    assignments
        .iter()
        .map(|a| AssetSnapshotRecord {
            asset_id: a.asset_id,
            asset_code: a.asset_code.clone(),
            asset_name: a.asset_name.clone(),
            state: match a.state {
                AssignmentState::Activa => SnapshotState::Pendiente,
                AssignmentState::Devuelta => SnapshotState::Devuelto,
                AssignmentState::Perdida => SnapshotState::Perdido,
            },
            assigned_at: a.assigned_at,
            returned_at: a.returned_at,
        })
        .collect()
}

/// Append one history record.
pub fn record_history(
    doc: &mut PazYSalvo,
    actor: Uuid,
    action: &str,
    from_status: Option<PazYSalvoStatus>,
    note: Option<String>,
    at: DateTime<Utc>,
) -> AppResult<()> {
    let mut history = doc.history();
    history.push(HistoryRecord {
        actor_id: actor,
        action: action.to_string(),
        from_status,
        to_status: doc.status,
        note,
        at,
    });
    doc.set_history(&history)
}

/// Append a history record for an action that keeps the status.
fn record_in_place(
    doc: &mut PazYSalvo,
    actor: Uuid,
    action: &str,
    note: Option<String>,
    at: DateTime<Utc>,
) -> AppResult<()> {
    let status = doc.status;
    record_history(doc, actor, action, Some(status), note, at)
}

/// Edit motive, observations or signers of a draft.
pub fn update_draft(
    doc: &mut PazYSalvo,
    actor: Actor,
    motive: Option<String>,
    observations: Option<String>,
    signers: &[SignerAssignment],
    at: DateTime<Utc>,
) -> AppResult<()> {
    if !doc.is_draft() {
        return Err(AppError::validation(format!(
            "Only drafts can be edited; paz y salvo is {}",
            doc.status
        )));
    }

    if let Some(motive) = motive {
        if motive.trim().is_empty() {
            return Err(AppError::validation("Motive cannot be empty"));
        }
        doc.motive = motive;
    }
    if observations.is_some() {
        doc.observations = observations;
    }

    if !signers.is_empty() {
        let mut chain = doc.signatures();
        for assignment in signers {
            let record = chain
                .iter_mut()
                .find(|s| s.role == assignment.role)
                .ok_or_else(|| {
                    AppError::validation(format!(
                        "Signature role {} is not part of this chain",
                        assignment.role
                    ))
                })?;
            record.signer_id = assignment.signer_id;
            if let Some(mandatory) = assignment.mandatory {
                record.mandatory = mandatory;
            }
        }
        doc.set_signatures(&chain)?;
    }

    record_in_place(doc, actor.id, "actualizado", None, at)
}

/// Re-read the employee's assets into the snapshot.
pub fn refresh_snapshot(
    doc: &mut PazYSalvo,
    actor: Actor,
    assignments: &[AssignmentView],
    at: DateTime<Utc>,
) -> AppResult<()> {
    if !(doc.is_draft() || doc.is_in_signing()) {
        return Err(AppError::validation(format!(
            "Asset snapshot cannot change while paz y salvo is {}",
            doc.status
        )));
    }
    doc.set_asset_snapshot(&build_snapshot(assignments))?;
    record_in_place(doc, actor.id, "inventario_actualizado", None, at)
}

/// Move a draft into signing. Returns the first signer to notify.
pub fn send_to_sign(doc: &mut PazYSalvo, actor: Actor, at: DateTime<Utc>) -> AppResult<Option<Uuid>> {
    if !doc.can_be_sent_to_sign() {
        return Err(AppError::validation(format!(
            "Paz y salvo in status {} cannot be sent to sign",
            doc.status
        )));
    }

    let signatures = doc.signatures();
    if signatures.is_empty() {
        return Err(AppError::validation("At least one signature is required"));
    }
    if !signatures.iter().any(|s| s.mandatory) {
        return Err(AppError::validation(
            "At least one mandatory signature is required",
        ));
    }
    let missing = unassigned_mandatory(&signatures);
    if !missing.is_empty() {
        let roles: Vec<&str> = missing.iter().map(|r| r.as_str()).collect();
        return Err(AppError::validation(format!(
            "Mandatory signatures without signer: {}",
            roles.join(", ")
        )));
    }

    let before = doc.status;
    doc.status = PazYSalvoStatus::EnFirma;
    doc.sent_at = Some(at);
    record_history(doc, actor.id, "enviado_a_firma", Some(before), None, at)?;

    Ok(next_pending(&signatures).and_then(|s| s.signer_id))
}

fn signing_step<'a>(
    doc: &PazYSalvo,
    signatures: &'a mut [SignatureRecord],
    actor: Actor,
    role: SignatureRole,
) -> AppResult<&'a mut SignatureRecord> {
    if !doc.is_in_signing() {
        return Err(AppError::validation(format!(
            "Paz y salvo is {}, not in signing",
            doc.status
        )));
    }
    if !is_turn_of(signatures, role) {
        return Err(AppError::validation(format!(
            "It is not the turn of {role} to sign"
        )));
    }

    let record = signatures
        .iter_mut()
        .find(|s| s.role == role)
        .ok_or_else(|| AppError::validation(format!("No {role} signature in this chain")))?;

    if record.signer_id != Some(actor.id) && !actor.is_admin {
        return Err(AppError::authorization(format!(
            "You are not the assigned signer for {role}"
        )));
    }
    Ok(record)
}

/// Sign one step of the chain.
pub fn sign(
    doc: &mut PazYSalvo,
    actor: Actor,
    role: SignatureRole,
    comment: Option<String>,
    at: DateTime<Utc>,
) -> AppResult<SignOutcome> {
    let mut signatures = doc.signatures();
    let record = signing_step(doc, &mut signatures, actor, role)?;

    let signer = record.signer_id.unwrap_or(actor.id);
    record.signer_id = Some(signer);
    record.state = SignatureState::Firmada;
    record.signed_at = Some(at);
    record.comment = comment;
    record.hash = Some(signature_hash(doc.id, role, signer, at));

    doc.set_signatures(&signatures)?;
    record_in_place(doc, actor.id, "firmado", Some(role.as_str().to_string()), at)?;

    if all_mandatory_signed(&signatures) {
        let before = doc.status;
        doc.status = PazYSalvoStatus::Aprobado;
        doc.approved_at = Some(at);
        doc.final_hash = Some(final_hash(&signatures));
        record_history(doc, actor.id, "aprobado", Some(before), None, at)?;
        return Ok(SignOutcome {
            approved: true,
            next_signer: None,
        });
    }

    Ok(SignOutcome {
        approved: false,
        next_signer: next_pending(&signatures).and_then(|s| s.signer_id),
    })
}

/// Reject at one step of the chain; the whole request is rejected.
pub fn reject(
    doc: &mut PazYSalvo,
    actor: Actor,
    role: SignatureRole,
    comment: String,
    at: DateTime<Utc>,
) -> AppResult<()> {
    if comment.trim().is_empty() {
        return Err(AppError::validation("A rejection comment is required"));
    }

    let mut signatures = doc.signatures();
    let record = signing_step(doc, &mut signatures, actor, role)?;
    record.signer_id = Some(record.signer_id.unwrap_or(actor.id));
    record.state = SignatureState::Rechazada;
    record.signed_at = Some(at);
    record.comment = Some(comment.clone());

    doc.set_signatures(&signatures)?;
    let before = doc.status;
    doc.status = PazYSalvoStatus::Rechazado;
    record_history(doc, actor.id, "rechazado", Some(before), Some(comment), at)
}

fn ensure_open(doc: &PazYSalvo, what: &str) -> AppResult<()> {
    if doc.is_final() {
        Err(AppError::validation(format!(
            "Cannot {what}: paz y salvo is {}",
            doc.status
        )))
    } else {
        Ok(())
    }
}

/// Check that a file may be attached, before it is stored.
pub fn check_can_attach(doc: &PazYSalvo) -> AppResult<()> {
    ensure_open(doc, "attach files")
}

/// Record an uploaded attachment.
pub fn attach(
    doc: &mut PazYSalvo,
    actor: Actor,
    attachment: AttachmentRecord,
    at: DateTime<Utc>,
) -> AppResult<()> {
    check_can_attach(doc)?;
    let note = attachment.file_name.clone();
    let mut attachments = doc.attachments();
    attachments.push(attachment);
    doc.set_attachments(&attachments)?;
    record_in_place(doc, actor.id, "adjunto_agregado", Some(note), at)
}

/// Record an approved exception.
pub fn add_exception(
    doc: &mut PazYSalvo,
    actor: Actor,
    motive: String,
    at: DateTime<Utc>,
) -> AppResult<()> {
    ensure_open(doc, "approve exceptions")?;
    if motive.trim().is_empty() {
        return Err(AppError::validation("Exception motive is required"));
    }
    let mut exceptions = doc.exceptions();
    exceptions.push(ExceptionRecord {
        approved_by: actor.id,
        motive: motive.clone(),
        approved_at: at,
    });
    doc.set_exceptions(&exceptions)?;
    record_in_place(doc, actor.id, "excepcion_aprobada", Some(motive), at)
}

/// Close an approved request.
pub fn close(doc: &mut PazYSalvo, actor: Actor, at: DateTime<Utc>) -> AppResult<()> {
    if !doc.can_be_closed() {
        return Err(AppError::validation(format!(
            "Paz y salvo in status {} cannot be closed",
            doc.status
        )));
    }
    let before = doc.status;
    doc.status = PazYSalvoStatus::Cerrado;
    doc.closed_at = Some(at);
    record_history(doc, actor.id, "cerrado", Some(before), None, at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::error::ErrorKind;

    fn actor(id: Uuid) -> Actor {
        Actor {
            id,
            is_admin: false,
        }
    }

    fn admin() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            is_admin: true,
        }
    }

    fn draft(chain: &[SignatureRecord]) -> PazYSalvo {
        let now = Utc::now();
        let mut doc = PazYSalvo {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            requested_by: Uuid::new_v4(),
            status: PazYSalvoStatus::Borrador,
            motive: "Renuncia".into(),
            observations: None,
            signatures_json: None,
            history_json: None,
            attachments_json: None,
            exceptions_json: None,
            asset_snapshot_json: None,
            final_hash: None,
            pdf_path: None,
            created_at: now,
            updated_at: now,
            sent_at: None,
            approved_at: None,
            closed_at: None,
            row_version: 1,
        };
        doc.set_signatures(chain).unwrap();
        doc
    }

    /// Two-step chain with both signers assigned.
    fn two_step() -> (PazYSalvo, Uuid, Uuid) {
        let boss = Uuid::new_v4();
        let it = Uuid::new_v4();
        let chain = build_chain(&[
            SignerAssignment {
                role: SignatureRole::JefeInmediato,
                signer_id: Some(boss),
                mandatory: None,
            },
            SignerAssignment {
                role: SignatureRole::Ti,
                signer_id: Some(it),
                mandatory: None,
            },
        ])
        .unwrap();
        (draft(&chain), boss, it)
    }

    #[test]
    fn test_build_chain_defaults_and_orders() {
        let chain = build_chain(&[]).unwrap();
        assert_eq!(chain.len(), 4);

        let custom = build_chain(&[
            SignerAssignment {
                role: SignatureRole::Ti,
                signer_id: None,
                mandatory: Some(false),
            },
            SignerAssignment {
                role: SignatureRole::RecursosHumanos,
                signer_id: None,
                mandatory: None,
            },
        ])
        .unwrap();
        assert_eq!(custom[0].order, 1);
        assert!(!custom[0].mandatory);
        assert_eq!(custom[1].order, 2);
        assert!(custom[1].mandatory);
    }

    #[test]
    fn test_build_chain_rejects_duplicate_roles() {
        let dup = SignerAssignment {
            role: SignatureRole::Ti,
            signer_id: None,
            mandatory: None,
        };
        let err = build_chain(&[dup.clone(), dup]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_snapshot_maps_assignment_states() {
        let view = |state| AssignmentView {
            id: Uuid::new_v4(),
            asset_id: Uuid::new_v4(),
            asset_code: "NB-001".into(),
            asset_name: "Notebook".into(),
            employee_id: Uuid::new_v4(),
            state,
            assigned_at: Utc::now(),
            returned_at: None,
        };
        let snapshot = build_snapshot(&[
            view(AssignmentState::Activa),
            view(AssignmentState::Devuelta),
            view(AssignmentState::Perdida),
        ]);
        let states: Vec<_> = snapshot.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![SnapshotState::Pendiente, SnapshotState::Devuelto, SnapshotState::Perdido]
        );
    }

    #[test]
    fn test_send_requires_assigned_mandatory_signers() {
        let mut doc = draft(&default_chain());
        let err = send_to_sign(&mut doc, admin(), Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(doc.is_draft());
        assert!(doc.history().is_empty());

        let mut empty = draft(&[]);
        assert!(send_to_sign(&mut empty, admin(), Utc::now()).is_err());
    }

    #[test]
    fn test_send_rejects_chain_without_mandatory_steps() {
        let chain = build_chain(&[
            SignerAssignment {
                role: SignatureRole::Ti,
                signer_id: None,
                mandatory: Some(false),
            },
            SignerAssignment {
                role: SignatureRole::Contabilidad,
                signer_id: Some(Uuid::new_v4()),
                mandatory: Some(false),
            },
        ])
        .unwrap();
        let mut doc = draft(&chain);

        let err = send_to_sign(&mut doc, admin(), Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(doc.is_draft());
        assert!(doc.sent_at.is_none());
    }

    #[test]
    fn test_sequential_signing_to_approval() {
        let (mut doc, boss, it) = two_step();
        let first = send_to_sign(&mut doc, admin(), Utc::now()).unwrap();
        assert_eq!(first, Some(boss));
        assert!(doc.is_in_signing());
        assert!(doc.sent_at.is_some());

        // TI cannot sign before the supervisor.
        let err = sign(&mut doc, actor(it), SignatureRole::Ti, None, Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        // Someone else cannot sign the supervisor's step.
        let err = sign(
            &mut doc,
            actor(Uuid::new_v4()),
            SignatureRole::JefeInmediato,
            None,
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let outcome = sign(&mut doc, actor(boss), SignatureRole::JefeInmediato, None, Utc::now())
            .unwrap();
        assert_eq!(
            outcome,
            SignOutcome {
                approved: false,
                next_signer: Some(it)
            }
        );

        let outcome =
            sign(&mut doc, actor(it), SignatureRole::Ti, Some("ok".into()), Utc::now()).unwrap();
        assert!(outcome.approved);
        assert!(doc.is_approved());
        assert!(doc.approved_at.is_some());
        assert_eq!(doc.final_hash, Some(final_hash(&doc.signatures())));
        assert!(doc.signatures().iter().all(|s| s.hash.is_some()));

        let actions: Vec<_> = doc.history().into_iter().map(|h| h.action).collect();
        assert_eq!(actions, vec!["enviado_a_firma", "firmado", "firmado", "aprobado"]);
    }

    #[test]
    fn test_admin_can_sign_on_behalf() {
        let (mut doc, boss, _) = two_step();
        send_to_sign(&mut doc, admin(), Utc::now()).unwrap();
        sign(&mut doc, admin(), SignatureRole::JefeInmediato, None, Utc::now()).unwrap();
        let first = &doc.signatures()[0];
        assert_eq!(first.signer_id, Some(boss));
        assert_eq!(first.state, SignatureState::Firmada);
    }

    #[test]
    fn test_reject_is_final() {
        let (mut doc, boss, _) = two_step();
        send_to_sign(&mut doc, admin(), Utc::now()).unwrap();
        assert!(reject(&mut doc, actor(boss), SignatureRole::JefeInmediato, " ".into(), Utc::now()).is_err());

        reject(&mut doc, actor(boss), SignatureRole::JefeInmediato, "Debe equipo".into(), Utc::now())
            .unwrap();
        assert!(doc.is_rejected());
        assert!(doc.is_final());
        assert_eq!(doc.signatures()[0].state, SignatureState::Rechazada);

        assert!(add_exception(&mut doc, admin(), "x".into(), Utc::now()).is_err());
        assert!(check_can_attach(&doc).is_err());
        assert!(close(&mut doc, admin(), Utc::now()).is_err());
    }

    #[test]
    fn test_close_only_after_approval() {
        let (mut doc, boss, it) = two_step();
        assert!(close(&mut doc, admin(), Utc::now()).is_err());

        send_to_sign(&mut doc, admin(), Utc::now()).unwrap();
        sign(&mut doc, actor(boss), SignatureRole::JefeInmediato, None, Utc::now()).unwrap();
        sign(&mut doc, actor(it), SignatureRole::Ti, None, Utc::now()).unwrap();
        close(&mut doc, admin(), Utc::now()).unwrap();
        assert!(doc.is_closed());
        assert!(doc.closed_at.is_some());
        assert_eq!(doc.history().last().map(|h| h.to_status), Some(PazYSalvoStatus::Cerrado));
    }

    #[test]
    fn test_update_draft_assigns_signers() {
        let mut doc = draft(&default_chain());
        let signer = Uuid::new_v4();
        update_draft(
            &mut doc,
            admin(),
            Some("Fin de contrato".into()),
            None,
            &[SignerAssignment {
                role: SignatureRole::Contabilidad,
                signer_id: Some(signer),
                mandatory: None,
            }],
            Utc::now(),
        )
        .unwrap();
        assert_eq!(doc.motive, "Fin de contrato");
        let chain = doc.signatures();
        assert_eq!(
            chain.iter().find(|s| s.role == SignatureRole::Contabilidad).and_then(|s| s.signer_id),
            Some(signer)
        );

        let err = update_draft(
            &mut doc,
            admin(),
            None,
            None,
            &[SignerAssignment {
                role: SignatureRole::RecursosHumanos,
                signer_id: Some(signer),
                mandatory: None,
            }],
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_update_draft_only_in_draft() {
        let (mut doc, _, _) = two_step();
        send_to_sign(&mut doc, admin(), Utc::now()).unwrap();
        assert!(update_draft(&mut doc, admin(), Some("x".into()), None, &[], Utc::now()).is_err());
        // The snapshot may still be refreshed while signing.
        assert!(refresh_snapshot(&mut doc, admin(), &[], Utc::now()).is_ok());
    }

    #[test]
    fn test_attach_and_exception_append() {
        let mut doc = draft(&default_chain());
        let who = admin();
        attach(
            &mut doc,
            who,
            AttachmentRecord {
                uploaded_by: who.id,
                file_name: "carta.pdf".into(),
                path: "paz-y-salvo/x/carta.pdf".into(),
                mime_type: "application/pdf".into(),
                size_bytes: 42,
                uploaded_at: Utc::now(),
            },
            Utc::now(),
        )
        .unwrap();
        add_exception(&mut doc, who, "Equipo dañado sin cargo".into(), Utc::now()).unwrap();

        assert_eq!(doc.attachments().len(), 1);
        assert_eq!(doc.exceptions().len(), 1);
        assert_eq!(doc.history().len(), 2);
    }

    #[test]
    fn test_check_version() {
        let doc = draft(&[]);
        assert!(check_version(&doc, None).is_ok());
        assert!(check_version(&doc, Some(1)).is_ok());
        assert_eq!(check_version(&doc, Some(2)).unwrap_err().kind, ErrorKind::Conflict);
    }
}
