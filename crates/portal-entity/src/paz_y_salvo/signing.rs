//! Sequential signature chain rules and hashing.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::records::{SignatureRecord, SignatureRole, SignatureState};

/// Build the default chain with no signers assigned.
pub fn default_chain() -> Vec<SignatureRecord> {
    SignatureRole::DEFAULT_CHAIN
        .iter()
        .zip(1u32..)
        .map(|(role, order)| SignatureRecord::pending(*role, None, order))
        .collect()
}

/// Mandatory roles that still have no signer.
pub fn unassigned_mandatory(signatures: &[SignatureRecord]) -> Vec<SignatureRole> {
    signatures
        .iter()
        .filter(|s| s.mandatory && s.signer_id.is_none())
        .map(|s| s.role)
        .collect()
}

/// The pending signature with the lowest order.
pub fn next_pending(signatures: &[SignatureRecord]) -> Option<&SignatureRecord> {
    signatures
        .iter()
        .filter(|s| s.is_pending())
        .min_by_key(|s| s.order)
}

/// Whether `role` may sign now: it is pending and every mandatory step
/// ordered before it is already signed.
pub fn is_turn_of(signatures: &[SignatureRecord], role: SignatureRole) -> bool {
    let Some(target) = signatures.iter().find(|s| s.role == role) else {
        return false;
    };
    if !target.is_pending() {
        return false;
    }
    signatures
        .iter()
        .filter(|s| s.mandatory && s.order < target.order)
        .all(|s| s.state == SignatureState::Firmada)
}

/// Whether every mandatory step is signed.
pub fn all_mandatory_signed(signatures: &[SignatureRecord]) -> bool {
    signatures
        .iter()
        .filter(|s| s.mandatory)
        .all(|s| s.state == SignatureState::Firmada)
}

/// SHA-256 of `id|role|signer|timestamp`, lowercase hex.
pub fn signature_hash(
    clearance_id: Uuid,
    role: SignatureRole,
    signer_id: Uuid,
    signed_at: DateTime<Utc>,
) -> String {
    let payload = format!(
        "{clearance_id}|{}|{signer_id}|{}",
        role.as_str(),
        signed_at.to_rfc3339()
    );
    format!("{:x}", Sha256::digest(payload.as_bytes()))
}

/// SHA-256 over the signature hashes in chain order.
pub fn final_hash(signatures: &[SignatureRecord]) -> String {
    let mut ordered: Vec<&SignatureRecord> = signatures.iter().collect();
    ordered.sort_by_key(|s| s.order);

    let mut hasher = Sha256::new();
    for sig in ordered {
        if let Some(hash) = &sig.hash {
            hasher.update(hash.as_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
