//! Paz y Salvo (employee clearance) domain entities.
//!
//! A clearance is one row whose sub-collections (signatures, history,
//! attachments, exceptions, asset snapshot) are stored as JSON text.

pub mod embedded;
pub mod model;
pub mod records;
pub mod signing;
pub mod status;

pub use model::{CreatePazYSalvo, PazYSalvo, PazYSalvoDetail};
pub use records::{
    AssetSnapshotRecord, AttachmentRecord, ExceptionRecord, HistoryRecord, SignatureRecord,
    SignatureRole, SignatureState, SnapshotState,
};
pub use status::PazYSalvoStatus;
