//! Acta (handover receipt) domain entities and the status transition table.

pub mod model;
pub mod signing;
pub mod status;

pub use model::{Acta, ActaView};
pub use signing::SigningMethod;
pub use status::{ActaStatus, is_final_state, is_valid_transition, valid_transitions};
