//! Acta lifecycle: signing, review, reopening and voiding.

pub mod service;
pub mod transitions;

pub use service::{ActaDownload, ActaService};
