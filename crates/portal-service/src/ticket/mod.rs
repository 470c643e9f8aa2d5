//! Support tickets with chat.

pub mod rules;
pub mod service;

pub use service::{OpenTicketRequest, TicketService};
