//! Support ticket domain entities.

pub mod message;
pub mod model;
pub mod status;

pub use message::{CreateTicketMessage, TicketMessage};
pub use model::{CreateTicket, Ticket, TicketFilter};
pub use status::{TicketPriority, TicketStatus};
