//! # portal-service
//!
//! Business logic service layer for Portal TI. Each service orchestrates
//! repositories, file storage, and access control to implement one area of
//! the application.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references. State changes that can be
//! expressed without I/O live in plain functions next to each service so
//! they can be tested in isolation.

pub mod acta;
pub mod asset;
pub mod assignment;
pub mod audit;
pub mod context;
pub mod dashboard;
pub mod notification;
pub mod paz_y_salvo;
pub mod ticket;
pub mod upload;
pub mod user;

pub use acta::ActaService;
pub use asset::AssetService;
pub use assignment::AssignmentService;
pub use audit::AuditService;
pub use context::RequestContext;
pub use dashboard::DashboardService;
pub use notification::NotificationService;
pub use paz_y_salvo::PazYSalvoService;
pub use ticket::TicketService;
pub use upload::UploadedFile;
pub use user::UserService;
