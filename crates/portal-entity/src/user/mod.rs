//! User (employee) domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, UpdateUser, User};
pub use role::UserRole;
