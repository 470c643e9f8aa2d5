//! HTTP request handlers, one module per domain.

pub mod acta;
pub mod assignment;
pub mod asset;
pub mod audit;
pub mod dashboard;
pub mod health;
pub mod notification;
pub mod paz_y_salvo;
pub mod ticket;
pub mod upload;
pub mod user;
