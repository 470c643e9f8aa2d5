//! # portal-entity
//!
//! Domain entity models for Portal TI. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.
//!
//! The two pieces of real business logic live here as pure code:
//! the [`acta::ActaStatus`] transition table and the
//! [`paz_y_salvo::PazYSalvo`] document model with its embedded records.

pub mod acta;
pub mod asset;
pub mod assignment;
pub mod audit;
pub mod notification;
pub mod paz_y_salvo;
pub mod ticket;
pub mod user;
