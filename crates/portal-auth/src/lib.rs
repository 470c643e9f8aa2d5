//! # portal-auth
//!
//! Bearer token validation and role-based access control for Portal TI.
//!
//! ## Modules
//!
//! - `jwt`: claims, validation, and token minting for tooling and tests
//! - `rbac`: role-to-permission policies and enforcement

pub mod jwt;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use rbac::{Permission, RbacEnforcer, RbacPolicies};
