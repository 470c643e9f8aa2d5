//! HTTP-level integration tests for the Portal TI router.
//!
//! Most suites run against a lazily connected pool and only cover paths
//! decided before any query is issued: authentication, role checks,
//! request validation and health reporting. The flow and repository
//! suites need a real PostgreSQL server at `DATABASE_URL` and skip
//! themselves when it is unset.

mod helpers;

mod acta_flow_test;
mod auth_test;
mod clearance_flow_test;
mod health_test;
mod permission_test;
mod repository_test;
mod validation_test;
