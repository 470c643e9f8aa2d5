//! File store backends.

pub mod local;
