//! Shared utilities for depcollect.
//!
//! This crate provides cross-cutting concerns used by the other depcollect
//! crates: the error type, filesystem helpers, and Cargo-style status output.

pub mod errors;
pub mod fs;
pub mod progress;
