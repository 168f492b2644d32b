//! Core types shared across deepcheck facilities
//!
//! This crate provides foundational types used by both the error and
//! logging facilities of `deepcheck-core`:
//!
//! - **Correlation types**: `ScopeId` ties every log event and report line
//!   to the assertion scope that produced it
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::ScopeId;
