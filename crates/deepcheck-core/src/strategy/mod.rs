//! Leaf comparison strategies
//!
//! A [`Pattern`] names a strategy for every leaf of a shape. The
//! [`Registry`] resolves it once against the shape, rejecting any mismatched
//! pairing, and produces a [`CompiledPattern`] the engine walks alongside the
//! values.

pub mod pattern;
pub mod predicate;
pub mod registry;

pub use pattern::{CompiledPattern, Pattern, PatternBuilder};
pub use predicate::{Classifier, Predicate};
pub use registry::{Registry, BUILTIN_NAMES};
