//! deepcheck core - comparison and diagnostics for test assertions
//!
//! This crate decides structural equality of two values and explains the
//! first point of difference:
//! - Shape descriptors and reflection of Rust types into dynamic values
//! - A strategy registry resolving per-leaf comparison patterns
//! - A short-circuiting deep equality engine with path tracking
//! - A byte visualizer with numbered gutters, wrapping and divergence blocks
//! - A diagnostic buffer over a growable or fixed sink
//! - Assertion scopes tying the pieces together
//!
//! ```
//! use deepcheck_core::config::RenderConfig;
//! use deepcheck_core::reflect_record;
//! use deepcheck_core::scope::AssertScope;
//!
//! struct Flags {
//!     a: bool,
//!     b: i32,
//! }
//! reflect_record!(Flags { a, b });
//!
//! let mut scope = AssertScope::with_config("flags", RenderConfig::plain());
//! let outcome = scope
//!     .expect_equal(&Flags { a: true, b: 7 }, &Flags { a: true, b: 1000 })
//!     .unwrap();
//! assert_eq!(outcome.mismatch().unwrap().path.to_string(), "field b");
//! let report = scope.finish();
//! assert!(report.text.contains("expected value 7, got 1000"));
//! ```

pub mod buffer;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod reflect;
pub mod scope;
pub mod shape;
pub mod strategy;
pub mod trace;
pub mod value;
pub mod visualize;

pub use deepcheck_core_types as core_types;

// Re-export commonly used types
pub use buffer::{DiagnosticBuffer, FixedSink, GrowableSink, Level, RuleWeight, Sink};
pub use config::{ColorMode, RenderConfig};
pub use engine::{compare, Breadcrumb, Comparison, Mismatch, MismatchPath};
pub use errors::{CheckError, CheckErrorKind, ContractViolation, Result};
pub use reflect::Reflect;
pub use scope::{AssertScope, Outcome, ScopeReport};
pub use shape::Shape;
pub use strategy::{CompiledPattern, Pattern, PatternBuilder, Predicate, Registry};
pub use value::Value;
pub use visualize::Visualizer;
