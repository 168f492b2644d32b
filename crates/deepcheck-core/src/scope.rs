//! Assertion scopes
//!
//! An [`AssertScope`] owns one diagnostic buffer for the lifetime of a test
//! scope. Every assertion compares through the engine; failures append to
//! the buffer and are returned as [`Outcome::Failed`], so many assertions can
//! run before one consolidated report is drained.
//!
//! A scope over a fixed sink behaves differently on failure: it cannot keep
//! going, so the assertion drains the buffer into a `GenerationAborted`
//! error and returns it.
//!
//! Contract violations (non-comparable shapes, patterns that do not fit the
//! compared type) panic in both modes.
//!
//! ```
//! use deepcheck_core::config::RenderConfig;
//! use deepcheck_core::scope::AssertScope;
//!
//! let mut scope = AssertScope::with_config("arith", RenderConfig::plain());
//! let outcome = scope.expect_equal(&4, &(2 + 2)).unwrap();
//! assert!(outcome.passed());
//! let report = scope.finish();
//! assert_eq!(report.failures, 0);
//! ```

use crate::buffer::{DiagnosticBuffer, FixedSink, GrowableSink, Sink, SinkMode};
use crate::config::RenderConfig;
use crate::engine::{compare, Comparison, Mismatch, MismatchPath};
use crate::errors::{CheckError, CheckErrorKind, Result};
use crate::reflect::Reflect;
use crate::shape::Shape;
use crate::strategy::{CompiledPattern, Registry};
use crate::trace::{NoTrace, TraceSource};
use crate::value::Value;
use crate::{log_op_end, log_op_error, log_op_start};
use deepcheck_core_types::ScopeId;
use serde::Serialize;
use std::panic::Location;
use std::time::Instant;

/// Result of one assertion
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Passed,
    Failed(Mismatch),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed(m) => Some(m),
        }
    }
}

/// Summary returned by [`AssertScope::finish`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeReport {
    pub scope_id: String,
    pub name: String,
    pub assertions: usize,
    pub failures: usize,
    /// Drained diagnostic text, empty when everything passed
    pub text: String,
}

impl ScopeReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

pub struct AssertScope<S: Sink = GrowableSink> {
    id: ScopeId,
    name: String,
    buffer: DiagnosticBuffer<S>,
    registry: Registry,
    trace: Box<dyn TraceSource>,
    origin: Option<String>,
    assertions: usize,
    failures: usize,
}

impl AssertScope<GrowableSink> {
    /// Growable scope configured from the environment
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, RenderConfig::from_env())
    }

    pub fn with_config(name: impl Into<String>, config: RenderConfig) -> Self {
        Self::with_buffer(name, DiagnosticBuffer::new(config))
    }
}

impl<const N: usize> AssertScope<FixedSink<N>> {
    /// Scope over an `N`-byte inline buffer; the first failure aborts
    pub fn fixed(name: impl Into<String>, config: RenderConfig) -> Self {
        Self::with_buffer(name, DiagnosticBuffer::fixed(config))
    }
}

impl<S: Sink> AssertScope<S> {
    pub fn with_buffer(name: impl Into<String>, buffer: DiagnosticBuffer<S>) -> Self {
        let id = ScopeId::new();
        let name = name.into();
        tracing::debug!(scope_id = %id, scope = %name, mode = ?buffer.mode(), "scope opened");
        Self {
            id,
            name,
            buffer,
            registry: Registry::new(),
            trace: Box::new(NoTrace),
            origin: None,
            assertions: 0,
            failures: 0,
        }
    }

    /// Install a trace source; it is consulted now for the scope's origin and
    /// again on every failure
    pub fn with_trace(mut self, source: impl TraceSource + 'static) -> Self {
        self.origin = source.capture();
        self.trace = Box::new(source);
        self
    }

    pub fn id(&self) -> &ScopeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registry used to resolve patterns, for registering custom strategies
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn assertions(&self) -> usize {
        self.assertions
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Compare under the default value-equal pattern
    ///
    /// # Errors
    ///
    /// Only in fixed mode: `GenerationAborted` on a mismatch, carrying the
    /// report, or `BufferOverflow`.
    ///
    /// # Panics
    ///
    /// When `T` contains a non-comparable shape.
    #[track_caller]
    pub fn expect_equal<T: Reflect + ?Sized>(&mut self, expected: &T, actual: &T) -> Result<Outcome> {
        let location = Location::caller();
        let pattern = self
            .registry
            .default_pattern(&T::shape())
            .unwrap_or_else(|err| self.contract_failure("expect_equal", err, location));
        self.run(
            "expect_equal",
            location,
            &pattern,
            &expected.reflect(),
            &actual.reflect(),
        )
    }

    /// Compare under a pattern compiled for `T`'s shape
    ///
    /// # Errors
    ///
    /// Same as [`AssertScope::expect_equal`].
    ///
    /// # Panics
    ///
    /// When `pattern` was compiled for a different shape.
    #[track_caller]
    pub fn expect_equal_with<T: Reflect + ?Sized>(
        &mut self,
        pattern: &CompiledPattern,
        expected: &T,
        actual: &T,
    ) -> Result<Outcome> {
        let location = Location::caller();
        let shape = T::shape();
        if pattern.shape() != &shape {
            let err = CheckError::new(CheckErrorKind::ContractViolation).with_message(format!(
                "pattern compiled for {} used to compare {}",
                pattern.shape(),
                shape
            ));
            self.contract_failure("expect_equal_with", err, location);
        }
        self.run(
            "expect_equal_with",
            location,
            pattern,
            &expected.reflect(),
            &actual.reflect(),
        )
    }

    /// Compare two dynamic values that conform to `pattern`'s shape
    ///
    /// # Errors
    ///
    /// Same as [`AssertScope::expect_equal`].
    ///
    /// # Panics
    ///
    /// When either value does not conform to the pattern's shape.
    #[track_caller]
    pub fn expect_values_equal(
        &mut self,
        pattern: &CompiledPattern,
        expected: &Value<'_>,
        actual: &Value<'_>,
    ) -> Result<Outcome> {
        self.run(
            "expect_values_equal",
            Location::caller(),
            pattern,
            expected,
            actual,
        )
    }

    /// Compare byte strings; a mismatch renders both through the visualizer
    ///
    /// # Errors
    ///
    /// Same as [`AssertScope::expect_equal`].
    #[track_caller]
    pub fn expect_bytes_equal(&mut self, expected: &[u8], actual: &[u8]) -> Result<Outcome> {
        let location = Location::caller();
        let pattern = self
            .registry
            .default_pattern(&Shape::Bytes)
            .unwrap_or_else(|err| self.contract_failure("expect_bytes_equal", err, location));
        self.run(
            "expect_bytes_equal",
            location,
            &pattern,
            &Value::bytes(expected),
            &Value::bytes(actual),
        )
    }

    /// Record a failure when `condition` is false
    ///
    /// # Errors
    ///
    /// Same as [`AssertScope::expect_equal`].
    #[track_caller]
    pub fn expect_true(&mut self, condition: bool, what: &str) -> Result<Outcome> {
        let location = Location::caller();
        let op = "expect_true";
        let started = Instant::now();
        log_op_start!(op, scope_id = %self.id, location = %location);
        self.assertions += 1;

        let result = if condition {
            Ok(Outcome::Passed)
        } else {
            let message = format!("expected `{}` to hold", what);
            let mismatch = Mismatch {
                path: MismatchPath::root(),
                expected: "true".to_string(),
                actual: "false".to_string(),
                message: message.clone(),
            };
            match self.buffer.error(format_args!("{}", message)) {
                Ok(()) => self.record_failure(op, location, mismatch),
                Err(err) => {
                    self.failures += 1;
                    Err(self.abort(err))
                }
            }
        };
        self.log_end(op, started, &result);
        result
    }

    /// Take the accumulated report text
    pub fn drain(&mut self) -> String {
        self.buffer.drain()
    }

    /// Close the scope, draining its buffer into a report
    pub fn finish(self) -> ScopeReport {
        let Self {
            id,
            name,
            mut buffer,
            assertions,
            failures,
            ..
        } = self;
        let text = buffer.drain();
        tracing::debug!(scope_id = %id, assertions, failures, "scope finished");
        ScopeReport {
            scope_id: id.to_string(),
            name,
            assertions,
            failures,
            text,
        }
    }

    /// Close the scope, throwing the report away
    pub fn discard(self) {
        self.buffer.discard();
    }

    fn run(
        &mut self,
        op: &'static str,
        location: &'static Location<'static>,
        pattern: &CompiledPattern,
        expected: &Value<'_>,
        actual: &Value<'_>,
    ) -> Result<Outcome> {
        let started = Instant::now();
        log_op_start!(
            op,
            scope_id = %self.id,
            location = %location,
            shape = %pattern.shape(),
        );
        self.assertions += 1;

        let result = match compare(pattern, expected, actual, &mut self.buffer) {
            Ok(Comparison::Equal) => Ok(Outcome::Passed),
            Ok(Comparison::Mismatch(mismatch)) => self.record_failure(op, location, mismatch),
            Err(err) if err.kind().is_contract() => self.contract_failure(op, err, location),
            Err(err) => {
                // compare only writes while reporting a mismatch
                if err.kind() == CheckErrorKind::BufferOverflow {
                    self.failures += 1;
                }
                Err(self.abort(err))
            }
        };
        self.log_end(op, started, &result);
        result
    }

    fn record_failure(
        &mut self,
        op: &str,
        location: &Location<'_>,
        mismatch: Mismatch,
    ) -> Result<Outcome> {
        self.failures += 1;
        if let Err(err) = self.write_failure_footer(op, location, &mismatch.path) {
            return Err(self.abort(err));
        }

        match self.buffer.mode() {
            SinkMode::Growable => Ok(Outcome::Failed(mismatch)),
            SinkMode::Fixed => {
                let err = CheckError::new(CheckErrorKind::GenerationAborted)
                    .with_op(op)
                    .with_path(mismatch.path.to_string())
                    .with_message(format!("{} at {}", mismatch.message, location));
                Err(self.abort(err))
            }
        }
    }

    fn write_failure_footer(
        &mut self,
        op: &str,
        location: &Location<'_>,
        path: &MismatchPath,
    ) -> Result<()> {
        if path.is_root() {
            self.buffer
                .error(format_args!("assertion `{}` failed at {}", op, location))?;
        } else {
            self.buffer.error(format_args!(
                "assertion `{}` failed at {} ({})",
                op, location, path
            ))?;
        }
        if self.failures == 1 {
            if let Some(origin) = &self.origin {
                let origin = origin.clone();
                self.buffer
                    .info(format_args!("scope `{}` opened at", self.name))?;
                self.write_block(&origin)?;
            }
        }
        if let Some(trace) = self.trace.capture() {
            self.write_block(&trace)?;
        }
        Ok(())
    }

    fn write_block(&mut self, text: &str) -> Result<()> {
        self.buffer.write(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.buffer.write(b"\n")?;
        }
        Ok(())
    }

    /// Attach whatever the buffer holds to `err`, leaving it empty
    fn abort(&mut self, err: CheckError) -> CheckError {
        let report = self.buffer.drain();
        tracing::warn!(
            scope_id = %self.id,
            err.code = err.code(),
            "scope aborted"
        );
        err.with_report(report)
    }

    fn contract_failure(
        &mut self,
        op: &str,
        err: CheckError,
        location: &Location<'_>,
    ) -> ! {
        let err = err.with_op(op);
        tracing::error!(
            scope_id = %self.id,
            err.code = err.code(),
            location = %location,
            "contract violation: {}",
            err
        );
        self.buffer.clear();
        panic!("{} at {}", err, location);
    }

    fn log_end(&self, op: &str, started: Instant, result: &Result<Outcome>) {
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(outcome) => {
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    scope_id = %self.id,
                    passed = outcome.passed()
                );
            }
            Err(err) => {
                log_op_error!(op, err.clone(), duration_ms = duration_ms, scope_id = %self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_report() {
        let mut scope = AssertScope::with_config("counts", RenderConfig::plain());
        assert!(scope.expect_equal(&1u8, &1u8).unwrap().passed());
        assert!(!scope.expect_equal(&1u8, &2u8).unwrap().passed());
        let report = scope.finish();
        assert_eq!(report.assertions, 2);
        assert_eq!(report.failures, 1);
        assert!(report.text.contains("expected value 1, got 2"));
        assert!(report.text.contains("assertion `expect_equal` failed at"));
    }

    #[test]
    fn test_fixed_scope_aborts_with_report() {
        let mut scope: AssertScope<FixedSink<512>> =
            AssertScope::fixed("generation", RenderConfig::plain());
        let err = scope.expect_equal(&true, &false).unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::GenerationAborted);
        assert!(err.report().unwrap().contains("expected value true, got false"));
        scope.discard();
    }
}
