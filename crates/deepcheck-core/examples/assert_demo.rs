//! Assertion Scope Demonstration
//!
//! Runs a handful of assertions through one scope and prints the
//! consolidated report.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Reflecting structs and tags with the macros
//! 2. Per-field strategies through the pattern builder
//! 3. Byte string divergence rendering
//! 4. Fixed-buffer scopes aborting on the first failure

use deepcheck_core::buffer::FixedSink;
use deepcheck_core::config::RenderConfig;
use deepcheck_core::reflect::Reflect;
use deepcheck_core::scope::AssertScope;
use deepcheck_core::strategy::{Pattern, PatternBuilder};
use deepcheck_core::{reflect_record, reflect_tag};

#[derive(Clone, Copy)]
enum Unit {
    Metric,
    Imperial,
}
reflect_tag!(Unit { Metric, Imperial });

struct Measurement {
    label: String,
    unit: Unit,
    value: f64,
}
reflect_record!(Measurement { label, unit, value });

fn measurement(label: &str, unit: Unit, value: f64) -> Measurement {
    Measurement {
        label: label.to_string(),
        unit,
        value,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== deepcheck Assertion Demo ===\n");

    // ===== Part 1: Accumulating failures =====
    println!("## Part 1: Growable scope\n");

    let mut scope = AssertScope::new("demo");

    let same = scope.expect_equal(
        &measurement("width", Unit::Metric, 2.5),
        &measurement("width", Unit::Metric, 2.5),
    )?;
    println!("identical measurements pass: {}", same.passed());

    let unit = scope.expect_equal(
        &measurement("width", Unit::Metric, 2.5),
        &measurement("width", Unit::Imperial, 2.5),
    )?;
    println!("unit mismatch at: {}", unit.mismatch().map(|m| m.path.to_string()).unwrap_or_default());

    // ===== Part 2: Tolerances =====
    println!("\n## Part 2: Per-field tolerance\n");

    let pattern = PatternBuilder::new(scope.registry(), &Measurement::shape())?
        .field("value", Pattern::RelTolerance(1e-3))?
        .build()?;
    let close = scope.expect_equal_with(
        &pattern,
        &measurement("height", Unit::Metric, 1000.0),
        &measurement("height", Unit::Metric, 1000.4),
    )?;
    println!("within 0.1%: {}", close.passed());

    // ===== Part 3: Byte strings =====
    println!("\n## Part 3: Divergence rendering\n");

    let _ = scope.expect_bytes_equal(
        b"GET /index.html HTTP/1.1\r\nHost: example.org\r\n",
        b"GET /index.htm HTTP/1.1\r\nHost: example.org\r\n",
    )?;

    let report = scope.finish();
    println!(
        "{} assertions, {} failures\n",
        report.assertions, report.failures
    );
    print!("{}", report.text);

    // ===== Part 4: Fixed buffers =====
    println!("\n## Part 4: Fixed scope\n");

    let mut fixed: AssertScope<FixedSink<2048>> =
        AssertScope::fixed("generation", RenderConfig::from_env());
    match fixed.expect_equal(&[1u8, 2, 3], &[1u8, 2, 4]) {
        Ok(outcome) => println!("unexpected outcome: {:?}", outcome),
        Err(err) => {
            println!("aborted: {}", err);
            print!("{}", err.report().unwrap_or_default());
        }
    }
    fixed.discard();

    println!("\n=== Demo Complete ===");
    Ok(())
}
