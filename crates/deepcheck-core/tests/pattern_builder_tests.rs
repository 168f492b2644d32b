#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use deepcheck_core::engine::compare;
use deepcheck_core::errors::CheckErrorKind;
use deepcheck_core::shape::{FloatKind, Shape};
use deepcheck_core::strategy::{Pattern, PatternBuilder, Registry};
use deepcheck_core::value::Value;

fn sample_shape() -> Shape {
    Shape::record(
        "Sample",
        [
            ("label", Shape::Bytes),
            ("mean", Shape::Float(FloatKind::F64)),
            ("count", Shape::int(64, false)),
        ],
    )
}

fn sample(label: &'static [u8], mean: f64, count: u64) -> Value<'static> {
    Value::Record(vec![
        Value::bytes(label),
        Value::F64(mean),
        Value::Int(i128::from(count)),
    ])
}

#[test]
fn test_builder_applies_per_field_strategies() {
    let registry = Registry::new();
    let pattern = PatternBuilder::new(&registry, &sample_shape())
        .unwrap()
        .field("mean", Pattern::AbsTolerance(0.01))
        .unwrap()
        .build()
        .unwrap();
    let mut buffer = common::plain_buffer();

    let outcome = compare(
        &pattern,
        &sample(b"run", 1.000, 3),
        &sample(b"run", 1.005, 3),
        &mut buffer,
    )
    .unwrap();

    assert!(outcome.is_equal());
    assert!(buffer.is_empty());
}

#[test]
fn test_unlisted_fields_keep_value_equality() {
    let registry = Registry::new();
    let pattern = PatternBuilder::new(&registry, &sample_shape())
        .unwrap()
        .field("mean", Pattern::always(true))
        .unwrap()
        .build()
        .unwrap();
    let mut buffer = common::plain_buffer();

    let outcome = compare(
        &pattern,
        &sample(b"run", 1.0, 3),
        &sample(b"run", 9.0, 4),
        &mut buffer,
    )
    .unwrap();

    let mismatch = outcome.mismatch().unwrap();
    assert_eq!(mismatch.path.to_string(), "field count");
    assert_eq!(mismatch.message, "expected value 3, got 4");
    buffer.clear();
}

#[test]
fn test_builder_rejects_bad_entries_on_the_spot() {
    let registry = Registry::new();

    let unknown = PatternBuilder::new(&registry, &sample_shape())
        .unwrap()
        .field("median", Pattern::Default)
        .unwrap_err();
    assert!(unknown.message().contains("record Sample has no field 'median'"));

    let duplicate = PatternBuilder::new(&registry, &sample_shape())
        .unwrap()
        .field("mean", Pattern::approx_abs())
        .unwrap()
        .field("mean", Pattern::approx_rel())
        .unwrap_err();
    assert!(duplicate.message().contains("field 'mean' given more than one pattern"));

    let inapplicable = PatternBuilder::new(&registry, &sample_shape())
        .unwrap()
        .field("label", Pattern::approx_abs())
        .unwrap_err();
    assert_eq!(inapplicable.kind(), CheckErrorKind::ContractViolation);
}

#[test]
fn test_builder_on_leaf_shape_is_rejected() {
    let err = PatternBuilder::new(&Registry::new(), &Shape::Bool).unwrap_err();
    assert!(err.message().contains("composite pattern applied to leaf shape bool"));
}

#[test]
fn test_variant_entries_only_fit_unions() {
    let registry = Registry::new();

    let err = PatternBuilder::new(&registry, &sample_shape())
        .unwrap()
        .variant("mean", Pattern::Default)
        .unwrap_err();
    assert!(err.message().contains("per-variant pattern does not fit shape record Sample"));

    let err = PatternBuilder::new(&registry, &common::reading_shape())
        .unwrap()
        .field("Celsius", Pattern::Default)
        .unwrap_err();
    assert!(err.message().contains("per-field pattern does not fit shape union Reading"));
}

#[test]
fn test_union_builder_targets_payloads() {
    let registry = Registry::new();
    let pattern = PatternBuilder::new(&registry, &common::reading_shape())
        .unwrap()
        .variant("Celsius", Pattern::AbsTolerance(0.5))
        .unwrap()
        .build()
        .unwrap();
    let mut buffer = common::plain_buffer();

    let close = compare(
        &pattern,
        &Value::variant(0, Value::F64(20.0)),
        &Value::variant(0, Value::F64(20.4)),
        &mut buffer,
    )
    .unwrap();
    assert!(close.is_equal());

    let unknown = PatternBuilder::new(&registry, &common::reading_shape())
        .unwrap()
        .variant("Kelvin", Pattern::Default)
        .unwrap_err();
    assert!(unknown.message().contains("union Reading has no variant 'Kelvin'"));
}

#[test]
fn test_builder_reaches_through_containers() {
    let registry = Registry::new();
    let shape = Shape::optional(Shape::sequence(sample_shape()));

    let pattern = PatternBuilder::new(&registry, &shape)
        .unwrap()
        .field("mean", Pattern::approx_rel())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(pattern.shape(), &shape);
}

#[test]
fn test_compiled_pattern_is_reusable() {
    let registry = Registry::new();
    let pattern = registry.default_pattern(&common::flags_shape()).unwrap();
    let mut buffer = common::plain_buffer();

    for b in [1, 2, 3] {
        let outcome = compare(&pattern, &common::flags(true, b), &common::flags(true, b), &mut buffer)
            .unwrap();
        assert!(outcome.is_equal());
    }
    assert!(buffer.is_empty());
}
