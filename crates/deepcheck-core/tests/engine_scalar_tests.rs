#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use deepcheck_core::engine::{compare, Comparison};
use deepcheck_core::errors::CheckErrorKind;
use deepcheck_core::shape::{FloatKind, Shape};
use deepcheck_core::strategy::{Pattern, Registry};
use deepcheck_core::value::{TypeIdentity, Value};

fn check(pattern: &Pattern, shape: &Shape, e: &Value<'_>, a: &Value<'_>) -> (Comparison, String) {
    let compiled = Registry::new().resolve(pattern, shape).unwrap();
    let mut buffer = common::plain_buffer();
    let outcome = compare(&compiled, e, a, &mut buffer).unwrap();
    (outcome, buffer.drain())
}

fn mode_shape() -> Shape {
    Shape::enumeration("Mode", [("variant1", 0), ("variant2", 1)])
}

#[test]
fn test_nan_differs_under_value_equality() {
    let nan = Value::F64(f64::NAN);
    let (outcome, text) = check(&Pattern::Default, &Shape::Float(FloatKind::F64), &nan, &nan);

    assert_eq!(outcome.mismatch().unwrap().message, "expected value NaN, got NaN");
    assert_eq!(text, "error: expected value NaN, got NaN\n");
}

#[test]
fn test_nan_equal_under_bit_equality() {
    let nan = Value::F32(f32::NAN);
    let (outcome, text) = check(&Pattern::bit_equal(), &Shape::Float(FloatKind::F32), &nan, &nan);

    assert!(outcome.is_equal());
    assert!(text.is_empty());
}

#[test]
fn test_signed_zero_depends_on_strategy() {
    let shape = Shape::Float(FloatKind::F64);
    let (pos, neg) = (Value::F64(0.0), Value::F64(-0.0));

    assert!(check(&Pattern::Default, &shape, &pos, &neg).0.is_equal());
    let (outcome, _) = check(&Pattern::bit_equal(), &shape, &pos, &neg);
    assert_eq!(outcome.mismatch().unwrap().message, "expected value 0.0, got -0.0");
}

#[test]
fn test_relative_tolerance_on_large_values() {
    let shape = Shape::Float(FloatKind::F64);
    let (outcome, _) = check(
        &Pattern::RelTolerance(1e-6),
        &shape,
        &Value::F64(1e9),
        &Value::F64(1e9 + 100.0),
    );
    assert!(outcome.is_equal());
}

#[test]
fn test_named_enum_variants() {
    let (outcome, _) = check(&Pattern::Default, &mode_shape(), &Value::Enum(0), &Value::Enum(1));

    let mismatch = outcome.mismatch().unwrap();
    assert_eq!(mismatch.message, "expected `variant1`, got `variant2`");
    assert_eq!(mismatch.expected, "variant1");
    assert_eq!(mismatch.actual, "variant2");
}

#[test]
fn test_enum_expected_side_unnamed() {
    let (outcome, _) = check(&Pattern::Default, &mode_shape(), &Value::Enum(7), &Value::Enum(1));

    assert_eq!(
        outcome.mismatch().unwrap().message,
        "expected ordinal 7 (no named variant), got `variant2`"
    );
}

#[test]
fn test_enum_neither_side_named() {
    let (outcome, _) = check(&Pattern::Default, &mode_shape(), &Value::Enum(-1), &Value::Enum(9));

    let mismatch = outcome.mismatch().unwrap();
    assert_eq!(
        mismatch.message,
        "expected ordinal -1, got ordinal 9 (neither names a variant of Mode)"
    );
    assert_eq!(mismatch.expected, "-1");
    assert_eq!(mismatch.actual, "9");
}

#[test]
fn test_equal_unnamed_ordinals_are_equal() {
    let (outcome, _) = check(&Pattern::Default, &mode_shape(), &Value::Enum(5), &Value::Enum(5));
    assert!(outcome.is_equal());
}

#[test]
fn test_type_identity_compares_by_id() {
    let (same, _) = check(
        &Pattern::Default,
        &Shape::TypeIdentity,
        &Value::Type(TypeIdentity::of::<u8>()),
        &Value::Type(TypeIdentity::of::<u8>()),
    );
    assert!(same.is_equal());

    let (differ, _) = check(
        &Pattern::Default,
        &Shape::TypeIdentity,
        &Value::Type(TypeIdentity::of::<u8>()),
        &Value::Type(TypeIdentity::of::<i8>()),
    );
    assert_eq!(differ.mismatch().unwrap().message, "expected value u8, got i8");
}

#[test]
fn test_always_false_fails_identical_leaves() {
    let (outcome, _) = check(&Pattern::always(false), &Shape::Bool, &Value::Bool(true), &Value::Bool(true));
    assert_eq!(outcome.mismatch().unwrap().message, "expected value true, got true");
}

#[test]
fn test_custom_predicate_on_bytes_without_divergence() {
    let pattern = Pattern::predicate("never", |_, _| false);
    let (outcome, text) = check(&pattern, &Shape::Bytes, &Value::bytes(b"same"), &Value::bytes(b"same"));

    assert_eq!(
        outcome.mismatch().unwrap().message,
        "byte strings rejected by strategy `never`"
    );
    assert!(text.starts_with("error: byte strings rejected by strategy `never`\n1 │ same\n"));
}

#[test]
fn test_value_shape_disagreement_is_a_contract_error() {
    let compiled = Registry::new().default_pattern(&mode_shape()).unwrap();
    let mut buffer = common::plain_buffer();

    let err = compare(&compiled, &Value::Enum(0), &Value::Bool(false), &mut buffer).unwrap_err();

    assert_eq!(err.kind(), CheckErrorKind::ShapeMismatch);
    assert!(err.message().contains("actual side is a bool value"));
    assert_eq!(err.path(), Some("root"));
}
