#![allow(clippy::unwrap_used, clippy::expect_used)]
/// Scenario 2: Enum With Unnamed Ordinal
///
/// An enum whose actual value carries an ordinal with no declared name.
/// The expected side is shown by variant name, the actual side by its raw
/// ordinal.
mod common;

use deepcheck_core::engine::compare;
use deepcheck_core::scope::AssertScope;
use deepcheck_core::shape::Shape;
use deepcheck_core::strategy::Registry;
use deepcheck_core::value::Value;

fn mode_shape() -> Shape {
    Shape::enumeration("Mode", [("variant1", 0), ("variant2", 1)])
}

#[test]
fn test_scenario_02_name_on_expected_ordinal_on_actual() {
    // GIVEN a tag shape declaring ordinals 0 and 1
    let registry = Registry::new();
    let pattern = registry.default_pattern(&mode_shape()).unwrap();
    let mut buffer = common::plain_buffer();

    // WHEN comparing ordinal 0 against ordinal 2
    let outcome = compare(&pattern, &Value::Enum(0), &Value::Enum(2), &mut buffer).unwrap();

    // THEN the message names variant1 and shows the raw 2
    let mismatch = outcome.mismatch().expect("ordinals differ");
    assert_eq!(
        mismatch.message,
        "expected `variant1`, got ordinal 2 (no named variant)"
    );
    assert_eq!(mismatch.expected, "variant1");
    assert_eq!(mismatch.actual, "2");
    assert_eq!(
        buffer.drain(),
        "error: expected `variant1`, got ordinal 2 (no named variant)\n"
    );
}

#[test]
fn test_scenario_02_through_a_scope() {
    // GIVEN a scope and the compiled tag pattern
    let mut scope = AssertScope::with_config("scenario 2", common::plain());
    let pattern = scope.registry().default_pattern(&mode_shape()).unwrap();

    // WHEN the dynamic values are compared
    let outcome = scope
        .expect_values_equal(&pattern, &Value::Enum(0), &Value::Enum(2))
        .unwrap();

    // THEN the failure is recorded with the same text
    assert!(!outcome.passed());
    let report = scope.finish();
    assert_eq!(report.failures, 1);
    assert!(report
        .text
        .starts_with("error: expected `variant1`, got ordinal 2 (no named variant)\n"));
    assert!(report.text.contains("assertion `expect_values_equal` failed at"));
}
