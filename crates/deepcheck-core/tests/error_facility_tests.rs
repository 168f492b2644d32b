use deepcheck_core::errors::{CheckError, CheckErrorKind, ContractViolation};

#[test]
fn test_unknown_strategy_verifiable_by_kind() {
    let err: CheckError = ContractViolation::UnknownStrategy {
        name: "fuzzy".to_string(),
    }
    .into();

    assert_eq!(err.kind(), CheckErrorKind::UnknownStrategy);
    assert_eq!(err.code(), "ERR_UNKNOWN_STRATEGY");
    assert_eq!(err.message(), "unknown strategy 'fuzzy'");
}

#[test]
fn test_unknown_classifier_shares_strategy_kind() {
    let err: CheckError = ContractViolation::UnknownClassifier {
        name: "parity".to_string(),
    }
    .into();

    assert_eq!(err.kind(), CheckErrorKind::UnknownStrategy);
    assert!(err.message().contains("classifier"));
}

#[test]
fn test_non_comparable_distinct_from_contract_violation() {
    let err: CheckError = ContractViolation::NonComparable {
        shape: "callable".to_string(),
    }
    .into();

    assert_eq!(err.kind(), CheckErrorKind::NonComparable);
    assert_ne!(err.kind(), CheckErrorKind::ContractViolation);
    assert!(err.kind().is_contract());
}

#[test]
fn test_value_shape_mismatch_maps_to_shape_kind() {
    let err: CheckError = ContractViolation::ValueShapeMismatch {
        shape: "bool".to_string(),
        detail: "actual side is a int value".to_string(),
    }
    .into();

    assert_eq!(err.kind(), CheckErrorKind::ShapeMismatch);
    assert_eq!(
        err.message(),
        "value does not conform to shape bool: actual side is a int value"
    );
}

#[test]
fn test_pattern_violations_share_contract_kind() {
    let violations = vec![
        ContractViolation::CompositePatternOnLeaf {
            shape: "bool".to_string(),
        },
        ContractViolation::LeafPatternOnComposite {
            pattern: "bit_equal".to_string(),
            shape: "record Flags".to_string(),
        },
        ContractViolation::UnknownField {
            record: "Flags".to_string(),
            field: "c".to_string(),
        },
        ContractViolation::DuplicateVariant {
            variant: "Ok".to_string(),
        },
        ContractViolation::StrategyNotApplicable {
            strategy: "approx_abs".to_string(),
            shape: "bytes".to_string(),
        },
    ];

    for violation in violations {
        let err: CheckError = violation.into();
        assert_eq!(err.kind(), CheckErrorKind::ContractViolation);
        assert_eq!(err.code(), "ERR_CONTRACT_VIOLATION");
    }
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (CheckErrorKind::ContractViolation, "ERR_CONTRACT_VIOLATION"),
        (CheckErrorKind::NonComparable, "ERR_NON_COMPARABLE"),
        (CheckErrorKind::ShapeMismatch, "ERR_SHAPE_MISMATCH"),
        (CheckErrorKind::UnknownStrategy, "ERR_UNKNOWN_STRATEGY"),
        (CheckErrorKind::BufferOverflow, "ERR_BUFFER_OVERFLOW"),
        (CheckErrorKind::UndrainedBuffer, "ERR_UNDRAINED_BUFFER"),
        (CheckErrorKind::GenerationAborted, "ERR_GENERATION_ABORTED"),
        (CheckErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (CheckErrorKind::Io, "ERR_IO"),
        (CheckErrorKind::Internal, "ERR_INTERNAL"),
    ];

    let mut codes = std::collections::HashSet::new();
    for (kind, expected) in kinds {
        assert_eq!(kind.code(), expected);
        assert!(codes.insert(expected), "duplicate code {}", expected);
    }
}

#[test]
fn test_builder_fields_and_display() {
    let err = CheckError::new(CheckErrorKind::GenerationAborted)
        .with_op("expect_equal")
        .with_path("field b")
        .with_message("expected value 7, got 1000")
        .with_report("error: expected value 7, got 1000\n");

    assert_eq!(err.op(), Some("expect_equal"));
    assert_eq!(err.path(), Some("field b"));
    assert_eq!(err.report(), Some("error: expected value 7, got 1000\n"));
    assert_eq!(
        err.to_string(),
        "[ERR_GENERATION_ABORTED] in operation 'expect_equal': expected value 7, got 1000 (path: field b)"
    );
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");

    let err: CheckError = io.into();

    assert_eq!(err.kind(), CheckErrorKind::Io);
    assert_eq!(err.message(), "no such file");
    assert!(err.op().is_none());
}

#[test]
fn test_runtime_kinds_are_not_contract_failures() {
    for kind in [
        CheckErrorKind::BufferOverflow,
        CheckErrorKind::UndrainedBuffer,
        CheckErrorKind::GenerationAborted,
        CheckErrorKind::InvalidInput,
        CheckErrorKind::Io,
    ] {
        assert!(!kind.is_contract(), "{:?}", kind);
    }
}
