use thiserror::Error;

/// Result type alias using CheckError
pub type Result<T> = std::result::Result<T, CheckError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Mismatches are not errors: they are returned as data. Every kind below is
/// one of the fatal classes (contract violation or resource misuse) or an
/// integration failure at the edges (CLI input, IO).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckErrorKind {
    // Contract violations
    ContractViolation,
    NonComparable,
    ShapeMismatch,
    UnknownStrategy,

    // Resource misuse
    BufferOverflow,
    UndrainedBuffer,
    /// A failed assertion inside a fixed (non-allocating) scope
    GenerationAborted,

    // Integration
    InvalidInput,
    Io,

    // Internal
    Internal,
}

impl CheckErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            CheckErrorKind::ContractViolation => "ERR_CONTRACT_VIOLATION",
            CheckErrorKind::NonComparable => "ERR_NON_COMPARABLE",
            CheckErrorKind::ShapeMismatch => "ERR_SHAPE_MISMATCH",
            CheckErrorKind::UnknownStrategy => "ERR_UNKNOWN_STRATEGY",
            CheckErrorKind::BufferOverflow => "ERR_BUFFER_OVERFLOW",
            CheckErrorKind::UndrainedBuffer => "ERR_UNDRAINED_BUFFER",
            CheckErrorKind::GenerationAborted => "ERR_GENERATION_ABORTED",
            CheckErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            CheckErrorKind::Io => "ERR_IO",
            CheckErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for the kinds that break the comparison contract itself
    pub fn is_contract(&self) -> bool {
        matches!(
            self,
            CheckErrorKind::ContractViolation
                | CheckErrorKind::NonComparable
                | CheckErrorKind::ShapeMismatch
                | CheckErrorKind::UnknownStrategy
        )
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct CheckError {
    kind: CheckErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
    report: Option<String>,
}

impl CheckError {
    /// Create a new error with the specified kind
    pub fn new(kind: CheckErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
            report: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the mismatch path (rendered) at which the error surfaced
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the drained diagnostic text that accompanies an aborted scope
    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Some(report.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> CheckErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the mismatch path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the diagnostic report carried by a `GenerationAborted` error
    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for CheckError {}

impl From<std::io::Error> for CheckError {
    fn from(err: std::io::Error) -> Self {
        CheckError::new(CheckErrorKind::Io).with_message(err.to_string())
    }
}

// ========== End Error Facility ==========

/// Precise contract violations raised while resolving patterns or walking values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractViolation {
    /// A per-field/per-variant pattern was applied to a leaf shape
    #[error("composite pattern applied to leaf shape {shape}")]
    CompositePatternOnLeaf { shape: String },

    /// A leaf strategy was applied to a record or union shape
    #[error("leaf pattern '{pattern}' applied to composite shape {shape}")]
    LeafPatternOnComposite { pattern: String, shape: String },

    /// A leaf was resolved against a container or composite shape
    #[error("pattern '{pattern}' needs a leaf shape, got {shape}")]
    NotALeafShape { pattern: String, shape: String },

    /// A field pattern was applied to a union, or a variant pattern to a record
    #[error("{pattern} pattern does not fit shape {shape}")]
    CompositeKindMismatch { pattern: String, shape: String },

    /// Field name not declared by the record shape
    #[error("record {record} has no field '{field}'")]
    UnknownField { record: String, field: String },

    /// Variant tag not declared by the union shape
    #[error("union {union} has no variant '{variant}'")]
    UnknownVariant { union: String, variant: String },

    /// Same field named twice in one composite pattern
    #[error("field '{field}' given more than one pattern")]
    DuplicateField { field: String },

    /// Same variant named twice in one composite pattern
    #[error("variant '{variant}' given more than one pattern")]
    DuplicateVariant { variant: String },

    /// Symbolic strategy name not present in the registry
    #[error("unknown strategy '{name}'")]
    UnknownStrategy { name: String },

    /// Classifier name not present in the registry
    #[error("unknown classifier '{name}'")]
    UnknownClassifier { name: String },

    /// Tolerance-based strategy requested for a non-numeric leaf
    #[error("strategy '{strategy}' is not applicable to leaf shape {shape}")]
    StrategyNotApplicable { strategy: String, shape: String },

    /// Raw references, callables and handles have no comparison semantics
    #[error("shape {shape} is not comparable")]
    NonComparable { shape: String },

    /// A runtime value disagrees with its declared shape
    #[error("value does not conform to shape {shape}: {detail}")]
    ValueShapeMismatch { shape: String, detail: String },
}

impl From<ContractViolation> for CheckError {
    fn from(err: ContractViolation) -> Self {
        let kind = match &err {
            ContractViolation::NonComparable { .. } => CheckErrorKind::NonComparable,
            ContractViolation::ValueShapeMismatch { .. } => CheckErrorKind::ShapeMismatch,
            ContractViolation::UnknownStrategy { .. }
            | ContractViolation::UnknownClassifier { .. } => CheckErrorKind::UnknownStrategy,
            _ => CheckErrorKind::ContractViolation,
        };
        CheckError::new(kind).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_op_and_path() {
        let err = CheckError::new(CheckErrorKind::NonComparable)
            .with_op("compare")
            .with_path("field handle")
            .with_message("shape fn pointer is not comparable");

        let text = err.to_string();
        assert!(text.starts_with("[ERR_NON_COMPARABLE]"));
        assert!(text.contains("in operation 'compare'"));
        assert!(text.contains("(path: field handle)"));
    }

    #[test]
    fn test_contract_kinds() {
        assert!(CheckErrorKind::ContractViolation.is_contract());
        assert!(CheckErrorKind::NonComparable.is_contract());
        assert!(!CheckErrorKind::BufferOverflow.is_contract());
        assert!(!CheckErrorKind::GenerationAborted.is_contract());
    }
}
