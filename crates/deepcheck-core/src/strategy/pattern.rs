//! Declarative patterns and their compiled form.

use crate::errors::{ContractViolation, Result};
use crate::shape::Shape;
use crate::strategy::predicate::{Classifier, Predicate};
use crate::strategy::registry::Registry;
use crate::value::Value;

/// A tree assigning strategies to the leaves of a shape
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Value-equal at every leaf
    Default,
    /// `true` resolves to always-true, `false` to always-false
    Bool(bool),
    /// Symbolic strategy name, looked up in the [`Registry`]
    Named(String),
    /// Absolute tolerance for numeric leaves
    AbsTolerance(f64),
    /// Relative tolerance for numeric leaves
    RelTolerance(f64),
    /// Equivalence class computed by the supplied classifier
    Classify(Classifier),
    /// Equivalence class computed by a classifier registered under this name
    ClassifyNamed(String),
    /// Custom leaf predicate, used as given
    Predicate(Predicate),
    /// Per-field patterns for a record; unnamed fields take the default
    Fields(Vec<(String, Pattern)>),
    /// Per-variant patterns for a union; unnamed variants take the default
    Variants(Vec<(String, Pattern)>),
}

impl Pattern {
    pub fn named(name: impl Into<String>) -> Self {
        Pattern::Named(name.into())
    }

    pub fn bit_equal() -> Self {
        Pattern::named("bit_equal")
    }

    pub fn value_equal() -> Self {
        Pattern::named("value_equal")
    }

    /// Absolute tolerance of the leaf type's epsilon
    pub fn approx_abs() -> Self {
        Pattern::named("approx_abs")
    }

    /// Relative tolerance of the square root of the leaf type's epsilon
    pub fn approx_rel() -> Self {
        Pattern::named("approx_rel")
    }

    pub fn always(result: bool) -> Self {
        Pattern::Bool(result)
    }

    pub fn predicate<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&Value<'_>, &Value<'_>) -> bool + Send + Sync + 'static,
    {
        Pattern::Predicate(Predicate::new(name, func))
    }

    pub fn classified_by<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&Value<'_>) -> i64 + Send + Sync + 'static,
    {
        Pattern::Classify(Classifier::new(name, func))
    }

    pub fn fields<N: Into<String>>(fields: impl IntoIterator<Item = (N, Pattern)>) -> Self {
        Pattern::Fields(fields.into_iter().map(|(n, p)| (n.into(), p)).collect())
    }

    pub fn variants<N: Into<String>>(variants: impl IntoIterator<Item = (N, Pattern)>) -> Self {
        Pattern::Variants(variants.into_iter().map(|(n, p)| (n.into(), p)).collect())
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Pattern::Fields(_) | Pattern::Variants(_))
    }

    /// Short description used in contract-violation messages
    pub fn describe(&self) -> String {
        match self {
            Pattern::Default => "default".to_string(),
            Pattern::Bool(b) => b.to_string(),
            Pattern::Named(n) => n.clone(),
            Pattern::AbsTolerance(t) => format!("approx_abs({})", t),
            Pattern::RelTolerance(t) => format!("approx_rel({})", t),
            Pattern::Classify(c) => format!("equivalence_class({})", c.name()),
            Pattern::ClassifyNamed(n) => format!("equivalence_class({})", n),
            Pattern::Predicate(p) => p.name().to_string(),
            Pattern::Fields(_) => "per-field".to_string(),
            Pattern::Variants(_) => "per-variant".to_string(),
        }
    }
}

/// Resolved strategy tree, index-aligned with the shape it was compiled for
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Void,
    Leaf(Predicate),
    Sequence(Box<Node>),
    Record(Vec<Node>),
    Union(Vec<Node>),
    Optional(Box<Node>),
    Result { ok: Box<Node>, err: Box<Node> },
}

/// A pattern validated against a shape; reusable across comparisons
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    shape: Shape,
    pub(crate) root: Node,
}

impl CompiledPattern {
    pub(crate) fn new(shape: Shape, root: Node) -> Self {
        Self { shape, root }
    }

    /// Shape this pattern was validated against
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Fluent construction of a composite pattern, validated per entry.
///
/// The builder targets the record or union reached through any transparent
/// containers of `shape`; every [`PatternBuilder::field`] or
/// [`PatternBuilder::variant`] call resolves its sub-pattern against the
/// member's shape on the spot.
///
/// ```
/// use deepcheck_core::shape::Shape;
/// use deepcheck_core::strategy::{Pattern, PatternBuilder, Registry};
///
/// # fn main() -> deepcheck_core::Result<()> {
/// let shape = Shape::record("Sample", [("mean", Shape::Float(deepcheck_core::shape::FloatKind::F64))]);
/// let registry = Registry::new();
/// let pattern = PatternBuilder::new(&registry, &shape)?
///     .field("mean", Pattern::approx_rel())?
///     .build()?;
/// assert_eq!(pattern.shape(), &shape);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PatternBuilder<'r> {
    registry: &'r Registry,
    shape: Shape,
    entries: Vec<(String, Pattern)>,
    by_variant: bool,
}

impl<'r> PatternBuilder<'r> {
    /// # Errors
    ///
    /// `ContractViolation` when no record or union sits beneath `shape`.
    pub fn new(registry: &'r Registry, shape: &Shape) -> Result<Self> {
        let by_variant = match shape.innermost() {
            Shape::Record(_) => false,
            Shape::Union(_) => true,
            other => {
                return Err(ContractViolation::CompositePatternOnLeaf {
                    shape: other.to_string(),
                }
                .into())
            }
        };
        Ok(Self {
            registry,
            shape: shape.clone(),
            entries: Vec::new(),
            by_variant,
        })
    }

    /// # Errors
    ///
    /// Unknown or repeated field, a union target, or a sub-pattern that does
    /// not fit the field's shape.
    pub fn field(mut self, name: &str, pattern: Pattern) -> Result<Self> {
        let Shape::Record(record) = self.shape.innermost() else {
            return Err(ContractViolation::CompositeKindMismatch {
                pattern: "per-field".to_string(),
                shape: self.shape.innermost().to_string(),
            }
            .into());
        };
        let index = record
            .field_index(name)
            .ok_or_else(|| ContractViolation::UnknownField {
                record: record.name.clone(),
                field: name.to_string(),
            })?;
        if self.entries.iter().any(|(n, _)| n == name) {
            return Err(ContractViolation::DuplicateField {
                field: name.to_string(),
            }
            .into());
        }
        self.registry
            .compile(&pattern, &record.fields[index].shape)?;
        self.entries.push((name.to_string(), pattern));
        Ok(self)
    }

    /// # Errors
    ///
    /// Unknown or repeated variant, a record target, or a sub-pattern that
    /// does not fit the payload's shape.
    pub fn variant(mut self, tag: &str, pattern: Pattern) -> Result<Self> {
        let Shape::Union(union) = self.shape.innermost() else {
            return Err(ContractViolation::CompositeKindMismatch {
                pattern: "per-variant".to_string(),
                shape: self.shape.innermost().to_string(),
            }
            .into());
        };
        let index = union
            .variant_index(tag)
            .ok_or_else(|| ContractViolation::UnknownVariant {
                union: union.name.clone(),
                variant: tag.to_string(),
            })?;
        if self.entries.iter().any(|(n, _)| n == tag) {
            return Err(ContractViolation::DuplicateVariant {
                variant: tag.to_string(),
            }
            .into());
        }
        self.registry
            .compile(&pattern, &union.variants[index].payload)?;
        self.entries.push((tag.to_string(), pattern));
        Ok(self)
    }

    /// # Errors
    ///
    /// Propagates any violation found while compiling the full tree.
    pub fn build(self) -> Result<CompiledPattern> {
        let pattern = if self.by_variant {
            Pattern::Variants(self.entries)
        } else {
            Pattern::Fields(self.entries)
        };
        self.registry.resolve(&pattern, &self.shape)
    }
}
