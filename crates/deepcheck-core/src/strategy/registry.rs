//! Strategy registry: resolves patterns against shapes.

use crate::errors::{CheckError, CheckErrorKind, ContractViolation, Result};
use crate::shape::{FloatKind, Shape};
use crate::strategy::pattern::{CompiledPattern, Node, Pattern};
use crate::strategy::predicate::{self, Classifier, Predicate};
use std::collections::BTreeMap;

/// Names the registry answers without any registration
pub const BUILTIN_NAMES: &[&str] = &[
    "bit_equal",
    "value_equal",
    "approx_abs",
    "approx_rel",
    "always_true",
    "always_false",
];

/// Built-in strategies plus user-registered predicates and classifiers
#[derive(Debug, Clone, Default)]
pub struct Registry {
    predicates: BTreeMap<String, Predicate>,
    classifiers: BTreeMap<String, Classifier>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom predicate under `name`
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `name` shadows a built-in or is already taken.
    pub fn register_predicate(&mut self, name: &str, predicate: Predicate) -> Result<()> {
        self.check_free(name)?;
        self.predicates.insert(name.to_string(), predicate);
        Ok(())
    }

    /// Register a classifier usable through [`Pattern::ClassifyNamed`]
    ///
    /// # Errors
    ///
    /// `InvalidInput` when a classifier with this name already exists.
    pub fn register_classifier(&mut self, name: &str, classifier: Classifier) -> Result<()> {
        if self.classifiers.contains_key(name) {
            return Err(CheckError::new(CheckErrorKind::InvalidInput)
                .with_op("register_classifier")
                .with_message(format!("classifier '{}' is already registered", name)));
        }
        self.classifiers.insert(name.to_string(), classifier);
        Ok(())
    }

    fn check_free(&self, name: &str) -> Result<()> {
        if BUILTIN_NAMES.contains(&name) || self.predicates.contains_key(name) {
            return Err(CheckError::new(CheckErrorKind::InvalidInput)
                .with_op("register_predicate")
                .with_message(format!("strategy name '{}' is already taken", name)));
        }
        Ok(())
    }

    /// Validate `pattern` against `shape` and compile it for the engine
    ///
    /// # Errors
    ///
    /// Any contract violation in the pairing: composite/leaf mismatch,
    /// unknown names, inapplicable tolerances, or a non-comparable shape
    /// anywhere under `shape`.
    pub fn resolve(&self, pattern: &Pattern, shape: &Shape) -> Result<CompiledPattern> {
        let root = self.compile(pattern, shape).map_err(|e| e.with_op("resolve"))?;
        tracing::trace!(shape = %shape, pattern = %pattern.describe(), "pattern resolved");
        Ok(CompiledPattern::new(shape.clone(), root))
    }

    /// Value-equal everywhere
    ///
    /// # Errors
    ///
    /// `NonComparable` when `shape` contains an opaque member.
    pub fn default_pattern(&self, shape: &Shape) -> Result<CompiledPattern> {
        self.resolve(&Pattern::Default, shape)
    }

    /// Resolve a pattern for a single leaf shape into its predicate
    ///
    /// # Errors
    ///
    /// `ContractViolation` when either side is composite or the strategy does
    /// not apply to the leaf; `UnknownStrategy` for unregistered names.
    pub fn resolve_leaf(&self, pattern: &Pattern, leaf: &Shape) -> Result<Predicate> {
        if leaf.is_composite() && !pattern.is_composite() {
            return Err(ContractViolation::LeafPatternOnComposite {
                pattern: pattern.describe(),
                shape: leaf.to_string(),
            }
            .into());
        }
        if !leaf.is_leaf() {
            return Err(ContractViolation::NotALeafShape {
                pattern: pattern.describe(),
                shape: leaf.to_string(),
            }
            .into());
        }
        match pattern {
            Pattern::Fields(_) | Pattern::Variants(_) => {
                Err(ContractViolation::CompositePatternOnLeaf {
                    shape: leaf.to_string(),
                }
                .into())
            }
            Pattern::Default => Ok(predicate::value_equal()),
            Pattern::Bool(b) => Ok(predicate::always(*b)),
            Pattern::Named(name) => self.resolve_named(name, leaf),
            Pattern::AbsTolerance(t) => {
                Self::check_tolerance("approx_abs", *t, leaf)?;
                Ok(predicate::approx_abs(*t))
            }
            Pattern::RelTolerance(t) => {
                Self::check_tolerance("approx_rel", *t, leaf)?;
                Ok(predicate::approx_rel(*t))
            }
            Pattern::Classify(c) => Ok(predicate::equivalence(c.clone())),
            Pattern::ClassifyNamed(name) => self
                .classifiers
                .get(name)
                .map(|c| predicate::equivalence(c.clone()))
                .ok_or_else(|| {
                    ContractViolation::UnknownClassifier { name: name.clone() }.into()
                }),
            Pattern::Predicate(p) => Ok(p.clone()),
        }
    }

    fn resolve_named(&self, name: &str, leaf: &Shape) -> Result<Predicate> {
        match name {
            "bit_equal" => Ok(predicate::bit_equal()),
            "value_equal" => Ok(predicate::value_equal()),
            "always_true" => Ok(predicate::always(true)),
            "always_false" => Ok(predicate::always(false)),
            "approx_abs" => Ok(predicate::approx_abs(Self::float_kind(name, leaf)?.epsilon())),
            "approx_rel" => Ok(predicate::approx_rel(
                Self::float_kind(name, leaf)?.relative_tolerance(),
            )),
            custom => self.predicates.get(custom).cloned().ok_or_else(|| {
                ContractViolation::UnknownStrategy {
                    name: custom.to_string(),
                }
                .into()
            }),
        }
    }

    fn float_kind(strategy: &str, leaf: &Shape) -> Result<FloatKind> {
        match leaf {
            Shape::Float(kind) => Ok(*kind),
            other => Err(ContractViolation::StrategyNotApplicable {
                strategy: strategy.to_string(),
                shape: other.to_string(),
            }
            .into()),
        }
    }

    fn check_tolerance(strategy: &str, tolerance: f64, leaf: &Shape) -> Result<()> {
        if !leaf.is_numeric() || !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ContractViolation::StrategyNotApplicable {
                strategy: format!("{}({})", strategy, tolerance),
                shape: leaf.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub(crate) fn compile(&self, pattern: &Pattern, shape: &Shape) -> Result<Node> {
        match shape {
            Shape::Opaque(_) => Err(ContractViolation::NonComparable {
                shape: shape.to_string(),
            }
            .into()),
            Shape::Void => {
                self.resolve_leaf(pattern, shape)?;
                Ok(Node::Void)
            }
            Shape::Sequence { element, .. } => {
                Ok(Node::Sequence(Box::new(self.compile(pattern, element)?)))
            }
            Shape::Optional(inner) => Ok(Node::Optional(Box::new(self.compile(pattern, inner)?))),
            Shape::Result { ok, err } => Ok(Node::Result {
                ok: Box::new(self.compile(pattern, ok)?),
                err: Box::new(self.compile(&Pattern::Default, err)?),
            }),
            Shape::Record(record) => {
                let entries = match pattern {
                    Pattern::Default => &[][..],
                    Pattern::Fields(entries) => entries.as_slice(),
                    Pattern::Variants(_) => {
                        return Err(ContractViolation::CompositeKindMismatch {
                            pattern: pattern.describe(),
                            shape: shape.to_string(),
                        }
                        .into())
                    }
                    leaf => {
                        return Err(ContractViolation::LeafPatternOnComposite {
                            pattern: leaf.describe(),
                            shape: shape.to_string(),
                        }
                        .into())
                    }
                };
                let mut chosen: Vec<Option<&Pattern>> = vec![None; record.fields.len()];
                for (name, sub) in entries {
                    let index =
                        record
                            .field_index(name)
                            .ok_or_else(|| ContractViolation::UnknownField {
                                record: record.name.clone(),
                                field: name.clone(),
                            })?;
                    if chosen[index].replace(sub).is_some() {
                        return Err(ContractViolation::DuplicateField { field: name.clone() }.into());
                    }
                }
                let nodes = record
                    .fields
                    .iter()
                    .zip(chosen)
                    .map(|(field, sub)| self.compile(sub.unwrap_or(&Pattern::Default), &field.shape))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Node::Record(nodes))
            }
            Shape::Union(union) => {
                let entries = match pattern {
                    Pattern::Default => &[][..],
                    Pattern::Variants(entries) => entries.as_slice(),
                    Pattern::Fields(_) => {
                        return Err(ContractViolation::CompositeKindMismatch {
                            pattern: pattern.describe(),
                            shape: shape.to_string(),
                        }
                        .into())
                    }
                    leaf => {
                        return Err(ContractViolation::LeafPatternOnComposite {
                            pattern: leaf.describe(),
                            shape: shape.to_string(),
                        }
                        .into())
                    }
                };
                let mut chosen: Vec<Option<&Pattern>> = vec![None; union.variants.len()];
                for (tag, sub) in entries {
                    let index =
                        union
                            .variant_index(tag)
                            .ok_or_else(|| ContractViolation::UnknownVariant {
                                union: union.name.clone(),
                                variant: tag.clone(),
                            })?;
                    if chosen[index].replace(sub).is_some() {
                        return Err(
                            ContractViolation::DuplicateVariant { variant: tag.clone() }.into()
                        );
                    }
                }
                let nodes = union
                    .variants
                    .iter()
                    .zip(chosen)
                    .map(|(variant, sub)| {
                        self.compile(sub.unwrap_or(&Pattern::Default), &variant.payload)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Node::Union(nodes))
            }
            leaf => Ok(Node::Leaf(self.resolve_leaf(pattern, leaf)?)),
        }
    }
}
