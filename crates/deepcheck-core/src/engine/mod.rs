//! Deep equality engine
//!
//! Walks two values and a compiled pattern in lockstep, dispatching on the
//! shape at each step. Traversal stops at the first difference: later
//! elements, fields and payloads are never visited.
//!
//! On a difference the leaf writes one `error:` line describing it, and each
//! enclosing frame adds one `info:` context line as the walk unwinds. The
//! buffer therefore reads leaf detail first and root context last.
//!
//! Mismatches are data. Only contract violations (a value that does not fit
//! its declared shape) and buffer overflows come back as `Err`.

pub mod path;

pub use path::{Breadcrumb, Mismatch, MismatchPath};

use crate::buffer::{DiagnosticBuffer, Sink};
use crate::errors::{CheckError, CheckErrorKind, ContractViolation, Result};
use crate::shape::{EnumShape, RecordShape, Shape, UnionShape};
use crate::strategy::pattern::{CompiledPattern, Node};
use crate::strategy::Predicate;
use crate::value::Value;
use crate::visualize::{first_divergence, Visualizer};
use deepcheck_core_types::schema;

/// Outcome of a single comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Equal,
    Mismatch(Mismatch),
}

impl Comparison {
    pub fn is_equal(&self) -> bool {
        matches!(self, Comparison::Equal)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Comparison::Equal => None,
            Comparison::Mismatch(m) => Some(m),
        }
    }
}

/// Compare `expected` and `actual` under `pattern`.
///
/// # Errors
///
/// `ShapeMismatch` when either value does not conform to the pattern's
/// shape; `BufferOverflow` when a fixed buffer fills up while reporting.
pub fn compare<S: Sink>(
    pattern: &CompiledPattern,
    expected: &Value<'_>,
    actual: &Value<'_>,
    buffer: &mut DiagnosticBuffer<S>,
) -> Result<Comparison> {
    let mut walker = Walker {
        visualizer: Visualizer::new(*buffer.config()),
        buffer,
        path: Vec::new(),
    };
    let outcome = walker
        .walk(&pattern.root, pattern.shape(), expected, actual)
        .map_err(|e| e.with_op("compare"))?;

    Ok(match outcome {
        None => Comparison::Equal,
        Some(mismatch) => {
            tracing::debug!(
                event = schema::EVENT_MISMATCH,
                path = %mismatch.path,
                expected = %mismatch.expected,
                actual = %mismatch.actual,
                "values differ"
            );
            Comparison::Mismatch(mismatch)
        }
    })
}

struct Walker<'b, S: Sink> {
    visualizer: Visualizer,
    buffer: &'b mut DiagnosticBuffer<S>,
    path: Vec<Breadcrumb>,
}

type Step = Result<Option<Mismatch>>;

impl<S: Sink> Walker<'_, S> {
    fn walk(&mut self, node: &Node, shape: &Shape, e: &Value<'_>, a: &Value<'_>) -> Step {
        self.conform(shape, e, "expected")?;
        self.conform(shape, a, "actual")?;

        match (node, shape) {
            (_, Shape::Opaque(_)) => Err(self.violation(ContractViolation::NonComparable {
                shape: shape.to_string(),
            })),
            (Node::Void, Shape::Void) => Ok(None),
            (Node::Leaf(pred), Shape::Enum(tags)) => self.enumeration(pred, tags, e, a),
            (Node::Leaf(pred), Shape::Bytes) => self.bytes(pred, e, a),
            (Node::Leaf(pred), leaf) if leaf.is_leaf() => self.scalar(pred, e, a),
            (Node::Sequence(inner), Shape::Sequence { element, len }) => {
                self.sequence(inner, element, *len, shape, e, a)
            }
            (Node::Record(nodes), Shape::Record(record)) => self.record(nodes, record, e, a),
            (Node::Union(nodes), Shape::Union(union)) => self.union(nodes, union, e, a),
            (Node::Optional(inner), Shape::Optional(inner_shape)) => {
                self.optional(inner, inner_shape, shape, e, a)
            }
            (Node::Result { ok, err }, Shape::Result { ok: ok_shape, err: err_shape }) => {
                self.result((&**ok, &**ok_shape), (&**err, &**err_shape), shape, e, a)
            }
            _ => Err(CheckError::new(CheckErrorKind::Internal)
                .with_path(self.rendered_path())
                .with_message(format!("compiled pattern out of step with shape {}", shape))),
        }
    }

    fn scalar(&mut self, pred: &Predicate, e: &Value<'_>, a: &Value<'_>) -> Step {
        if pred.test(e, a) {
            return Ok(None);
        }
        let (expected, actual) = (e.leaf_text(), a.leaf_text());
        let message = format!("expected value {}, got {}", expected, actual);
        self.leaf_mismatch(message, expected, actual)
    }

    fn enumeration(
        &mut self,
        pred: &Predicate,
        tags: &EnumShape,
        e: &Value<'_>,
        a: &Value<'_>,
    ) -> Step {
        if pred.test(e, a) {
            return Ok(None);
        }
        let (Value::Enum(eo), Value::Enum(ao)) = (e, a) else {
            return Ok(None);
        };
        let (en, an) = (tags.variant_name(*eo), tags.variant_name(*ao));
        let message = match (en, an) {
            (Some(en), Some(an)) => format!("expected `{}`, got `{}`", en, an),
            (Some(en), None) => {
                format!("expected `{}`, got ordinal {} (no named variant)", en, ao)
            }
            (None, Some(an)) => {
                format!("expected ordinal {} (no named variant), got `{}`", eo, an)
            }
            (None, None) => format!(
                "expected ordinal {}, got ordinal {} (neither names a variant of {})",
                eo, ao, tags.name
            ),
        };
        let expected = en.map_or_else(|| eo.to_string(), str::to_string);
        let actual = an.map_or_else(|| ao.to_string(), str::to_string);
        self.leaf_mismatch(message, expected, actual)
    }

    fn bytes(&mut self, pred: &Predicate, e: &Value<'_>, a: &Value<'_>) -> Step {
        if pred.test(e, a) {
            return Ok(None);
        }
        let (Value::Bytes(eb), Value::Bytes(ab)) = (e, a) else {
            return Ok(None);
        };
        let message = match first_divergence(eb, ab) {
            Some(at) => format!(
                "byte strings diverge at offset {} (expected {} bytes, got {})",
                at,
                eb.len(),
                ab.len()
            ),
            None => format!("byte strings rejected by strategy `{}`", pred.name()),
        };
        let mismatch = self.leaf_mismatch(message, e.leaf_text(), a.leaf_text())?;
        let rendered = self.visualizer.render_divergence(eb, ab);
        self.buffer.write(rendered.as_bytes())?;
        Ok(mismatch)
    }

    fn sequence(
        &mut self,
        node: &Node,
        element: &Shape,
        len: Option<usize>,
        shape: &Shape,
        e: &Value<'_>,
        a: &Value<'_>,
    ) -> Step {
        let (Value::Sequence(es), Value::Sequence(acts)) = (e, a) else {
            return Ok(None);
        };
        if let Some(n) = len {
            for (side, items) in [("expected", es), ("actual", acts)] {
                if items.len() != n {
                    return Err(self.violation(ContractViolation::ValueShapeMismatch {
                        shape: shape.to_string(),
                        detail: format!("{} side holds {} elements", side, items.len()),
                    }));
                }
            }
        }

        for (i, (ev, av)) in es.iter().zip(acts.iter()).enumerate() {
            let found = self.descend(Breadcrumb::Index(i), node, element, ev, av)?;
            if found.is_some() {
                self.context(format_args!("while comparing index {} of {}", i, shape))?;
                return Ok(found);
            }
        }

        if es.len() != acts.len() {
            let message = format!("expected {} elements, got {}", es.len(), acts.len());
            return self.leaf_mismatch(message, e.leaf_text(), a.leaf_text());
        }
        Ok(None)
    }

    fn record(
        &mut self,
        nodes: &[Node],
        record: &RecordShape,
        e: &Value<'_>,
        a: &Value<'_>,
    ) -> Step {
        let (Value::Record(es), Value::Record(acts)) = (e, a) else {
            return Ok(None);
        };
        for (side, members) in [("expected", es), ("actual", acts)] {
            if members.len() != record.fields.len() {
                return Err(self.violation(ContractViolation::ValueShapeMismatch {
                    shape: format!("record {}", record.name),
                    detail: format!(
                        "{} side holds {} members, shape declares {}",
                        side,
                        members.len(),
                        record.fields.len()
                    ),
                }));
            }
        }

        for (i, field) in record.fields.iter().enumerate() {
            let crumb = match &field.name {
                Some(name) => Breadcrumb::Field(name.clone()),
                None => Breadcrumb::Index(i),
            };
            let found = self.descend(crumb, &nodes[i], &field.shape, &es[i], &acts[i])?;
            if found.is_some() {
                match &field.name {
                    Some(name) => self.context(format_args!(
                        "while comparing field `{}` of record {}",
                        name, record.name
                    ))?,
                    None => self.context(format_args!(
                        "while comparing index {} of {}",
                        i, record.name
                    ))?,
                }
                return Ok(found);
            }
        }
        Ok(None)
    }

    fn union(&mut self, nodes: &[Node], union: &UnionShape, e: &Value<'_>, a: &Value<'_>) -> Step {
        let (Value::Union { tag: et, payload: ep }, Value::Union { tag: at, payload: ap }) = (e, a)
        else {
            return Ok(None);
        };
        for (side, tag) in [("expected", *et), ("actual", *at)] {
            if tag >= union.variants.len() {
                return Err(self.violation(ContractViolation::ValueShapeMismatch {
                    shape: format!("union {}", union.name),
                    detail: format!("{} side has variant index {}", side, tag),
                }));
            }
        }

        let (expected_tag, actual_tag) = (&union.variants[*et].tag, &union.variants[*at].tag);
        if et != at {
            let message = format!("expected variant {}, got {}", expected_tag, actual_tag);
            return self.leaf_mismatch(message, expected_tag.clone(), actual_tag.clone());
        }

        let variant = &union.variants[*et];
        let found = self.descend(
            Breadcrumb::Variant(variant.tag.clone()),
            &nodes[*et],
            &variant.payload,
            ep,
            ap,
        )?;
        if found.is_some() {
            self.context(format_args!(
                "while comparing the payload of variant `{}` of union {}",
                variant.tag, union.name
            ))?;
        }
        Ok(found)
    }

    fn optional(
        &mut self,
        node: &Node,
        inner: &Shape,
        shape: &Shape,
        e: &Value<'_>,
        a: &Value<'_>,
    ) -> Step {
        let (Value::Optional(eo), Value::Optional(ao)) = (e, a) else {
            return Ok(None);
        };
        match (eo, ao) {
            (None, None) => Ok(None),
            (Some(ev), Some(av)) => {
                let found =
                    self.descend(Breadcrumb::Variant("Some".to_string()), node, inner, ev, av)?;
                if found.is_some() {
                    self.context(format_args!("while comparing the value of {}", shape))?;
                }
                Ok(found)
            }
            (Some(ev), None) => {
                let message = format!("expected a value ({}), got none", ev.leaf_text());
                self.leaf_mismatch(message, ev.leaf_text(), "none".to_string())
            }
            (None, Some(av)) => {
                let message = format!("expected none, got a value ({})", av.leaf_text());
                self.leaf_mismatch(message, "none".to_string(), av.leaf_text())
            }
        }
    }

    fn result(
        &mut self,
        (ok_node, ok_shape): (&Node, &Shape),
        (err_node, err_shape): (&Node, &Shape),
        shape: &Shape,
        e: &Value<'_>,
        a: &Value<'_>,
    ) -> Step {
        let (Value::Result(er), Value::Result(ar)) = (e, a) else {
            return Ok(None);
        };
        match (er, ar) {
            (Ok(ev), Ok(av)) => {
                let found =
                    self.descend(Breadcrumb::Variant("Ok".to_string()), ok_node, ok_shape, ev, av)?;
                if found.is_some() {
                    self.context(format_args!("while comparing the payload of {}", shape))?;
                }
                Ok(found)
            }
            (Err(ev), Err(av)) => {
                let found = self.descend(
                    Breadcrumb::Variant("Err".to_string()),
                    err_node,
                    err_shape,
                    ev,
                    av,
                )?;
                if found.is_some() {
                    self.context(format_args!("while comparing the error of {}", shape))?;
                }
                Ok(found)
            }
            (Ok(ev), Err(av)) => {
                let message = format!(
                    "expected a payload ({}), got error {}",
                    ev.leaf_text(),
                    av.leaf_text()
                );
                self.leaf_mismatch(message, ev.leaf_text(), format!("error {}", av.leaf_text()))
            }
            (Err(ev), Ok(av)) => {
                let message = format!(
                    "expected error {}, got a payload ({})",
                    ev.leaf_text(),
                    av.leaf_text()
                );
                self.leaf_mismatch(message, format!("error {}", ev.leaf_text()), av.leaf_text())
            }
        }
    }

    fn descend(
        &mut self,
        crumb: Breadcrumb,
        node: &Node,
        shape: &Shape,
        e: &Value<'_>,
        a: &Value<'_>,
    ) -> Step {
        self.path.push(crumb);
        let found = self.walk(node, shape, e, a);
        self.path.pop();
        found
    }

    fn leaf_mismatch(&mut self, message: String, expected: String, actual: String) -> Step {
        self.buffer.error(format_args!("{}", message))?;
        Ok(Some(Mismatch {
            path: MismatchPath(self.path.clone()),
            expected,
            actual,
            message,
        }))
    }

    fn context(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        self.buffer.info(args)
    }

    fn conform(&self, shape: &Shape, value: &Value<'_>, side: &str) -> Result<()> {
        if value.conforms_to(shape) {
            return Ok(());
        }
        Err(self.violation(ContractViolation::ValueShapeMismatch {
            shape: shape.to_string(),
            detail: format!("{} side is a {} value", side, value.kind_name()),
        }))
    }

    fn violation(&self, violation: ContractViolation) -> CheckError {
        CheckError::from(violation).with_path(self.rendered_path())
    }

    fn rendered_path(&self) -> String {
        MismatchPath(self.path.clone()).to_string()
    }
}
