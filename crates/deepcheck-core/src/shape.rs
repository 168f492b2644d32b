//! Shape descriptors
//!
//! A [`Shape`] is the comparison-relevant description of a type: which of the
//! comparison rules applies to it and, for composites, the declared list of
//! fields or variants. Shapes come from the declared type (see
//! [`crate::reflect::Reflect`]), never from runtime content.

use std::fmt;

/// Width and signedness of an integer leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntKind {
    pub bits: u8,
    pub signed: bool,
}

/// Floating point leaf precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatKind {
    F32,
    F64,
}

impl FloatKind {
    /// Machine epsilon of the type, widened to `f64`
    pub fn epsilon(&self) -> f64 {
        match self {
            FloatKind::F32 => f64::from(f32::EPSILON),
            FloatKind::F64 => f64::EPSILON,
        }
    }

    /// Default relative tolerance: the square root of epsilon
    pub fn relative_tolerance(&self) -> f64 {
        self.epsilon().sqrt()
    }
}

/// Why a shape cannot take part in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpaqueKind {
    /// Raw pointers and other non-owning references
    Reference,
    /// Function pointers and closures
    Callable,
    /// Handles whose state lives outside the value (files, sockets, ...)
    Handle,
}

/// One named variant of a symbolic enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: String,
    pub ordinal: i64,
}

/// A symbolic tag: an ordinal that may or may not map to a named variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumShape {
    pub name: String,
    pub variants: Vec<EnumVariant>,
}

impl EnumShape {
    /// Name of the variant carrying `ordinal`, if one is declared
    pub fn variant_name(&self, ordinal: i64) -> Option<&str> {
        self.variants
            .iter()
            .find(|v| v.ordinal == ordinal)
            .map(|v| v.name.as_str())
    }
}

/// A record member; unnamed members (tuples) are addressed by position
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    pub name: Option<String>,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    pub name: String,
    pub fields: Vec<FieldShape>,
}

impl RecordShape {
    /// Declaration index of the field called `name`
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantShape {
    pub tag: String,
    pub payload: Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionShape {
    pub name: String,
    pub variants: Vec<VariantShape>,
}

impl UnionShape {
    /// Declaration index of the variant tagged `tag`
    pub fn variant_index(&self, tag: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.tag == tag)
    }
}

/// Comparison-relevant classification of a type
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Void,
    Bool,
    Int(IntKind),
    Float(FloatKind),
    Enum(EnumShape),
    TypeIdentity,
    /// Byte string leaf, rendered through the visualizer on mismatch
    Bytes,
    /// `len` is `Some` for fixed-size arrays
    Sequence {
        element: Box<Shape>,
        len: Option<usize>,
    },
    Record(RecordShape),
    Union(UnionShape),
    Optional(Box<Shape>),
    Result {
        ok: Box<Shape>,
        err: Box<Shape>,
    },
    Opaque(OpaqueKind),
}

impl Shape {
    pub fn int(bits: u8, signed: bool) -> Self {
        Shape::Int(IntKind { bits, signed })
    }

    pub fn sequence(element: Shape) -> Self {
        Shape::Sequence {
            element: Box::new(element),
            len: None,
        }
    }

    pub fn array(element: Shape, len: usize) -> Self {
        Shape::Sequence {
            element: Box::new(element),
            len: Some(len),
        }
    }

    pub fn optional(inner: Shape) -> Self {
        Shape::Optional(Box::new(inner))
    }

    pub fn result(ok: Shape, err: Shape) -> Self {
        Shape::Result {
            ok: Box::new(ok),
            err: Box::new(err),
        }
    }

    /// Record with named fields, in declaration order
    pub fn record<N: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (N, Shape)>,
    ) -> Self {
        Shape::Record(RecordShape {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(n, shape)| FieldShape {
                    name: Some(n.into()),
                    shape,
                })
                .collect(),
        })
    }

    /// Record with unnamed, positional members
    pub fn tuple(members: impl IntoIterator<Item = Shape>) -> Self {
        let fields: Vec<FieldShape> = members
            .into_iter()
            .map(|shape| FieldShape { name: None, shape })
            .collect();
        let name = format!(
            "({})",
            fields
                .iter()
                .map(|f| f.shape.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Shape::Record(RecordShape { name, fields })
    }

    pub fn union<T: Into<String>>(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = (T, Shape)>,
    ) -> Self {
        Shape::Union(UnionShape {
            name: name.into(),
            variants: variants
                .into_iter()
                .map(|(tag, payload)| VariantShape {
                    tag: tag.into(),
                    payload,
                })
                .collect(),
        })
    }

    pub fn enumeration<T: Into<String>>(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = (T, i64)>,
    ) -> Self {
        Shape::Enum(EnumShape {
            name: name.into(),
            variants: variants
                .into_iter()
                .map(|(n, ordinal)| EnumVariant {
                    name: n.into(),
                    ordinal,
                })
                .collect(),
        })
    }

    /// True for shapes compared directly by a leaf predicate
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Shape::Void
                | Shape::Bool
                | Shape::Int(_)
                | Shape::Float(_)
                | Shape::Enum(_)
                | Shape::TypeIdentity
                | Shape::Bytes
        )
    }

    /// True for records and unions, the shapes that take composite patterns
    pub fn is_composite(&self) -> bool {
        matches!(self, Shape::Record(_) | Shape::Union(_))
    }

    /// True for integer and float leaves
    pub fn is_numeric(&self) -> bool {
        matches!(self, Shape::Int(_) | Shape::Float(_))
    }

    /// Walk through sequences, optionals and result payloads to the first
    /// shape that is not a transparent container
    pub fn innermost(&self) -> &Shape {
        match self {
            Shape::Sequence { element, .. } => element.innermost(),
            Shape::Optional(inner) => inner.innermost(),
            Shape::Result { ok, .. } => ok.innermost(),
            other => other,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Void => write!(f, "()"),
            Shape::Bool => write!(f, "bool"),
            Shape::Int(k) => write!(f, "{}{}", if k.signed { "i" } else { "u" }, k.bits),
            Shape::Float(FloatKind::F32) => write!(f, "f32"),
            Shape::Float(FloatKind::F64) => write!(f, "f64"),
            Shape::Enum(e) => write!(f, "enum {}", e.name),
            Shape::TypeIdentity => write!(f, "type identity"),
            Shape::Bytes => write!(f, "bytes"),
            Shape::Sequence { element, len: None } => write!(f, "[{}]", element),
            Shape::Sequence {
                element,
                len: Some(n),
            } => write!(f, "[{}; {}]", element, n),
            Shape::Record(r) => write!(f, "record {}", r.name),
            Shape::Union(u) => write!(f, "union {}", u.name),
            Shape::Optional(inner) => write!(f, "optional {}", inner),
            Shape::Result { ok, err } => write!(f, "result<{}, {}>", ok, err),
            Shape::Opaque(OpaqueKind::Reference) => write!(f, "reference"),
            Shape::Opaque(OpaqueKind::Callable) => write!(f, "callable"),
            Shape::Opaque(OpaqueKind::Handle) => write!(f, "opaque handle"),
        }
    }
}
