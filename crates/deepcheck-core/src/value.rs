//! Dynamic value tree walked by the comparison engine.
//!
//! A [`Value`] mirrors a [`Shape`]: records hold their members in declaration
//! order, unions hold the index of the active variant. Byte strings borrow
//! from the reflected value where possible.

use crate::shape::Shape;
use std::any::TypeId;
use std::borrow::Cow;

/// Identity of a Rust type, compared by `TypeId` and displayed by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeIdentity {
    pub id: TypeId,
    pub name: &'static str,
}

impl TypeIdentity {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Void,
    Bool(bool),
    Int(i128),
    F32(f32),
    F64(f64),
    /// Ordinal of a symbolic tag
    Enum(i64),
    Type(TypeIdentity),
    Bytes(Cow<'a, [u8]>),
    Sequence(Vec<Value<'a>>),
    Record(Vec<Value<'a>>),
    Union {
        tag: usize,
        payload: Box<Value<'a>>,
    },
    Optional(Option<Box<Value<'a>>>),
    Result(Result<Box<Value<'a>>, Box<Value<'a>>>),
    /// Stand-in for references, callables and handles
    Opaque,
}

impl<'a> Value<'a> {
    pub fn bytes(bytes: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(bytes))
    }

    pub fn variant(tag: usize, payload: Value<'a>) -> Self {
        Value::Union {
            tag,
            payload: Box::new(payload),
        }
    }

    pub fn some(inner: Value<'a>) -> Self {
        Value::Optional(Some(Box::new(inner)))
    }

    pub fn ok(inner: Value<'a>) -> Self {
        Value::Result(Ok(Box::new(inner)))
    }

    pub fn err(inner: Value<'a>) -> Self {
        Value::Result(Err(Box::new(inner)))
    }

    /// Numeric view used by the tolerance strategies
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::F32(f) => Some(f64::from(*f)),
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    /// Short name of the variant, for shape-disagreement errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Enum(_) => "enum",
            Value::Type(_) => "type",
            Value::Bytes(_) => "bytes",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
            Value::Union { .. } => "union",
            Value::Optional(_) => "optional",
            Value::Result(_) => "result",
            Value::Opaque => "opaque",
        }
    }

    /// Whether this value's variant is the one `shape` calls for
    pub fn conforms_to(&self, shape: &Shape) -> bool {
        matches!(
            (shape, self),
            (Shape::Void, Value::Void)
                | (Shape::Bool, Value::Bool(_))
                | (Shape::Int(_), Value::Int(_))
                | (Shape::Float(crate::shape::FloatKind::F32), Value::F32(_))
                | (Shape::Float(crate::shape::FloatKind::F64), Value::F64(_))
                | (Shape::Enum(_), Value::Enum(_))
                | (Shape::TypeIdentity, Value::Type(_))
                | (Shape::Bytes, Value::Bytes(_))
                | (Shape::Sequence { .. }, Value::Sequence(_))
                | (Shape::Record(_), Value::Record(_))
                | (Shape::Union(_), Value::Union { .. })
                | (Shape::Optional(_), Value::Optional(_))
                | (Shape::Result { .. }, Value::Result(_))
                | (Shape::Opaque(_), Value::Opaque)
        )
    }

    /// Leaf text used in mismatch messages
    pub fn leaf_text(&self) -> String {
        match self {
            Value::Void => "()".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::F32(f) => format!("{:?}", f),
            Value::F64(f) => format!("{:?}", f),
            Value::Enum(o) => o.to_string(),
            Value::Type(t) => t.name.to_string(),
            Value::Bytes(b) => format!("{:?}", String::from_utf8_lossy(b)),
            Value::Sequence(items) => format!("{} elements", items.len()),
            Value::Record(_) => "{..}".to_string(),
            Value::Union { tag, .. } => format!("variant #{}", tag),
            Value::Optional(None) => "none".to_string(),
            Value::Optional(Some(inner)) => inner.leaf_text(),
            Value::Result(Ok(inner)) | Value::Result(Err(inner)) => inner.leaf_text(),
            Value::Opaque => "<opaque>".to_string(),
        }
    }
}
