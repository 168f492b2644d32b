//! Leaf predicates and the built-in comparison strategies.

use crate::value::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type PredicateFn = dyn Fn(&Value<'_>, &Value<'_>) -> bool + Send + Sync;
type ClassifierFn = dyn Fn(&Value<'_>) -> i64 + Send + Sync;

/// A named binary predicate over two leaves of the same shape
#[derive(Clone)]
pub struct Predicate {
    name: Cow<'static, str>,
    func: Arc<PredicateFn>,
}

impl Predicate {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&Value<'_>, &Value<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the predicate: `true` means the leaves are considered equal
    pub fn test(&self, expected: &Value<'_>, actual: &Value<'_>) -> bool {
        (self.func)(expected, actual)
    }

    /// True when both handles share one underlying function
    pub fn same_as(&self, other: &Predicate) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

/// Maps a leaf to its equivalence class
#[derive(Clone)]
pub struct Classifier {
    name: Cow<'static, str>,
    func: Arc<ClassifierFn>,
}

impl Classifier {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&Value<'_>) -> i64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classify(&self, value: &Value<'_>) -> i64 {
        (self.func)(value)
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Classifier").field(&self.name).finish()
    }
}

/// Bitwise identity. Floats compare by bit pattern, so a NaN equals itself.
pub fn bit_equal() -> Predicate {
    Predicate::new("bit_equal", |a, b| match (a, b) {
        (Value::F32(x), Value::F32(y)) => x.to_bits() == y.to_bits(),
        (Value::F64(x), Value::F64(y)) => x.to_bits() == y.to_bits(),
        _ => leaf_eq(a, b),
    })
}

/// Native equality. Floats follow IEEE rules: NaN never equals anything.
pub fn value_equal() -> Predicate {
    Predicate::new("value_equal", |a, b| match (a, b) {
        (Value::F32(x), Value::F32(y)) => x == y,
        (Value::F64(x), Value::F64(y)) => x == y,
        _ => leaf_eq(a, b),
    })
}

/// `|a - b| <= tolerance`
pub fn approx_abs(tolerance: f64) -> Predicate {
    Predicate::new(format!("approx_abs({})", tolerance), move |a, b| {
        match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y || (x - y).abs() <= tolerance,
            _ => false,
        }
    })
}

/// `|a - b| <= tolerance * max(|a|, |b|)`
pub fn approx_rel(tolerance: f64) -> Predicate {
    Predicate::new(format!("approx_rel({})", tolerance), move |a, b| {
        match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y || (x - y).abs() <= tolerance * x.abs().max(y.abs()),
            _ => false,
        }
    })
}

/// Leaves are equal when the classifier puts them in the same class
pub fn equivalence(classifier: Classifier) -> Predicate {
    let name = format!("equivalence_class({})", classifier.name());
    Predicate::new(name, move |a, b| {
        classifier.classify(a) == classifier.classify(b)
    })
}

pub fn always(result: bool) -> Predicate {
    if result {
        Predicate::new("always_true", |_, _| true)
    } else {
        Predicate::new("always_false", |_, _| false)
    }
}

fn leaf_eq(a: &Value<'_>, b: &Value<'_>) -> bool {
    match (a, b) {
        (Value::Void, Value::Void) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Enum(x), Value::Enum(y)) => x == y,
        (Value::Type(x), Value::Type(y)) => x.id == y.id,
        (Value::Bytes(x), Value::Bytes(y)) => x == y,
        _ => false,
    }
}
