//! Mismatch paths and reports.

use serde::Serialize;
use std::fmt;

/// One step from a value to one of its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Breadcrumb {
    Field(String),
    Index(usize),
    Variant(String),
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breadcrumb::Field(name) => write!(f, "field {}", name),
            Breadcrumb::Index(i) => write!(f, "index {}", i),
            Breadcrumb::Variant(tag) => write!(f, "variant {}", tag),
        }
    }
}

/// Breadcrumbs from the root value to the first divergence
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct MismatchPath(pub Vec<Breadcrumb>);

impl MismatchPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn crumbs(&self) -> &[Breadcrumb] {
        &self.0
    }

    /// True when some breadcrumb names field `name`
    pub fn names_field(&self, name: &str) -> bool {
        self.0
            .iter()
            .any(|c| matches!(c, Breadcrumb::Field(f) if f == name))
    }
}

impl fmt::Display for MismatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        for (i, crumb) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{}", crumb)?;
        }
        Ok(())
    }
}

/// The first point of difference between two values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub path: MismatchPath,
    /// Rendered leaf text of the expected side
    pub expected: String,
    /// Rendered leaf text of the actual side
    pub actual: String,
    /// The local mismatch line, without level label
    pub message: String,
}
