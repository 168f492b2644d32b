//! Correlation types for assertion scopes
//!
//! Every assertion scope carries a `ScopeId` so that structured log events
//! emitted by many assertions can be grouped back to the scope that owns the
//! diagnostic buffer they were written to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single assertion scope
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(String);

impl ScopeId {
    /// Generate a new time-ordered ScopeId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization or fixed test ids)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ScopeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_id_generation() {
        let id1 = ScopeId::new();
        let id2 = ScopeId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_scope_id_display() {
        let id = ScopeId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_from_string_keeps_value() {
        let id = ScopeId::from_string("fixed-scope".to_string());
        assert_eq!(id.as_str(), "fixed-scope");
    }

    #[test]
    fn test_parse_round_trips_display() {
        let id = ScopeId::new();
        let parsed: ScopeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_serialization() {
        let id = ScopeId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ScopeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
