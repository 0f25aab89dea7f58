//! Cloning configuration
//!
//! Plain owned data handed to each dispatcher or cloner at construction.
//! Nothing here is process-wide.

use serde::{Deserialize, Serialize};

/// Which fields the field cloner copies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldScope {
    /// Only fields declared directly on the concrete runtime type.
    /// Inherited slots keep the values the constructor gave them.
    #[default]
    Declared,
    /// Every field in the type hierarchy
    Hierarchy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneConfig {
    /// Allow non-public constructors, fields and self-copy operations.
    /// Sealed members stay out of reach either way.
    pub access_override: bool,

    pub field_scope: FieldScope,
}

impl Default for CloneConfig {
    fn default() -> Self {
        CloneConfig {
            access_override: true,
            field_scope: FieldScope::Declared,
        }
    }
}

impl CloneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_access_override(mut self, enabled: bool) -> Self {
        self.access_override = enabled;
        self
    }

    pub fn with_field_scope(mut self, scope: FieldScope) -> Self {
        self.field_scope = scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CloneConfig::new();
        assert!(cfg.access_override);
        assert_eq!(cfg.field_scope, FieldScope::Declared);
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = CloneConfig::from_json_str(r#"{ "field_scope": "hierarchy" }"#).unwrap();
        assert!(cfg.access_override);
        assert_eq!(cfg.field_scope, FieldScope::Hierarchy);
    }

    #[test]
    fn test_from_json_rejects_unknown_scope() {
        assert!(CloneConfig::from_json_str(r#"{ "field_scope": "everything" }"#).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = CloneConfig::new().with_access_override(false);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(CloneConfig::from_json_str(&json).unwrap(), cfg);
    }
}
