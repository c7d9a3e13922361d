//! Format registry for expression serialization
//!
//! Each format implements the `Formatter` trait and can be registered with
//! `FormatRegistry`. Formatters receive the snapshot of an expression, so they are
//! independent of the expression's value type.

use crate::ast::{snapshot_from_expression, ExprSnapshot, Expression};
use std::collections::HashMap;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for expression formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    /// Serialize a snapshot to this format
    fn serialize(&self, snapshot: &ExprSnapshot) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Pretty-printed JSON via serde_json
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, snapshot: &ExprSnapshot) -> Result<String, FormatError> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Snapshot of the tree as pretty-printed JSON"
    }
}

/// YAML via serde_yaml
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, snapshot: &ExprSnapshot) -> Result<String, FormatError> {
        serde_yaml::to_string(snapshot).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Snapshot of the tree as YAML"
    }
}

/// Registry of expression formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize an expression using the specified format
    pub fn serialize<T>(&self, expression: &Expression<T>, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(&snapshot_from_expression(expression))
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with default formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::TreevizFormatter);
        registry.register(JsonFormatter);
        registry.register(YamlFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::Parser;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _snapshot: &ExprSnapshot) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
    }

    fn sample() -> Expression<String> {
        Parser::new()
            .binary("&&", |a, b| format!("{a}{b}"))
            .parse("a && b")
            .unwrap()
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert!(!registry.has("nonexistent"));
        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(registry.serialize(&sample(), "test").unwrap(), "test output");
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        match registry.serialize(&sample(), "nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            other => panic!("Expected FormatNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_formats() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["json", "treeviz", "yaml"]);
    }

    #[test]
    fn test_json_round_trips_snapshot() {
        let registry = FormatRegistry::default();
        let json = registry.serialize(&sample(), "json").unwrap();
        let parsed: ExprSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot_from_expression(&sample()));
        assert_eq!(parsed.children[1].attributes["kind"], "binary");
    }

    #[test]
    fn test_yaml_output() {
        let yaml = FormatRegistry::default().serialize(&sample(), "yaml").unwrap();
        assert!(yaml.contains("node_type: Root"));
        assert!(yaml.contains("&&"));
        assert!(yaml.contains("kind: binary"));
    }
}
