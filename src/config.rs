//! Configuration loader for the search preset.
//!
//! `defaults/search.default.toml` is embedded into the crate so that docs and runtime
//! behavior stay in sync. Applications layer their own files on top of those defaults
//! via [`Loader`] before deserializing into [`SearchConfig`].

use crate::ast::Grouping;
use crate::evaluation::Associativity;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/search.default.toml");

/// Token spellings and matching rules for [`crate::search`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    pub associativity: Associativity,
    pub case_sensitive: bool,
    pub operators: SearchOperators,
    pub groupings: Vec<Grouping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchOperators {
    pub and: String,
    pub or: String,
    pub not: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            associativity: Associativity::Left,
            case_sensitive: true,
            operators: SearchOperators {
                and: "&&".to_string(),
                or: "||".to_string(),
                not: "!".to_string(),
            },
            groupings: vec![Grouping::new("(", ")")],
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer configuration text, e.g. syntax shipped alongside a query.
    pub fn with_toml(mut self, text: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(text, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SearchConfig, ConfigError> {
    Loader::new().build()
}
