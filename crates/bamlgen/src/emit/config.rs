//! Configuration for BAML emission.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for BAML emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spaces before each field or enum value line.
    #[serde(alias = "indent_width")]
    pub indent_size: usize,
    /// Whether to attach `@description(...)` annotations.
    pub include_descriptions: bool,
    /// Whether to emit every type reachable from the roots, or only the roots.
    pub include_dependencies: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: 2,
            include_descriptions: true,
            include_dependencies: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidConfig)
    }

    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    pub fn include_descriptions(mut self, value: bool) -> Self {
        self.include_descriptions = value;
        self
    }

    pub fn include_dependencies(mut self, value: bool) -> Self {
        self.include_dependencies = value;
        self
    }

    pub(crate) fn indent(&self) -> String {
        " ".repeat(self.indent_size)
    }
}
