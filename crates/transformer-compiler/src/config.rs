//! Compiler configuration.

use std::path::Path;

use serde::Deserialize;

use crate::diagnostic::CompilerError;

/// Settings for the generated service unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Default value of the generated `port` configurable.
    pub port: u16,

    /// Organization of the HTTP module (`ballerina`).
    pub http_org: String,

    /// Name of the HTTP module, also used as its import prefix.
    pub http_module: String,

    /// Name of the generated document, without extension.
    pub document_name: String,

    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            http_org: "ballerina".to_string(),
            http_module: "http".to_string(),
            document_name: "service".to_string(),
            indent: 4,
        }
    }
}

/// Configuration for the transformer compiler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Front end used to load packages (default: "json").
    pub frontend: String,

    /// Analyze units on the rayon thread pool.
    pub parallel: bool,

    #[serde(flatten)]
    pub codegen: CodegenConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            frontend: "json".to_string(),
            parallel: true,
            codegen: CodegenConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Reads a JSON configuration file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, CompilerError> {
        let text = std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| CompilerError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
