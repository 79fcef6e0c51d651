//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort a pipeline step.
///
/// Rule violations in transformer packages are not errors of this kind; they are
/// reported as [`TransformerError`](super::TransformerError) diagnostics and never
/// stop the analysis.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{path}': {message}")]
    #[diagnostic(code(transformer::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid configuration '{}': {message}", path.display())]
    #[diagnostic(code(transformer::config::invalid))]
    InvalidConfig {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Frontend Errors
    // =========================================================================
    #[error("Invalid package description '{}': {message}", path.display())]
    #[diagnostic(
        code(transformer::frontend::invalid_package),
        help("The package file must be a JSON document with `name`, `modules` and `symbols` fields")
    )]
    InvalidPackage {
        path: PathBuf,
        message: String,
    },

    #[error("Package '{package}' has no default module")]
    #[diagnostic(
        code(transformer::frontend::missing_default_module),
        help("Mark exactly one module with `\"is_default\": true`")
    )]
    MissingDefaultModule {
        package: String,
    },

    #[error("Unsupported frontend: {name}")]
    #[diagnostic(code(transformer::frontend::unsupported))]
    UnsupportedFrontend {
        name: String,
    },

    // =========================================================================
    // Code Generation Errors
    // =========================================================================
    #[error("Failed to format generated code: {message}")]
    #[diagnostic(code(transformer::codegen::format_failed))]
    FormatFailed {
        message: String,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a formatting error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::FormatFailed {
            message: message.into(),
        }
    }
}
