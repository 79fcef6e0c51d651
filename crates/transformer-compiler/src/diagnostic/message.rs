//! Transformer package rule violations.
//!
//! Every violation carries a stable code (`TRANSFORMER_ERROR_1xx`). The codes and
//! message templates are consumed by other tools, so they must not change.
#![allow(unused_assignments)]

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::Location;

/// Stable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticCode {
    E100,
    E101,
    E102,
    E103,
    E104,
    E105,
    E106,
    E107,
    E108,
    E109,
    E110,
}

impl DiagnosticCode {
    /// The code as reported to the host compiler.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::E100 => "TRANSFORMER_ERROR_100",
            DiagnosticCode::E101 => "TRANSFORMER_ERROR_101",
            DiagnosticCode::E102 => "TRANSFORMER_ERROR_102",
            DiagnosticCode::E103 => "TRANSFORMER_ERROR_103",
            DiagnosticCode::E104 => "TRANSFORMER_ERROR_104",
            DiagnosticCode::E105 => "TRANSFORMER_ERROR_105",
            DiagnosticCode::E106 => "TRANSFORMER_ERROR_106",
            DiagnosticCode::E107 => "TRANSFORMER_ERROR_107",
            DiagnosticCode::E108 => "TRANSFORMER_ERROR_108",
            DiagnosticCode::E109 => "TRANSFORMER_ERROR_109",
            DiagnosticCode::E110 => "TRANSFORMER_ERROR_110",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Diagnostic severity. Every transformer rule violation is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// A violated transformer package rule.
#[allow(unused_assignments)]
#[derive(Error, MietteDiagnostic, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransformerError {
    #[error("Transformer packages are not allowed to have entry points.")]
    #[diagnostic(
        code(TRANSFORMER_ERROR_100),
        help("Remove the `main` function; the generated service is the entry point")
    )]
    EntryPoint,

    #[error("Public qualifiers are allowed only for expression bodied functions.")]
    #[diagnostic(
        code(TRANSFORMER_ERROR_101),
        help("Rewrite the function as `=> expr;` or drop the `public` qualifier")
    )]
    PublicNonExpressionBody,

    #[error("Transformer packages are not allowed to have listeners.")]
    #[diagnostic(code(TRANSFORMER_ERROR_102))]
    Listener,

    #[error("Transformer packages are not allowed to have classes.")]
    #[diagnostic(code(TRANSFORMER_ERROR_103))]
    Class,

    #[error("Transformer packages are not allowed to have services.")]
    #[diagnostic(code(TRANSFORMER_ERROR_104))]
    Service,

    #[error("Transformer packages should have at least one public and isolated expression bodied function.")]
    #[diagnostic(
        code(TRANSFORMER_ERROR_105),
        help("Declare a function as `public isolated function name(...) returns T => expr;` in the default module")
    )]
    NoTransformerFunction,

    #[error("Transformer packages are not allowed to have annotations.")]
    #[diagnostic(code(TRANSFORMER_ERROR_106))]
    Annotation,

    #[error("Transformer function '{function}' has parameters that cannot be bound from an HTTP payload.")]
    #[diagnostic(
        code(TRANSFORMER_ERROR_107),
        help("Parameters must be boolean, int, float, decimal, byte, string, json, records, or arrays, maps and tables of those")
    )]
    UnsupportedParameterType { function: String },

    #[error("Transformer function '{function}' has a return type that cannot be sent as an HTTP response.")]
    #[diagnostic(
        code(TRANSFORMER_ERROR_108),
        help("Return boolean, int, float, decimal, byte, string, json, records, or arrays, maps and tables of those")
    )]
    UnsupportedReturnType { function: String },

    #[error("Transformer validation skipped because the package has compilation errors.")]
    #[diagnostic(code(TRANSFORMER_ERROR_109))]
    CompilationErrors,

    #[error("Transformer packages are not allowed to have '{kind}' declarations.")]
    #[diagnostic(code(TRANSFORMER_ERROR_110))]
    DisallowedMember { kind: String },
}

impl TransformerError {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            TransformerError::EntryPoint => DiagnosticCode::E100,
            TransformerError::PublicNonExpressionBody => DiagnosticCode::E101,
            TransformerError::Listener => DiagnosticCode::E102,
            TransformerError::Class => DiagnosticCode::E103,
            TransformerError::Service => DiagnosticCode::E104,
            TransformerError::NoTransformerFunction => DiagnosticCode::E105,
            TransformerError::Annotation => DiagnosticCode::E106,
            TransformerError::UnsupportedParameterType { .. } => DiagnosticCode::E107,
            TransformerError::UnsupportedReturnType { .. } => DiagnosticCode::E108,
            TransformerError::CompilationErrors => DiagnosticCode::E109,
            TransformerError::DisallowedMember { .. } => DiagnosticCode::E110,
        }
    }

    /// The message with `{0}` in place of its argument, as registered with the host.
    pub fn message_template(&self) -> &'static str {
        match self {
            TransformerError::EntryPoint => "Transformer packages are not allowed to have entry points.",
            TransformerError::PublicNonExpressionBody => {
                "Public qualifiers are allowed only for expression bodied functions."
            }
            TransformerError::Listener => "Transformer packages are not allowed to have listeners.",
            TransformerError::Class => "Transformer packages are not allowed to have classes.",
            TransformerError::Service => "Transformer packages are not allowed to have services.",
            TransformerError::NoTransformerFunction => {
                "Transformer packages should have at least one public and isolated expression bodied function."
            }
            TransformerError::Annotation => "Transformer packages are not allowed to have annotations.",
            TransformerError::UnsupportedParameterType { .. } => {
                "Transformer function '{0}' has parameters that cannot be bound from an HTTP payload."
            }
            TransformerError::UnsupportedReturnType { .. } => {
                "Transformer function '{0}' has a return type that cannot be sent as an HTTP response."
            }
            TransformerError::CompilationErrors => {
                "Transformer validation skipped because the package has compilation errors."
            }
            TransformerError::DisallowedMember { .. } => {
                "Transformer packages are not allowed to have '{0}' declarations."
            }
        }
    }

    /// Arguments substituted into the message template.
    pub fn args(&self) -> Vec<&str> {
        match self {
            TransformerError::UnsupportedParameterType { function }
            | TransformerError::UnsupportedReturnType { function } => vec![function.as_str()],
            TransformerError::DisallowedMember { kind } => vec![kind.as_str()],
            _ => Vec::new(),
        }
    }
}

/// A reported rule violation at a source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    #[serde(serialize_with = "serialize_error")]
    pub error: TransformerError,
    pub severity: Severity,
    pub location: Location,
}

fn serialize_error<S: Serializer>(error: &TransformerError, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;

    let mut state = serializer.serialize_struct("TransformerError", 2)?;
    state.serialize_field("code", &error.code())?;
    state.serialize_field("message", &error.to_string())?;
    state.end()
}

impl Diagnostic {
    pub fn error(error: TransformerError, location: Location) -> Self {
        Self {
            error,
            severity: Severity::Error,
            location,
        }
    }

    pub fn code(&self) -> DiagnosticCode {
        self.error.code()
    }

    pub fn message_template(&self) -> &'static str {
        self.error.message_template()
    }

    pub fn args(&self) -> Vec<&str> {
        self.error.args()
    }

    /// The rendered message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ERROR [{}] {}", self.location, self.code(), self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(TransformerError::EntryPoint.code().as_str(), "TRANSFORMER_ERROR_100");
        assert_eq!(
            TransformerError::DisallowedMember { kind: "x".into() }.code().as_str(),
            "TRANSFORMER_ERROR_110"
        );
    }

    #[test]
    fn template_substitution_matches_display() {
        let error = TransformerError::UnsupportedParameterType {
            function: "convert".to_string(),
        };
        let rendered = error.message_template().replace("{0}", error.args()[0]);
        assert_eq!(rendered, error.to_string());
    }

    #[test]
    fn every_template_without_args_matches_display() {
        let errors = [
            TransformerError::EntryPoint,
            TransformerError::PublicNonExpressionBody,
            TransformerError::Listener,
            TransformerError::Class,
            TransformerError::Service,
            TransformerError::NoTransformerFunction,
            TransformerError::Annotation,
            TransformerError::CompilationErrors,
        ];
        for error in errors {
            assert!(error.args().is_empty());
            assert_eq!(error.message_template(), error.to_string());
        }
    }

    #[test]
    fn diagnostic_display_includes_code_and_location() {
        let diag = Diagnostic::error(TransformerError::Class, Location::new("main.bal", 2, 0, 4, 1));
        assert_eq!(
            diag.to_string(),
            "main.bal:3:1: ERROR [TRANSFORMER_ERROR_103] Transformer packages are not allowed to have classes."
        );
    }

    #[test]
    fn diagnostic_serializes_code_as_string() {
        let diag = Diagnostic::error(TransformerError::Service, Location::file_start("a.bal"));
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["error"]["code"], "TRANSFORMER_ERROR_104");
        assert_eq!(json["severity"], "error");
    }
}
