//! Diagnostic types for error reporting.

mod error;
mod message;
mod sink;
mod span;

pub use error::CompilerError;
pub use message::{Diagnostic, DiagnosticCode, Severity, TransformerError};
pub use sink::{DiagnosticCollector, DiagnosticSink};
pub use span::Location;
