//! Diagnostic reporting channel.

use parking_lot::Mutex;

use super::{Diagnostic, DiagnosticCode};

/// Receives diagnostics as the analysis produces them.
///
/// Units may be analyzed on several threads at once, so sinks must accept
/// reports through a shared reference.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// A sink that keeps every diagnostic in report order.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }

    /// Number of reported diagnostics with the given code.
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.code() == code)
            .count()
    }

    /// Copies the diagnostics reported so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code(), location = %diagnostic.location, "diagnostic reported");
        self.diagnostics.lock().push(diagnostic);
    }
}
