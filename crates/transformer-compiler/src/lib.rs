//! # Transformer Compiler
//!
//! This crate checks Ballerina "transformer" packages and generates the HTTP
//! service that exposes their functions. A transformer package is a library of
//! `public isolated` expression-bodied functions; every such function becomes a
//! POST resource whose request body is a generated payload record.
//!
//! ## Architecture
//!
//! ```text
//! Package description (JSON, etc.)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  Loads modules, units and symbols
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Member rules per unit, signature checks
//! │  (parallel)  │  ──► diagnostics TRANSFORMER_ERROR_1xx
//! └──────┬───────┘
//!        │ transformer functions
//!        ▼
//! ┌──────────────┐
//! │   Registry   │  Shared across unit visits
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Service tree + formatter
//! │  (→ .bal)    │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use transformer_compiler::{Compiler, CompilerConfig};
//!
//! let compiler = Compiler::new(CompilerConfig::default());
//! let package = compiler.load_package("package.json".as_ref())?;
//! let result = compiler.compile(&package);
//!
//! if !result.has_errors() {
//!     if let Some(source) = &result.generated {
//!         compiler.write_output(source, "out".as_ref())?;
//!     }
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod registry;
pub mod semantic;
pub mod syntax;
pub mod validate;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use codegen::{Formatter, GeneratedSource, SourceFormatter};
use diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticSink};
use syntax::Package;
use validate::UnitContext;

pub use config::{CodegenConfig, CompilerConfig};
pub use diagnostic::CompilerError;
pub use registry::TransformerRegistry;

/// The main compiler struct that orchestrates the pipeline.
pub struct Compiler {
    config: CompilerConfig,
    formatter: Box<dyn Formatter>,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        let formatter = Box::new(SourceFormatter::new(config.codegen.indent));
        Self { config, formatter }
    }

    /// Replaces the formatter used for generated source.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Loads a package with the configured front end.
    pub fn load_package(&self, path: &Path) -> Result<Package, CompilerError> {
        let mut frontend = frontend::create_frontend(&self.config.frontend)?;
        frontend.load_package(path)
    }

    /// Runs the member rules over every unit of every module.
    ///
    /// Transformer functions of the default module are added to `registry`.
    /// Diagnostics are reported to `sink` in visit order, which is not
    /// deterministic when units are analyzed in parallel.
    #[tracing::instrument(skip_all, fields(package = %package.name, parallel = self.config.parallel))]
    pub fn analyze(&self, package: &Package, registry: &TransformerRegistry, sink: &dyn DiagnosticSink) {
        let units: Vec<UnitContext<'_>> = package
            .modules
            .iter()
            .flat_map(|module| {
                module
                    .all_documents()
                    .map(move |document| UnitContext::new(package, module, document))
            })
            .collect();

        tracing::debug!(units = units.len(), "analyzing package");

        if self.config.parallel {
            units
                .par_iter()
                .for_each(|ctx| validate::analyze_unit(ctx, registry, sink));
        } else {
            for ctx in &units {
                validate::analyze_unit(ctx, registry, sink);
            }
        }
    }

    /// Generates the service for the functions collected in `registry`.
    pub fn generate(&self, registry: &TransformerRegistry) -> Option<GeneratedSource> {
        let functions = registry.functions_in_source_order();
        codegen::generate(&functions, &self.config.codegen, self.formatter.as_ref())
    }

    /// Analyzes the package and generates its service.
    ///
    /// Generation runs even when diagnostics were reported; callers decide
    /// whether the output is written.
    #[tracing::instrument(skip_all, fields(package = %package.name))]
    pub fn compile(&self, package: &Package) -> CompileResult {
        let registry = TransformerRegistry::new();
        let collector = DiagnosticCollector::new();

        self.analyze(package, &registry, &collector);
        let generated = self.generate(&registry);

        let transformers = registry
            .functions_in_source_order()
            .into_iter()
            .map(|f| f.name)
            .collect();

        CompileResult {
            diagnostics: sorted(collector.into_diagnostics()),
            generated,
            transformers,
        }
    }

    /// Analyzes the package without generating code.
    pub fn check(&self, package: &Package) -> Vec<Diagnostic> {
        let registry = TransformerRegistry::new();
        let collector = DiagnosticCollector::new();
        self.analyze(package, &registry, &collector);
        sorted(collector.into_diagnostics())
    }

    /// Writes a generated document into `out_dir` and returns its path.
    pub fn write_output(&self, source: &GeneratedSource, out_dir: &Path) -> Result<PathBuf, CompilerError> {
        std::fs::create_dir_all(out_dir).map_err(|e| CompilerError::io(out_dir, e.to_string()))?;

        let path = out_dir.join(source.file_name());
        std::fs::write(&path, &source.content).map_err(|e| CompilerError::io(&path, e.to_string()))?;

        tracing::info!(path = %path.display(), "generated service written");
        Ok(path)
    }
}

/// Orders diagnostics by location, then code.
fn sorted(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by(|a, b| {
        let key = |d: &Diagnostic| {
            (
                d.location.file.clone(),
                d.location.start_line,
                d.location.start_col,
                d.code(),
            )
        };
        key(a).cmp(&key(b))
    });
    diagnostics
}

/// Result of compiling one package.
#[derive(Debug, Serialize)]
pub struct CompileResult {
    /// Rule violations, ordered by location.
    pub diagnostics: Vec<Diagnostic>,
    /// The generated service, or `None` if formatting failed.
    pub generated: Option<GeneratedSource>,
    /// Names of the transformer functions found in the default module.
    pub transformers: Vec<String>,
}

impl CompileResult {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
