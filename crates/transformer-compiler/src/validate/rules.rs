//! Top-level member rules for transformer packages.

use crate::diagnostic::{Diagnostic, DiagnosticSink, TransformerError};
use crate::ir::{BodyKind, FunctionSpec};
use crate::registry::TransformerRegistry;
use crate::semantic::SemanticModel;
use crate::syntax::{Document, FunctionDefinition, Module, ModuleMember, Package};
use super::signature::{validate_signature, SignatureVerdict};

const MAIN_FUNCTION: &str = "main";

/// Everything the rules need to know about the unit being analyzed.
#[derive(Clone, Copy)]
pub struct UnitContext<'a> {
    pub module: &'a Module,
    pub document: &'a Document,
    /// Whether the front end already reported errors for the package.
    pub package_has_errors: bool,
    pub semantic: &'a dyn SemanticModel,
}

impl<'a> UnitContext<'a> {
    pub fn new(package: &'a Package, module: &'a Module, document: &'a Document) -> Self {
        Self {
            module,
            document,
            package_has_errors: package.has_compilation_errors,
            semantic: &package.symbols,
        }
    }
}

/// Applies the member rules to one unit.
///
/// Test units are ignored. When the package already has compilation errors a
/// single TRANSFORMER_ERROR_109 is reported for the whole run and no member is
/// analyzed. After the last unit of the default module has been visited,
/// TRANSFORMER_ERROR_105 is reported if no transformer function was found in
/// any of them.
pub fn analyze_unit(ctx: &UnitContext<'_>, registry: &TransformerRegistry, sink: &dyn DiagnosticSink) {
    let document = ctx.document;

    if ctx.module.is_test_document(&document.id) {
        tracing::debug!(document = %document.id, "skipping test document");
        return;
    }

    if ctx.package_has_errors {
        if registry.claim_compilation_error_report() {
            sink.report(Diagnostic::error(TransformerError::CompilationErrors, document.location()));
        }
        return;
    }

    tracing::debug!(document = %document.id, members = document.members.len(), "analyzing unit");

    for member in &document.members {
        check_member(ctx, member, registry, sink);
    }

    if ctx.module.is_default
        && registry.mark_unit_visited(ctx.module.document_count())
        && !registry.found_any()
    {
        sink.report(Diagnostic::error(TransformerError::NoTransformerFunction, document.location()));
    }
}

fn check_member(
    ctx: &UnitContext<'_>,
    member: &ModuleMember,
    registry: &TransformerRegistry,
    sink: &dyn DiagnosticSink,
) {
    let report = |error: TransformerError| {
        sink.report(Diagnostic::error(error, member.location().clone()));
    };

    match member {
        ModuleMember::Function(func) => check_function(ctx, func, registry, sink),
        ModuleMember::Listener(_) => report(TransformerError::Listener),
        ModuleMember::Class(_) => report(TransformerError::Class),
        ModuleMember::Service(_) => report(TransformerError::Service),
        ModuleMember::TypeDefinition(_)
        | ModuleMember::ModuleVariable(_)
        | ModuleMember::Constant(_)
        | ModuleMember::Enum(_)
        | ModuleMember::XmlNamespace(_) => {}
        ModuleMember::Annotation(_) | ModuleMember::Other(_) => report(TransformerError::DisallowedMember {
            kind: member.kind_name().to_string(),
        }),
    }
}

fn check_function(
    ctx: &UnitContext<'_>,
    func: &FunctionDefinition,
    registry: &TransformerRegistry,
    sink: &dyn DiagnosticSink,
) {
    let spec = FunctionSpec::from(func);
    let report = |error: TransformerError| {
        sink.report(Diagnostic::error(error, spec.location.clone()));
    };

    if spec.name == MAIN_FUNCTION {
        report(TransformerError::EntryPoint);
    }
    if spec.qualifiers.public && spec.body_kind != BodyKind::ExpressionBodied {
        report(TransformerError::PublicNonExpressionBody);
    }
    if spec.has_annotations {
        report(TransformerError::Annotation);
    }

    if !(ctx.module.is_default && spec.is_transformer()) {
        return;
    }

    match validate_signature(&spec, ctx.semantic) {
        SignatureVerdict::Ok => {}
        SignatureVerdict::ParamsUnsupported => report(TransformerError::UnsupportedParameterType {
            function: spec.name.clone(),
        }),
        SignatureVerdict::ReturnUnsupported => report(TransformerError::UnsupportedReturnType {
            function: spec.name.clone(),
        }),
    }
    registry.register(spec);
}
