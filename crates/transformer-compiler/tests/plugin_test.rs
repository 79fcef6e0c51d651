use transformer_compiler::codegen::{Formatter, GeneratedUnit};
use transformer_compiler::diagnostic::{DiagnosticCode, Location};
use transformer_compiler::syntax::{
    Annotation, Declaration, Document, Expression, FunctionBody, FunctionDefinition, Module, ModuleMember,
    Package, Parameter, PrimitiveKind, Qualifier, TypeDesc, TypeSymbol,
};
use transformer_compiler::{Compiler, CompilerConfig, CompilerError};

use DiagnosticCode::*;

fn at(line: usize) -> Location {
    Location::new("main.bal", line, 0, line, 40)
}

fn function(name: &str, line: usize) -> FunctionDefinition {
    FunctionDefinition {
        name: name.to_string(),
        qualifiers: vec![],
        annotations: vec![],
        parameters: vec![],
        return_type: None,
        body: FunctionBody::Block,
        location: at(line),
    }
}

fn public_block(name: &str, line: usize) -> ModuleMember {
    let mut func = function(name, line);
    func.qualifiers.push(Qualifier::Public);
    ModuleMember::Function(func)
}

fn transformer(name: &str, line: usize) -> FunctionDefinition {
    let mut func = function(name, line);
    func.qualifiers = vec![Qualifier::Public, Qualifier::Isolated];
    func.parameters.push(Parameter::required("n", TypeDesc::primitive(PrimitiveKind::Int)));
    func.return_type = Some(TypeDesc::primitive(PrimitiveKind::Int));
    func.body = FunctionBody::Expression(Expression::source("n * 2"));
    func
}

fn listener(line: usize) -> ModuleMember {
    ModuleMember::Listener(Declaration::new("ep", at(line)))
}

fn service(line: usize) -> ModuleMember {
    ModuleMember::Service(Declaration::new("/hello", at(line)))
}

fn class(line: usize) -> ModuleMember {
    ModuleMember::Class(Declaration::new("Person", at(line)))
}

fn single_unit(members: Vec<ModuleMember>) -> Package {
    Package::new("sample").with_module(
        Module::new("sample", "sample", true).with_document(Document::new("main", "main.bal", members)),
    )
}

fn sequential() -> Compiler {
    Compiler::new(CompilerConfig {
        parallel: false,
        ..CompilerConfig::default()
    })
}

fn codes(package: &Package) -> Vec<DiagnosticCode> {
    sequential().compile(package).diagnostics.iter().map(|d| d.code()).collect()
}

// The completion check reports at the start of the unit, so E105 sorts first.

#[test]
fn annotated_functions() {
    let mut annotated = function("describe", 4);
    annotated.annotations.push(Annotation {
        name: "display".to_string(),
    });
    let package = single_unit(vec![
        listener(1),
        service(2),
        public_block("greet", 3),
        ModuleMember::Function(annotated),
    ]);
    assert_eq!(codes(&package), vec![E105, E102, E104, E101, E106]);
}

#[test]
fn no_public_isolated_expression_bodied_function() {
    let mut isolated_only = transformer("double", 2);
    isolated_only.qualifiers = vec![Qualifier::Isolated];
    let package = single_unit(vec![
        ModuleMember::Function(function("helper", 1)),
        ModuleMember::Function(isolated_only),
    ]);
    assert_eq!(codes(&package), vec![E105]);
}

#[test]
fn main_entry_point() {
    let package = single_unit(vec![public_block("main", 1)]);
    assert_eq!(codes(&package), vec![E105, E100, E101]);
}

#[test]
fn classes() {
    assert_eq!(codes(&single_unit(vec![class(1)])), vec![E105, E103]);
}

#[test]
fn services() {
    assert_eq!(codes(&single_unit(vec![service(1)])), vec![E105, E104]);
}

#[test]
fn listeners() {
    let package = single_unit(vec![listener(1), service(2), class(3)]);
    assert_eq!(codes(&package), vec![E105, E102, E104, E103]);
}

#[test]
fn public_functions() {
    let package = single_unit(vec![listener(1), service(2), public_block("greet", 3)]);
    assert_eq!(codes(&package), vec![E105, E102, E104, E101]);
}

#[test]
fn valid_package() {
    let package = single_unit(vec![
        ModuleMember::TypeDefinition(Declaration::new("Person", at(1))),
        ModuleMember::Constant(Declaration::new("FACTOR", at(2))),
        ModuleMember::Function(function("helper", 3)),
        ModuleMember::Function(transformer("double", 4)),
    ]);

    let result = sequential().compile(&package);
    assert!(!result.has_errors());
    assert_eq!(result.transformers, vec!["double"]);

    let source = result.generated.unwrap();
    assert_eq!(source.file_name(), "service.bal");
    assert!(source.content.contains("resource function post double(@http:Payload doublePayload payload)"));
    assert!(!source.content.contains("helper"));
}

struct FailingFormatter;

impl Formatter for FailingFormatter {
    fn format(&self, _unit: &GeneratedUnit) -> Result<String, CompilerError> {
        Err(CompilerError::format("syntax tree could not be formatted"))
    }
}

#[test]
fn valid_package_with_failing_code_generation() {
    let package = single_unit(vec![ModuleMember::Function(transformer("double", 1))]);
    let result = sequential().with_formatter(FailingFormatter).compile(&package);

    assert!(result.diagnostics.is_empty());
    assert!(result.generated.is_none());
    assert_eq!(result.transformers, vec!["double"]);
}

#[test]
fn transformer_in_any_unit_satisfies_completion() {
    let module = Module::new("sample", "sample", true)
        .with_document(Document::new("a", "a.bal", vec![]))
        .with_document(Document::new("b", "b.bal", vec![]))
        .with_document(Document::new(
            "c",
            "c.bal",
            vec![ModuleMember::Function(transformer("double", 1))],
        ));
    let package = Package::new("sample").with_module(module);

    assert!(codes(&package).is_empty());
    assert!(Compiler::new(CompilerConfig::default()).check(&package).is_empty());
}

#[test]
fn completion_fires_once_for_many_units() {
    let mut module = Module::new("sample", "sample", true);
    for i in 0..32 {
        module = module.with_document(Document::new(format!("u{}", i), format!("u{}.bal", i), vec![]));
    }
    let package = Package::new("sample").with_module(module);

    for parallel in [false, true] {
        let compiler = Compiler::new(CompilerConfig {
            parallel,
            ..CompilerConfig::default()
        });
        let diagnostics = compiler.check(&package);
        assert_eq!(diagnostics.len(), 1, "parallel = {}", parallel);
        assert_eq!(diagnostics[0].code(), E105);
    }
}

#[test]
fn parallel_and_sequential_agree() {
    let mut module = Module::new("sample", "sample", true);
    for i in 0..16 {
        let members = vec![
            ModuleMember::Class(Declaration::new("C", Location::new(format!("u{}.bal", i), 1, 0, 1, 5))),
            ModuleMember::Function({
                let mut func = transformer(&format!("f{}", i), 2);
                func.location = Location::new(format!("u{}.bal", i), 2, 0, 2, 40);
                func
            }),
        ];
        module = module.with_document(Document::new(format!("u{}", i), format!("u{}.bal", i), members));
    }
    let package = Package::new("sample").with_module(module);

    let sequential = sequential().compile(&package);
    let parallel = Compiler::new(CompilerConfig::default()).compile(&package);

    assert_eq!(sequential.diagnostics, parallel.diagnostics);
    assert_eq!(sequential.transformers, parallel.transformers);
    assert_eq!(sequential.generated, parallel.generated);
    assert_eq!(sequential.diagnostics.len(), 16);
}

#[test]
fn compilation_errors_skip_validation() {
    let mut package = Package::new("sample").with_module(
        Module::new("sample", "sample", true)
            .with_document(Document::new("a", "a.bal", vec![class(1)]))
            .with_document(Document::new("b", "b.bal", vec![listener(1)])),
    );
    package.has_compilation_errors = true;

    for parallel in [false, true] {
        let compiler = Compiler::new(CompilerConfig {
            parallel,
            ..CompilerConfig::default()
        });
        let result = compiler.compile(&package);
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![E109]);
        assert!(result.transformers.is_empty());
    }
}

#[test]
fn functions_outside_default_module_are_not_exposed() {
    let package = Package::new("sample")
        .with_module(
            Module::new("sample", "sample", true)
                .with_document(Document::new("main", "main.bal", vec![ModuleMember::Function(transformer("double", 1))])),
        )
        .with_module(
            Module::new("sample.util", "util", false).with_document(Document::new(
                "util",
                "modules/util/util.bal",
                vec![ModuleMember::Function(transformer("triple", 1)), class(2)],
            )),
        );

    let result = sequential().compile(&package);
    // Member rules still apply to every module.
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code()).collect();
    assert_eq!(codes, vec![E103]);
    assert_eq!(result.transformers, vec!["double"]);
    assert!(!result.generated.unwrap().content.contains("triple"));
}

#[test]
fn record_types_resolve_through_symbols() {
    let mut to_person = transformer("toPerson", 1);
    to_person.return_type = Some(TypeDesc::named("Person"));
    let mut to_handle = transformer("toHandle", 2);
    to_handle.return_type = Some(TypeDesc::named("Handle"));

    let mut package = single_unit(vec![ModuleMember::Function(to_person), ModuleMember::Function(to_handle)]);
    package.symbols.insert("Person", TypeSymbol::Record);
    package.symbols.insert("Handle", TypeSymbol::Other("object".to_string()));

    let result = sequential().compile(&package);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code(), E108);
    assert_eq!(result.diagnostics[0].args(), vec!["toHandle"]);

    // Rejected functions are still transformer functions and still generated.
    let content = result.generated.unwrap().content;
    assert!(content.contains("returns Person|error"));
    assert!(content.contains("returns Handle|error"));
}
