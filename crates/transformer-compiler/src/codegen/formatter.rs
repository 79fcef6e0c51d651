//! Serialization of a [`GeneratedUnit`] to source text.

use crate::diagnostic::CompilerError;
use crate::syntax::{Argument, Expression, TypeDesc};
use super::tree::{
    ConfigurableVar, GeneratedUnit, ImportDecl, PayloadRecord, ResourceMethod, ServiceDecl,
};

/// Turns a generated unit into source text.
pub trait Formatter: Send + Sync {
    fn format(&self, unit: &GeneratedUnit) -> Result<String, CompilerError>;
}

/// Renders Ballerina source with one blank line between top-level declarations.
#[derive(Debug, Clone)]
pub struct SourceFormatter {
    indent: usize,
}

impl Default for SourceFormatter {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl SourceFormatter {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    fn pad(&self, level: usize) -> String {
        " ".repeat(self.indent * level)
    }

    fn write_import(&self, output: &mut String, import: &ImportDecl) -> Result<(), CompilerError> {
        check_identifier(&import.org)?;
        check_identifier(&import.module)?;
        output.push_str(&format!("import {}/{};\n", import.org, import.module));
        Ok(())
    }

    fn write_configurable(&self, output: &mut String, var: &ConfigurableVar) -> Result<(), CompilerError> {
        check_identifier(&var.name)?;
        output.push_str(&format!(
            "configurable {} {} = {};\n",
            var.type_desc,
            var.name,
            render_expression(&var.default)?
        ));
        Ok(())
    }

    fn write_service(&self, output: &mut String, service: &ServiceDecl) -> Result<(), CompilerError> {
        output.push_str(&format!(
            "service {} on {} {{\n",
            service.base_path,
            render_expression(&service.listener)?
        ));
        for (i, resource) in service.resources.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            self.write_resource(output, resource)?;
        }
        output.push_str("}\n");
        Ok(())
    }

    fn write_resource(&self, output: &mut String, resource: &ResourceMethod) -> Result<(), CompilerError> {
        check_identifier(&resource.accessor)?;
        check_identifier(&resource.path)?;

        let params = match &resource.payload {
            Some(payload) => {
                check_identifier(&payload.type_name)?;
                check_identifier(&payload.name)?;
                format!("@{} {} {}", payload.annotation, payload.type_name, payload.name)
            }
            None => String::new(),
        };

        output.push_str(&format!(
            "{}resource function {} {}({}) returns {}|error {{\n",
            self.pad(1),
            resource.accessor,
            resource.path,
            params,
            render_union_arm(&resource.returns)
        ));
        output.push_str(&format!("{}return {};\n", self.pad(2), render_expression(&resource.body)?));
        output.push_str(&format!("{}}}\n", self.pad(1)));
        Ok(())
    }

    fn write_record(&self, output: &mut String, record: &PayloadRecord) -> Result<(), CompilerError> {
        check_identifier(&record.name)?;
        output.push_str(&format!("public type {} record {{\n", record.name));
        for field in &record.fields {
            check_identifier(&field.name)?;
            let marker = if field.optional { "?" } else { "" };
            output.push_str(&format!("{}{} {}{};\n", self.pad(1), field.type_desc, field.name, marker));
        }
        output.push_str("};\n");
        Ok(())
    }
}

impl Formatter for SourceFormatter {
    fn format(&self, unit: &GeneratedUnit) -> Result<String, CompilerError> {
        let mut sections = Vec::new();

        let mut imports = String::new();
        for import in &unit.imports {
            self.write_import(&mut imports, import)?;
        }
        sections.push(imports);

        let mut configurables = String::new();
        for var in &unit.configurables {
            self.write_configurable(&mut configurables, var)?;
        }
        sections.push(configurables);

        let mut service = String::new();
        self.write_service(&mut service, &unit.service)?;
        sections.push(service);

        for record in &unit.records {
            let mut text = String::new();
            self.write_record(&mut text, record)?;
            sections.push(text);
        }

        let sections: Vec<_> = sections.into_iter().filter(|s| !s.is_empty()).collect();
        Ok(sections.join("\n"))
    }
}

/// A type used as one arm of a union; nested unions are parenthesized.
fn render_union_arm(desc: &TypeDesc) -> String {
    match desc {
        TypeDesc::Union(_) => format!("({})", desc),
        _ => desc.to_string(),
    }
}

fn render_expression(expr: &Expression) -> Result<String, CompilerError> {
    Ok(match expr {
        Expression::Name(name) => {
            check_identifier(name)?;
            name.clone()
        }
        Expression::FieldAccess { target, field } => {
            check_identifier(field)?;
            format!("{}.{}", render_expression(target)?, field)
        }
        Expression::Elvis { lhs, rhs } => {
            let right = render_expression(rhs)?;
            if is_atomic(rhs) {
                format!("{} ?: {}", render_expression(lhs)?, right)
            } else {
                format!("{} ?: ({})", render_expression(lhs)?, right)
            }
        }
        Expression::List(items) => {
            let items = items.iter().map(render_expression).collect::<Result<Vec<_>, _>>()?;
            format!("[{}]", items.join(", "))
        }
        Expression::Call { function, arguments } => {
            check_identifier(function)?;
            format!("{}({})", function, render_arguments(arguments)?)
        }
        Expression::New { type_name, arguments } => {
            if let Some(module) = &type_name.module {
                check_identifier(module)?;
            }
            check_identifier(&type_name.name)?;
            format!("new {}({})", type_name, render_arguments(arguments)?)
        }
        Expression::IntLiteral(value) => value.to_string(),
        Expression::Source(text) => {
            if text.trim().is_empty() {
                return Err(CompilerError::format("empty expression"));
            }
            text.clone()
        }
    })
}

fn render_arguments(arguments: &[Argument]) -> Result<String, CompilerError> {
    let rendered = arguments
        .iter()
        .map(|arg| match arg {
            Argument::Positional(expr) => render_expression(expr),
            Argument::Rest(expr) => {
                let inner = render_expression(expr)?;
                Ok(match expr {
                    Expression::Name(_) | Expression::FieldAccess { .. } | Expression::List(_) => {
                        format!("...{}", inner)
                    }
                    _ => format!("...({})", inner),
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(", "))
}

/// Expressions that bind at least as tightly as `?:` on its right-hand side.
fn is_atomic(expr: &Expression) -> bool {
    match expr {
        Expression::Name(_)
        | Expression::FieldAccess { .. }
        | Expression::List(_)
        | Expression::Call { .. }
        | Expression::New { .. }
        | Expression::IntLiteral(_) => true,
        Expression::Elvis { .. } => false,
        Expression::Source(text) => is_atomic_source(text.trim()),
    }
}

/// A single literal or name: `"Hello"`, `1.5`, `true`, `()`, `xs`, `a.b`.
fn is_atomic_source(text: &str) -> bool {
    if text == "()" {
        return true;
    }
    if let Some(inner) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        let mut escaped = false;
        for c in inner.chars() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => return false,
                _ => {}
            }
        }
        return !escaped;
    }
    !text.is_empty() && text.chars().all(|c| is_identifier_char(c) || c == '.' || c == '\'')
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Accepts plain identifiers (`größe`, `_n1`) and quoted ones (`'limit`).
fn check_identifier(name: &str) -> Result<(), CompilerError> {
    let valid = match name.strip_prefix('\'') {
        Some(quoted) => !quoted.is_empty() && quoted.chars().all(is_identifier_char),
        None => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => (first.is_alphabetic() || first == '_') && chars.all(is_identifier_char),
                None => false,
            }
        }
    };
    if valid {
        Ok(())
    } else {
        Err(CompilerError::format(format!("invalid identifier '{}'", name)))
    }
}
