//! Top-level members of a source unit.

use serde::{Deserialize, Serialize};

use crate::diagnostic::Location;
use super::{Expression, TypeDesc};

/// A top-level declaration in a source unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum ModuleMember {
    Function(FunctionDefinition),
    Listener(Declaration),
    Class(Declaration),
    Service(Declaration),
    TypeDefinition(Declaration),
    ModuleVariable(Declaration),
    Constant(Declaration),
    Enum(Declaration),
    XmlNamespace(Declaration),
    Annotation(Declaration),
    /// Any member kind without a dedicated variant, tagged with its syntax kind name.
    Other(OtherMember),
}

impl ModuleMember {
    pub fn location(&self) -> &Location {
        match self {
            ModuleMember::Function(func) => &func.location,
            ModuleMember::Listener(decl)
            | ModuleMember::Class(decl)
            | ModuleMember::Service(decl)
            | ModuleMember::TypeDefinition(decl)
            | ModuleMember::ModuleVariable(decl)
            | ModuleMember::Constant(decl)
            | ModuleMember::Enum(decl)
            | ModuleMember::XmlNamespace(decl)
            | ModuleMember::Annotation(decl) => &decl.location,
            ModuleMember::Other(other) => &other.location,
        }
    }

    /// Human-readable kind name used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            ModuleMember::Function(_) => "function",
            ModuleMember::Listener(_) => "listener",
            ModuleMember::Class(_) => "class",
            ModuleMember::Service(_) => "service",
            ModuleMember::TypeDefinition(_) => "type",
            ModuleMember::ModuleVariable(_) => "variable",
            ModuleMember::Constant(_) => "const",
            ModuleMember::Enum(_) => "enum",
            ModuleMember::XmlNamespace(_) => "xmlns",
            ModuleMember::Annotation(_) => "annotation",
            ModuleMember::Other(other) => &other.syntax_kind,
        }
    }
}

/// A member whose contents the pass does not look into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    #[serde(default)]
    pub name: Option<String>,
    pub location: Location,
}

impl Declaration {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: Some(name.into()),
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherMember {
    pub syntax_kind: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Qualifier {
    Public,
    Isolated,
    Transactional,
}

/// `@name` or `@module:name` attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionBody {
    /// `=> expr;`
    Expression(Expression),
    /// `{ ... }`
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Required,
    Defaultable { default: Expression },
    /// `T... name`; logically a `T[]`.
    Rest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Declared type; for rest parameters, the element type.
    #[serde(rename = "type")]
    pub type_desc: TypeDesc,
    pub kind: ParameterKind,
}

impl Parameter {
    pub fn required(name: impl Into<String>, type_desc: TypeDesc) -> Self {
        Self {
            name: name.into(),
            type_desc,
            kind: ParameterKind::Required,
        }
    }

    pub fn defaultable(name: impl Into<String>, type_desc: TypeDesc, default: Expression) -> Self {
        Self {
            name: name.into(),
            type_desc,
            kind: ParameterKind::Defaultable { default },
        }
    }

    pub fn rest(name: impl Into<String>, element: TypeDesc) -> Self {
        Self {
            name: name.into(),
            type_desc: element,
            kind: ParameterKind::Rest,
        }
    }
}

/// A module-level function definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<TypeDesc>,
    pub body: FunctionBody,
    pub location: Location,
}

impl FunctionDefinition {
    pub fn has_qualifier(&self, qualifier: Qualifier) -> bool {
        self.qualifiers.contains(&qualifier)
    }

    pub fn is_expression_bodied(&self) -> bool {
        matches!(self.body, FunctionBody::Expression(_))
    }
}
