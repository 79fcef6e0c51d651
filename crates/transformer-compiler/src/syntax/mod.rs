//! Syntax model consumed by the analysis.
//!
//! The tree is produced by a front end (see [`crate::frontend`]) and never
//! mutated by the pass.

mod expr;
mod node;
mod package;
mod types;

pub use expr::{Argument, Expression, QualifiedName};
pub use node::{
    Annotation, Declaration, FunctionBody, FunctionDefinition, ModuleMember, OtherMember,
    Parameter, ParameterKind, Qualifier,
};
pub use package::{Document, DocumentId, Module, ModuleId, Package};
pub use types::{PrimitiveKind, TypeDesc, TypeSymbol};
