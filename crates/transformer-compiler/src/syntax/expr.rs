//! Expression nodes.
//!
//! Front ends hand default-value expressions over as [`Expression::Source`];
//! the service generator builds the remaining variants itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A possibly module-qualified identifier (`http:Listener`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    #[serde(default)]
    pub module: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{}:{}", module, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// `name`
    Name(String),

    /// `target.field`
    FieldAccess {
        target: Box<Expression>,
        field: String,
    },

    /// `lhs ?: rhs`
    Elvis {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },

    /// `[a, b]`
    List(Vec<Expression>),

    /// `function(args)`
    Call {
        function: String,
        arguments: Vec<Argument>,
    },

    /// `new T(args)`
    New {
        type_name: QualifiedName,
        arguments: Vec<Argument>,
    },

    IntLiteral(i64),

    /// Expression source text supplied by the front end, emitted verbatim.
    Source(String),
}

impl Expression {
    pub fn name(name: impl Into<String>) -> Self {
        Expression::Name(name.into())
    }

    pub fn field(target: Expression, field: impl Into<String>) -> Self {
        Expression::FieldAccess {
            target: Box::new(target),
            field: field.into(),
        }
    }

    pub fn elvis(lhs: Expression, rhs: Expression) -> Self {
        Expression::Elvis {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn source(text: impl Into<String>) -> Self {
        Expression::Source(text.into())
    }
}

/// A call argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    Positional(Expression),
    /// `...expr`
    Rest(Expression),
}
