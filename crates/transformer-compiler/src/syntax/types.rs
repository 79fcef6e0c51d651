//! Type descriptors, as written in source and as resolved by the semantic model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Builtin simple types that cross an HTTP/JSON boundary unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Int,
    Float,
    Decimal,
    Byte,
    String,
    Json,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Int,
        PrimitiveKind::Float,
        PrimitiveKind::Decimal,
        PrimitiveKind::Byte,
        PrimitiveKind::String,
        PrimitiveKind::Json,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::String => "string",
            PrimitiveKind::Json => "json",
        }
    }
}

/// A type descriptor node as it appears in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeDesc {
    /// `int`, `string`, `json`, ...
    Primitive(PrimitiveKind),

    /// `T[]`
    Array(Box<TypeDesc>),

    /// `map<T>`
    Map(Box<TypeDesc>),

    /// `table<R>`
    Table(Box<TypeDesc>),

    /// Reference to a type defined elsewhere, resolved through the semantic model.
    Named(String),

    /// `()`
    Nil,

    /// `A|B`
    Union(Vec<TypeDesc>),

    /// Any other type form, kept as its source spelling (`xml`, `any`, `function () returns int`).
    Other(String),
}

impl TypeDesc {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeDesc::Primitive(kind)
    }

    pub fn array(element: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(element))
    }

    pub fn map(value: TypeDesc) -> Self {
        TypeDesc::Map(Box::new(value))
    }

    pub fn table(row: TypeDesc) -> Self {
        TypeDesc::Table(Box::new(row))
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeDesc::Named(name.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, TypeDesc::Nil)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Primitive(kind) => f.write_str(kind.keyword()),
            TypeDesc::Array(element) => match element.as_ref() {
                TypeDesc::Union(_) => write!(f, "({})[]", element),
                _ => write!(f, "{}[]", element),
            },
            TypeDesc::Map(value) => write!(f, "map<{}>", value),
            TypeDesc::Table(row) => write!(f, "table<{}>", row),
            TypeDesc::Named(name) => f.write_str(name),
            TypeDesc::Nil => f.write_str("()"),
            TypeDesc::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}", member)?;
                }
                Ok(())
            }
            TypeDesc::Other(spelling) => f.write_str(spelling),
        }
    }
}

/// A type as resolved by the semantic model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeSymbol {
    Primitive(PrimitiveKind),

    /// Any record type, open or closed.
    Record,

    Array(Box<TypeSymbol>),

    Map(Box<TypeSymbol>),

    /// Table with the given row type.
    Table(Box<TypeSymbol>),

    /// Another named type; resolved again through the semantic model.
    Alias(String),

    /// A resolved type the HTTP boundary cannot carry (`object`, `xml`, unions, ...).
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_source_spelling() {
        assert_eq!(TypeDesc::array(TypeDesc::primitive(PrimitiveKind::Json)).to_string(), "json[]");
        assert_eq!(TypeDesc::map(TypeDesc::primitive(PrimitiveKind::Int)).to_string(), "map<int>");
        assert_eq!(
            TypeDesc::table(TypeDesc::map(TypeDesc::primitive(PrimitiveKind::String))).to_string(),
            "table<map<string>>"
        );
        assert_eq!(TypeDesc::Nil.to_string(), "()");
        assert_eq!(TypeDesc::named("Person").to_string(), "Person");
    }

    #[test]
    fn parenthesizes_union_array_elements() {
        let union = TypeDesc::Union(vec![
            TypeDesc::primitive(PrimitiveKind::Int),
            TypeDesc::primitive(PrimitiveKind::String),
        ]);
        assert_eq!(union.to_string(), "int|string");
        assert_eq!(TypeDesc::array(union).to_string(), "(int|string)[]");
    }

    #[test]
    fn deserializes_tagged_form() {
        let desc: TypeDesc = serde_json::from_str(
            r#"{"kind": "array", "of": {"kind": "primitive", "of": "string"}}"#,
        )
        .unwrap();
        assert_eq!(desc, TypeDesc::array(TypeDesc::primitive(PrimitiveKind::String)));

        let nil: TypeDesc = serde_json::from_str(r#"{"kind": "nil"}"#).unwrap();
        assert!(nil.is_nil());
    }
}
