//! The generated service unit, before serialization.

use serde::Serialize;

use crate::syntax::{Expression, QualifiedName, TypeDesc};

/// A complete generated compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    pub imports: Vec<ImportDecl>,
    pub configurables: Vec<ConfigurableVar>,
    pub service: ServiceDecl,
    pub records: Vec<PayloadRecord>,
}

/// `import org/module;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportDecl {
    pub org: String,
    pub module: String,
}

/// `configurable T name = default;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurableVar {
    #[serde(rename = "type")]
    pub type_desc: TypeDesc,
    pub name: String,
    pub default: Expression,
}

/// `service <base_path> on <listener> { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDecl {
    pub base_path: String,
    /// Listener construction, e.g. `new http:Listener(port)`.
    pub listener: Expression,
    pub resources: Vec<ResourceMethod>,
}

/// `resource function <accessor> <path>(<payload>) returns <T>|error { return <call>; }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceMethod {
    pub accessor: String,
    pub path: String,
    pub payload: Option<PayloadParam>,
    /// Success arm of the `T|error` return type.
    pub returns: TypeDesc,
    /// The returned expression, a call to the transformer function.
    pub body: Expression,
}

/// `@http:Payload <type_name> <name>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadParam {
    pub annotation: QualifiedName,
    pub type_name: String,
    pub name: String,
}

/// `public type <name> record { ... };`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadRecord {
    pub name: String,
    pub fields: Vec<RecordField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordField {
    #[serde(rename = "type")]
    pub type_desc: TypeDesc,
    pub name: String,
    /// Rendered with a trailing `?`.
    pub optional: bool,
}
