//! Function signatures lowered from the syntax tree.
//!
//! The analysis and the service generator only look at signature shape, so a
//! [`FunctionSpec`] drops the body and keeps what decides whether the function is
//! a transformer and how it is exposed.

use serde::Serialize;

use crate::diagnostic::Location;
use crate::syntax::{FunctionBody, FunctionDefinition, Qualifier, TypeDesc};

pub use crate::syntax::{Parameter as ParameterSpec, ParameterKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Qualifiers {
    pub public: bool,
    pub isolated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    ExpressionBodied,
    BlockBodied,
}

/// Signature of a module-level function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSpec {
    pub name: String,
    pub qualifiers: Qualifiers,
    pub body_kind: BodyKind,
    pub parameters: Vec<ParameterSpec>,
    pub return_type: Option<TypeDesc>,
    pub has_annotations: bool,
    pub location: Location,
}

impl FunctionSpec {
    /// `public isolated` with an expression body.
    pub fn is_transformer(&self) -> bool {
        self.qualifiers.public
            && self.qualifiers.isolated
            && self.body_kind == BodyKind::ExpressionBodied
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Name of the generated payload record.
    pub fn payload_type_name(&self) -> String {
        format!("{}Payload", self.name)
    }
}

impl From<&FunctionDefinition> for FunctionSpec {
    fn from(func: &FunctionDefinition) -> Self {
        Self {
            name: func.name.clone(),
            qualifiers: Qualifiers {
                public: func.has_qualifier(Qualifier::Public),
                isolated: func.has_qualifier(Qualifier::Isolated),
            },
            body_kind: match func.body {
                FunctionBody::Expression(_) => BodyKind::ExpressionBodied,
                FunctionBody::Block => BodyKind::BlockBodied,
            },
            parameters: func.parameters.clone(),
            return_type: func.return_type.clone(),
            has_annotations: !func.annotations.is_empty(),
            location: func.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Annotation, Expression, PrimitiveKind};

    fn definition(qualifiers: Vec<Qualifier>, body: FunctionBody) -> FunctionDefinition {
        FunctionDefinition {
            name: "double".to_string(),
            qualifiers,
            annotations: vec![],
            parameters: vec![ParameterSpec::required("n", TypeDesc::primitive(PrimitiveKind::Int))],
            return_type: Some(TypeDesc::primitive(PrimitiveKind::Int)),
            body,
            location: Location::default(),
        }
    }

    #[test]
    fn public_isolated_expression_function_is_transformer() {
        let func = definition(
            vec![Qualifier::Public, Qualifier::Isolated],
            FunctionBody::Expression(Expression::source("n * 2")),
        );
        let spec = FunctionSpec::from(&func);
        assert!(spec.is_transformer());
        assert_eq!(spec.payload_type_name(), "doublePayload");
    }

    #[test]
    fn missing_qualifier_or_block_body_is_not_transformer() {
        let not_isolated = definition(vec![Qualifier::Public], FunctionBody::Expression(Expression::source("n")));
        assert!(!FunctionSpec::from(&not_isolated).is_transformer());

        let block = definition(vec![Qualifier::Public, Qualifier::Isolated], FunctionBody::Block);
        assert!(!FunctionSpec::from(&block).is_transformer());
    }

    #[test]
    fn records_annotations() {
        let mut func = definition(vec![], FunctionBody::Block);
        func.annotations.push(Annotation { name: "display".to_string() });
        assert!(FunctionSpec::from(&func).has_annotations);
    }
}
