//! Template functions, one per generated construct.

use crate::config::CodegenConfig;
use crate::ir::{FunctionSpec, ParameterKind, ParameterSpec};
use crate::syntax::{Argument, Expression, PrimitiveKind, QualifiedName, TypeDesc};
use super::tree::{
    ConfigurableVar, ImportDecl, PayloadParam, PayloadRecord, RecordField, ResourceMethod, ServiceDecl,
};

const PORT_VARIABLE: &str = "port";
const PAYLOAD_PARAMETER: &str = "payload";
const RESOURCE_ACCESSOR: &str = "post";

pub fn http_import(config: &CodegenConfig) -> ImportDecl {
    ImportDecl {
        org: config.http_org.clone(),
        module: config.http_module.clone(),
    }
}

pub fn port_configurable(config: &CodegenConfig) -> ConfigurableVar {
    ConfigurableVar {
        type_desc: TypeDesc::primitive(PrimitiveKind::Int),
        name: PORT_VARIABLE.to_string(),
        default: Expression::IntLiteral(i64::from(config.port)),
    }
}

/// The request body record of a function, or `None` if it takes no parameters.
pub fn payload_record(func: &FunctionSpec) -> Option<PayloadRecord> {
    if !func.has_parameters() {
        return None;
    }

    let fields = func.parameters.iter().map(record_field).collect();
    Some(PayloadRecord {
        name: func.payload_type_name(),
        fields,
    })
}

fn record_field(param: &ParameterSpec) -> RecordField {
    let (type_desc, optional) = match &param.kind {
        ParameterKind::Required => (param.type_desc.clone(), false),
        ParameterKind::Defaultable { .. } => (param.type_desc.clone(), true),
        ParameterKind::Rest => (TypeDesc::array(param.type_desc.clone()), true),
    };
    RecordField {
        type_desc,
        name: param.name.clone(),
        optional,
    }
}

/// The POST resource that forwards its payload to `func`.
pub fn resource_method(func: &FunctionSpec, config: &CodegenConfig) -> ResourceMethod {
    let payload = func.has_parameters().then(|| PayloadParam {
        annotation: QualifiedName::new(config.http_module.clone(), "Payload"),
        type_name: func.payload_type_name(),
        name: PAYLOAD_PARAMETER.to_string(),
    });

    let arguments = func.parameters.iter().map(call_argument).collect();

    ResourceMethod {
        accessor: RESOURCE_ACCESSOR.to_string(),
        path: func.name.clone(),
        payload,
        returns: func.return_type.clone().unwrap_or(TypeDesc::Nil),
        body: Expression::Call {
            function: func.name.clone(),
            arguments,
        },
    }
}

fn call_argument(param: &ParameterSpec) -> Argument {
    let field = Expression::field(Expression::name(PAYLOAD_PARAMETER), param.name.clone());
    match &param.kind {
        ParameterKind::Required => Argument::Positional(field),
        ParameterKind::Defaultable { default } => Argument::Positional(Expression::elvis(field, default.clone())),
        ParameterKind::Rest => Argument::Rest(Expression::elvis(field, Expression::List(Vec::new()))),
    }
}

/// `service / on new http:Listener(port)` holding `resources`.
pub fn service(resources: Vec<ResourceMethod>, config: &CodegenConfig) -> ServiceDecl {
    ServiceDecl {
        base_path: "/".to_string(),
        listener: Expression::New {
            type_name: QualifiedName::new(config.http_module.clone(), "Listener"),
            arguments: vec![Argument::Positional(Expression::name(PORT_VARIABLE))],
        },
        resources,
    }
}
