//! Whether a transformer function can be exposed as an HTTP resource.

use crate::ir::FunctionSpec;
use crate::semantic::SemanticModel;
use super::classify::classify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureVerdict {
    Ok,
    ParamsUnsupported,
    ReturnUnsupported,
}

/// Checks parameters first, in declaration order, then the return type.
///
/// Rest parameters are judged by their element type.
pub fn validate_signature(func: &FunctionSpec, model: &dyn SemanticModel) -> SignatureVerdict {
    if func
        .parameters
        .iter()
        .any(|param| !classify(&param.type_desc, model).is_supported())
    {
        return SignatureVerdict::ParamsUnsupported;
    }

    match &func.return_type {
        Some(return_type) if !classify(return_type, model).is_supported() => {
            SignatureVerdict::ReturnUnsupported
        }
        _ => SignatureVerdict::Ok,
    }
}
