//! Front ends that load packages into the syntax model.
//!
//! Parsing source is the host compiler's job. A front end hands the pass an
//! already parsed [`Package`]: its modules and units, the top-level members of
//! each unit, and the symbol table used to resolve named types.

pub mod json;

use std::path::Path;

use crate::diagnostic::CompilerError;
use crate::syntax::Package;

pub use json::JsonFrontend;

/// Trait for package front ends.
pub trait Frontend {
    /// Returns the front end name (e.g., "json").
    fn name(&self) -> &str;

    /// Loads the package at `path`.
    fn load_package(&mut self, path: &Path) -> Result<Package, CompilerError>;
}

/// Creates a front end by name.
pub fn create_frontend(name: &str) -> Result<Box<dyn Frontend>, CompilerError> {
    match name {
        "json" => Ok(Box::new(JsonFrontend::new())),
        _ => Err(CompilerError::UnsupportedFrontend {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_frontend_is_rejected() {
        assert!(matches!(
            create_frontend("typescript"),
            Err(CompilerError::UnsupportedFrontend { .. })
        ));
        assert_eq!(create_frontend("json").unwrap().name(), "json");
    }
}
