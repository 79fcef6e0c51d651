//! Loads a package from its JSON description.
//!
//! The file is the serde form of [`Package`]:
//!
//! ```json
//! {
//!   "name": "sample",
//!   "has_compilation_errors": false,
//!   "symbols": { "Person": { "kind": "record" } },
//!   "modules": [{
//!     "id": "sample",
//!     "name": "sample",
//!     "is_default": true,
//!     "documents": [{
//!       "id": "main",
//!       "name": "main.bal",
//!       "members": [{ "member": "class", "name": "C", "location": { ... } }]
//!     }],
//!     "test_documents": []
//!   }]
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::diagnostic::CompilerError;
use crate::syntax::Package;
use super::Frontend;

/// File looked up when the front end is pointed at a directory.
pub const PACKAGE_FILE: &str = "package.json";

#[derive(Debug, Default)]
pub struct JsonFrontend;

impl JsonFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Parses a package description and checks it has exactly one default module.
    pub fn parse(&self, text: &str, path: &Path) -> Result<Package, CompilerError> {
        let package: Package = serde_json::from_str(text).map_err(|e| CompilerError::InvalidPackage {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        match package.modules.iter().filter(|m| m.is_default).count() {
            0 => Err(CompilerError::MissingDefaultModule {
                package: package.name,
            }),
            1 => Ok(package),
            n => Err(CompilerError::InvalidPackage {
                path: path.to_path_buf(),
                message: format!("{} modules are marked as default", n),
            }),
        }
    }

    fn resolve_path(path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join(PACKAGE_FILE)
        } else {
            path.to_path_buf()
        }
    }
}

impl Frontend for JsonFrontend {
    fn name(&self) -> &str {
        "json"
    }

    fn load_package(&mut self, path: &Path) -> Result<Package, CompilerError> {
        let file = Self::resolve_path(path);
        let text = std::fs::read_to_string(&file).map_err(|e| CompilerError::io(&file, e.to_string()))?;
        let package = self.parse(&text, &file)?;

        tracing::debug!(
            package = %package.name,
            modules = package.modules.len(),
            symbols = package.symbols.len(),
            "package loaded"
        );
        Ok(package)
    }
}
