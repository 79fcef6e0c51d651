//! Packages, modules and their source units.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostic::Location;
use crate::semantic::SymbolTable;
use super::ModuleMember;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub String);

/// One syntactic unit (source file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// File name relative to the package root.
    pub name: String,
    #[serde(default)]
    pub members: Vec<ModuleMember>,
}

impl Document {
    pub fn new(id: impl Into<String>, name: impl Into<String>, members: Vec<ModuleMember>) -> Self {
        Self {
            id: DocumentId(id.into()),
            name: name.into(),
            members,
        }
    }

    /// Location used for diagnostics that concern the unit as a whole.
    pub fn location(&self) -> Location {
        Location::file_start(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub test_documents: Vec<Document>,
}

impl Module {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_default: bool) -> Self {
        Self {
            id: ModuleId(id.into()),
            name: name.into(),
            is_default,
            documents: Vec::new(),
            test_documents: Vec::new(),
        }
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    pub fn with_test_document(mut self, document: Document) -> Self {
        self.test_documents.push(document);
        self
    }

    /// Number of non-test source units.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_test_document(&self, id: &DocumentId) -> bool {
        self.test_documents.iter().any(|doc| &doc.id == id)
    }

    /// Source and test units, in that order.
    pub fn all_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().chain(self.test_documents.iter())
    }
}

/// A package as delivered by a front end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub modules: Vec<Module>,
    /// Whether the front end already reported compilation errors.
    #[serde(default)]
    pub has_compilation_errors: bool,
    #[serde(default)]
    pub symbols: SymbolTable,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    pub fn default_module(&self) -> Option<&Module> {
        self.modules.iter().find(|m| m.is_default)
    }
}
