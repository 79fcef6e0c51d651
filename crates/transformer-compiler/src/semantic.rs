//! Semantic model: resolution of named type references.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::syntax::TypeSymbol;

/// Resolves named type references to their type symbols.
pub trait SemanticModel: Send + Sync {
    /// Returns the type a name refers to, or `None` if it does not resolve to a type.
    fn resolve(&self, name: &str) -> Option<TypeSymbol>;
}

/// Type definitions of a package keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    types: BTreeMap<String, TypeSymbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: TypeSymbol) -> Option<TypeSymbol> {
        self.types.insert(name.into(), symbol)
    }

    pub fn with(mut self, name: impl Into<String>, symbol: TypeSymbol) -> Self {
        self.insert(name, symbol);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeSymbol> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl SemanticModel for SymbolTable {
    fn resolve(&self, name: &str) -> Option<TypeSymbol> {
        self.get(name).cloned()
    }
}
