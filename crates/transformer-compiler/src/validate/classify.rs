//! HTTP compatibility of declared types.
//!
//! A type is supported when a value of it can be bound from a JSON request body
//! or written as a JSON response. Literal container syntax (`int[]`, `map<T>`,
//! `table<map<T>>`) is checked one level deep; named references are resolved
//! through the semantic model and followed structurally to any depth.

use std::collections::HashSet;

use crate::semantic::SemanticModel;
use crate::syntax::{TypeDesc, TypeSymbol};

/// Result of classifying a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    Supported,
    Unsupported,
}

impl Compatibility {
    pub fn is_supported(self) -> bool {
        self == Compatibility::Supported
    }

    fn from_bool(supported: bool) -> Self {
        if supported {
            Compatibility::Supported
        } else {
            Compatibility::Unsupported
        }
    }
}

/// Classifies a type descriptor as written in source.
pub fn classify(desc: &TypeDesc, model: &dyn SemanticModel) -> Compatibility {
    let supported = match desc {
        TypeDesc::Primitive(_) => true,
        TypeDesc::Array(element) => is_shallow_member(element),
        TypeDesc::Map(value) => is_shallow_member(value),
        TypeDesc::Table(row) => match row.as_ref() {
            TypeDesc::Map(value) => is_shallow_member(value),
            _ => false,
        },
        TypeDesc::Named(name) => match model.resolve(name) {
            Some(symbol) => {
                let mut seen = HashSet::from([name.clone()]);
                symbol_supported(&symbol, model, &mut seen)
            }
            None => false,
        },
        // An explicit `()` return is the same as no return annotation.
        TypeDesc::Nil => true,
        TypeDesc::Union(_) => false,
        TypeDesc::Other(_) => false,
    };
    Compatibility::from_bool(supported)
}

/// Classifies a resolved type symbol.
pub fn classify_symbol(symbol: &TypeSymbol, model: &dyn SemanticModel) -> Compatibility {
    Compatibility::from_bool(symbol_supported(symbol, model, &mut HashSet::new()))
}

/// Members of literal container syntax: a primitive, or a map of primitives.
fn is_shallow_member(desc: &TypeDesc) -> bool {
    match desc {
        TypeDesc::Primitive(_) => true,
        TypeDesc::Map(value) => matches!(value.as_ref(), TypeDesc::Primitive(_)),
        TypeDesc::Array(_)
        | TypeDesc::Table(_)
        | TypeDesc::Named(_)
        | TypeDesc::Nil
        | TypeDesc::Union(_)
        | TypeDesc::Other(_) => false,
    }
}

fn symbol_supported(symbol: &TypeSymbol, model: &dyn SemanticModel, seen: &mut HashSet<String>) -> bool {
    match symbol {
        TypeSymbol::Primitive(_) | TypeSymbol::Record => true,
        TypeSymbol::Array(member) | TypeSymbol::Map(member) | TypeSymbol::Table(member) => {
            symbol_supported(member, model, seen)
        }
        TypeSymbol::Alias(name) => {
            // A cyclic alias chain never reaches a concrete type.
            if !seen.insert(name.clone()) {
                return false;
            }
            match model.resolve(name) {
                Some(target) => symbol_supported(&target, model, seen),
                None => false,
            }
        }
        TypeSymbol::Other(_) => false,
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::semantic::SymbolTable;
    use crate::syntax::PrimitiveKind;
    use proptest::prelude::*;

    fn arb_primitive() -> impl Strategy<Value = PrimitiveKind> {
        proptest::sample::select(PrimitiveKind::ALL.to_vec())
    }

    /// Arbitrary type descriptors, nested up to four levels.
    fn arb_type_desc() -> impl Strategy<Value = TypeDesc> {
        let leaf = prop_oneof![
            4 => arb_primitive().prop_map(TypeDesc::Primitive),
            1 => Just(TypeDesc::Nil),
            2 => prop_oneof![Just("Person"), Just("Missing")].prop_map(TypeDesc::named),
            1 => prop_oneof![Just("xml"), Just("any")].prop_map(|s| TypeDesc::Other(s.to_string())),
        ];
        leaf.prop_recursive(4, 32, 3, |inner| {
            prop_oneof![
                inner.clone().prop_map(TypeDesc::array),
                inner.clone().prop_map(TypeDesc::map),
                inner.clone().prop_map(TypeDesc::table),
                proptest::collection::vec(inner, 2..4).prop_map(TypeDesc::Union),
            ]
        })
    }

    fn model() -> SymbolTable {
        SymbolTable::new().with("Person", TypeSymbol::Record)
    }

    fn supported(desc: &TypeDesc) -> bool {
        classify(desc, &model()).is_supported()
    }

    proptest! {
        #[test]
        fn primitive_closure_is_supported(kind in arb_primitive()) {
            let prim = TypeDesc::primitive(kind);
            prop_assert!(supported(&prim));
            prop_assert!(supported(&TypeDesc::array(prim.clone())));
            prop_assert!(supported(&TypeDesc::map(prim.clone())));
            prop_assert!(supported(&TypeDesc::table(TypeDesc::map(prim.clone()))));
            prop_assert!(supported(&TypeDesc::array(TypeDesc::map(prim))));
        }

        #[test]
        fn containers_never_rescue_unsupported_parts(desc in arb_type_desc()) {
            if !supported(&desc) {
                prop_assert!(!supported(&TypeDesc::array(desc.clone())));
                prop_assert!(!supported(&TypeDesc::map(desc.clone())));
                prop_assert!(!supported(&TypeDesc::table(TypeDesc::map(desc))));
            }
        }

        #[test]
        fn supported_containers_have_supported_parts(desc in arb_type_desc()) {
            let parts: Vec<&TypeDesc> = match &desc {
                TypeDesc::Array(part) | TypeDesc::Map(part) => vec![part.as_ref()],
                TypeDesc::Table(row) => vec![row.as_ref()],
                _ => vec![],
            };
            if supported(&desc) {
                for part in parts {
                    prop_assert!(supported(part), "{:?} inside {:?}", part, desc);
                }
            }
        }

        #[test]
        fn unions_are_never_supported(arms in proptest::collection::vec(arb_type_desc(), 2..4)) {
            prop_assert!(!supported(&TypeDesc::Union(arms)));
        }

        #[test]
        fn classification_is_deterministic(desc in arb_type_desc()) {
            prop_assert_eq!(classify(&desc, &model()), classify(&desc, &model()));
        }
    }
}
