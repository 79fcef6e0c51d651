//! Validation of transformer packages.
//!
//! - [`classify`]: HTTP compatibility of declared types
//! - [`signature`]: transformer function signatures
//! - [`rules`]: per-unit member policy

pub mod classify;
pub mod rules;
pub mod signature;

pub use classify::{classify, classify_symbol, Compatibility};
pub use rules::{analyze_unit, UnitContext};
pub use signature::{validate_signature, SignatureVerdict};
