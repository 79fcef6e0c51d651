//! Per-run accumulator shared by every unit visit.
//!
//! One registry is created per package compilation and passed to each unit
//! analysis. Unit visits may run on different threads, so counters are atomics
//! and the function list is guarded by a lock that is never held while a unit
//! is being analyzed.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::ir::FunctionSpec;

#[derive(Debug, Default)]
pub struct TransformerRegistry {
    visited_units: AtomicUsize,
    found_any: AtomicBool,
    compilation_error_reported: AtomicBool,
    functions: Mutex<Vec<FunctionSpec>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transformer function.
    pub fn register(&self, func: FunctionSpec) {
        tracing::debug!(function = %func.name, "transformer function registered");
        self.found_any.store(true, Ordering::SeqCst);
        self.functions.lock().push(func);
    }

    /// Counts one more visited default-module unit and reports whether it was
    /// the last of `total`. Exactly one caller observes `true` per run.
    pub fn mark_unit_visited(&self, total: usize) -> bool {
        self.visited_units.fetch_add(1, Ordering::SeqCst) + 1 == total
    }

    /// Returns `true` the first time it is called and `false` afterwards.
    pub fn claim_compilation_error_report(&self) -> bool {
        !self.compilation_error_reported.swap(true, Ordering::SeqCst)
    }

    pub fn found_any(&self) -> bool {
        self.found_any.load(Ordering::SeqCst)
    }

    pub fn visited_units(&self) -> usize {
        self.visited_units.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.functions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.lock().is_empty()
    }

    /// Copies the registered functions in registration order.
    pub fn functions(&self) -> Vec<FunctionSpec> {
        self.functions.lock().clone()
    }

    /// Copies the registered functions ordered by file and position.
    ///
    /// Registration order depends on thread scheduling when units are visited
    /// in parallel; this order does not.
    pub fn functions_in_source_order(&self) -> Vec<FunctionSpec> {
        let mut functions = self.functions();
        functions.sort_by(|a, b| {
            let key = |f: &FunctionSpec| (f.location.file.clone(), f.location.start_line, f.location.start_col);
            key(a).cmp(&key(b))
        });
        functions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use crate::diagnostic::Location;
    use crate::ir::{BodyKind, Qualifiers};

    fn transformer(name: &str) -> FunctionSpec {
        FunctionSpec {
            name: name.to_string(),
            qualifiers: Qualifiers { public: true, isolated: true },
            body_kind: BodyKind::ExpressionBodied,
            parameters: vec![],
            return_type: None,
            has_annotations: false,
            location: Location::default(),
        }
    }

    #[test]
    fn register_sets_found_flag() {
        let registry = TransformerRegistry::new();
        assert!(!registry.found_any());
        registry.register(transformer("a"));
        registry.register(transformer("b"));
        assert!(registry.found_any());
        let names: Vec<_> = registry.functions().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn source_order_ignores_registration_order() {
        let registry = TransformerRegistry::new();
        let mut late = transformer("late");
        late.location = Location::new("b.bal", 0, 0, 0, 1);
        let mut second = transformer("second");
        second.location = Location::new("a.bal", 5, 0, 5, 1);
        let mut first = transformer("first");
        first.location = Location::new("a.bal", 1, 0, 1, 1);

        registry.register(late);
        registry.register(second);
        registry.register(first);

        let names: Vec<_> = registry.functions_in_source_order().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["first", "second", "late"]);
    }

    #[test]
    fn last_unit_is_observed_once() {
        let registry = TransformerRegistry::new();
        assert!(!registry.mark_unit_visited(3));
        assert!(!registry.mark_unit_visited(3));
        assert!(registry.mark_unit_visited(3));
        assert!(!registry.mark_unit_visited(3));
    }

    #[test]
    fn compilation_error_report_is_claimed_once() {
        let registry = TransformerRegistry::new();
        assert!(registry.claim_compilation_error_report());
        assert!(!registry.claim_compilation_error_report());
    }

    #[test]
    fn concurrent_visits_have_a_single_last_unit() {
        let registry = Arc::new(TransformerRegistry::new());
        let total = 64;

        let handles: Vec<_> = (0..total)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.register(transformer(&format!("f{}", i)));
                    registry.mark_unit_visited(total)
                })
            })
            .collect();

        let last_count = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|last| *last)
            .count();

        assert_eq!(last_count, 1);
        assert_eq!(registry.visited_units(), total);
        assert_eq!(registry.len(), total);
    }
}
