//! # Function Library
//!
//! Maps function ids to [`FunctionKind`]s. A library is built explicitly and
//! handed to [`crate::Diagram::from_config`]; there is no process-wide
//! registry.

use std::collections::BTreeMap;

use crate::function::FunctionKind;

/// Registry of functions available to diagrams, ordered by id.
#[derive(Clone, Debug, Default)]
pub struct FunctionLibrary {
    functions: BTreeMap<String, FunctionKind>,
}

impl FunctionLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding every built-in function.
    #[must_use]
    pub fn standard() -> Self {
        let mut library = Self::new();
        for kind in FunctionKind::all() {
            library.register(kind);
        }
        tracing::debug!(functions = library.len(), "Built standard function library");
        library
    }

    /// Adds `kind` under its id, returning the kind it replaced.
    pub fn register(&mut self, kind: FunctionKind) -> Option<FunctionKind> {
        self.functions.insert(kind.id(), kind)
    }

    /// Looks a function up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FunctionKind> {
        self.functions.get(id)
    }

    /// Iterates `(id, kind)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionKind)> {
        self.functions.iter().map(|(id, kind)| (id.as_str(), kind))
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{Coordinate, FloatOp};

    #[test]
    fn test_standard_library_lookup() {
        let library = FunctionLibrary::standard();
        assert_eq!(library.len(), FunctionKind::all().len(), "ids must be unique");
        assert_eq!(library.get("floats.add"), Some(&FunctionKind::Float(FloatOp::Add)));
        assert_eq!(
            library.get("coordinates.uv"),
            Some(&FunctionKind::Coordinate(Coordinate::Uv))
        );
        assert!(library.get("floats.nope").is_none());
    }

    #[test]
    fn test_register_and_iterate_in_order() {
        let mut library = FunctionLibrary::new();
        assert!(library.is_empty());
        library.register(FunctionKind::Float(FloatOp::Sine));
        library.register(FunctionKind::Coordinate(Coordinate::U));
        let replaced = library.register(FunctionKind::Float(FloatOp::Sine));
        assert_eq!(replaced, Some(FunctionKind::Float(FloatOp::Sine)));
        let ids: Vec<&str> = library.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["coordinates.u", "floats.sine"]);
    }
}
