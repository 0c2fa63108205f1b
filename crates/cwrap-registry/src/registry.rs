//! TypeRegistry - name-keyed storage of argument types.
//!
//! This module provides [`TypeRegistry`], the table every argument
//! description is resolved against. Lookups are by the type name written in
//! an [`ArgumentSpec`](cwrap_core::ArgumentSpec).
//!
//! # Thread Safety
//!
//! `TypeRegistry` is owned by one generation session and mutated only while
//! types are being registered. It holds no interior mutability; two sessions
//! each own their registry and never share it implicitly. Type definitions
//! are `Send + Sync`, so a populated registry can be cloned or moved to
//! another thread.
//!
//! # Example
//!
//! ```
//! use cwrap_core::{HookSet, TypeDef};
//! use cwrap_registry::TypeRegistry;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(TypeDef::new("double", HookSet::new()));
//!
//! assert!(registry.contains("double"));
//! assert!(registry.lookup("Quaternion").is_err());
//! ```

use rustc_hash::FxHashMap;

use cwrap_core::{GenerationError, TypeDef};

/// Registry of argument types for one session.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: FxHashMap<String, TypeDef>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given types.
    pub fn with_types(types: impl IntoIterator<Item = TypeDef>) -> Self {
        let mut registry = Self::new();
        registry.extend(types);
        registry
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a type, returning the definition it replaced, if any.
    pub fn register(&mut self, def: TypeDef) -> Option<TypeDef> {
        let name = def.name().to_string();
        let previous = self.types.insert(name, def);
        if let Some(previous) = &previous {
            tracing::debug!(type_name = previous.name(), "replaced registered type");
        }
        previous
    }

    /// Register several types in order; later entries win on name clashes.
    pub fn extend(&mut self, types: impl IntoIterator<Item = TypeDef>) {
        for def in types {
            self.register(def);
        }
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Get a type by name, failing with [`GenerationError::UnknownType`].
    pub fn lookup(&self, name: &str) -> Result<&TypeDef, GenerationError> {
        self.get(name)
            .ok_or_else(|| GenerationError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwrap_core::{HookKind, HookSet};

    fn plain(name: &str) -> TypeDef {
        TypeDef::new(name, HookSet::new())
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = TypeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = TypeRegistry::new();
        assert!(registry.register(plain("double")).is_none());

        let def = registry.lookup("double").unwrap();
        assert_eq!(def.name(), "double");
        assert!(registry.get("float").is_none());
    }

    #[test]
    fn unknown_type_error() {
        let registry = TypeRegistry::new();
        let err = registry.lookup("Quaternion").unwrap_err();
        assert_eq!(err, GenerationError::UnknownType("Quaternion".into()));
    }

    #[test]
    fn later_registration_replaces() {
        let mut registry = TypeRegistry::new();
        registry.register(plain("double"));

        let replacement = TypeDef::new(
            "double",
            HookSet::new().with_helpname(|_| "number".to_string()),
        );
        let previous = registry.register(replacement);

        assert!(previous.is_some_and(|p| !p.hooks().provides(HookKind::Helpname)));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("double").unwrap().hooks().provides(HookKind::Helpname));
    }

    #[test]
    fn names_are_sorted() {
        let registry = TypeRegistry::with_types([plain("long"), plain("double"), plain("index")]);
        assert_eq!(registry.names(), vec!["double", "index", "long"]);
    }

    #[test]
    fn registries_are_independent() {
        let mut first = TypeRegistry::new();
        let second = first.clone();
        first.register(plain("double"));
        assert!(first.contains("double"));
        assert!(!second.contains("double"));
    }
}
