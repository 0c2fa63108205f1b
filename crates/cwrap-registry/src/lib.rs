//! cwrap Registry crate.
//!
//! Holds the [`TypeRegistry`] that maps type names to their emission hooks.

mod registry;

pub use registry::TypeRegistry;

// Re-export from core so plugins can depend on the registry alone
pub use cwrap_core::{GenerationError, HookSet, TypeConfig, TypeDef};
