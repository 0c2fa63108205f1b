//! cwrap - glue generator for a stack-based scripting runtime.
//!
//! Describes native functions declaratively (argument types, defaults,
//! visibility and return roles) and generates one C wrapper per
//! scripting-level name. A wrapper reads its arguments from the runtime's
//! stack, picks the first matching variant, calls the native function and
//! pushes the results back.
//!
//! The workspace crates:
//!
//! - `cwrap-core` - argument descriptions, hooks and type definitions
//! - `cwrap-registry` - the name-keyed type table
//! - `cwrap-compiler` - resolution, per-variant emission and dispatch
//! - `cwrap-modules` - the built-in numeric, boolean, string and tensor types
//!
//! This crate ties them together in a [`Session`].

mod config;
mod error;
mod history;
mod session;

pub use config::{DEFAULT_MAX_OPTIONALS, SessionConfig};
pub use error::SessionError;
pub use history::{GenerationHistory, Registration};
pub use session::Session;

// Re-export the types a wrap request is written with
pub use cwrap_compiler::{
    Arity, Branch, Convention, DispatchPlan, Selection, VariantPlan, VariantRequest,
};
pub use cwrap_core::{
    ArgFlags, ArgRef, ArgumentSpec, DefaultKinds, DefaultValue, GenerationError, HookKind, HookSet,
    ResolvedArgument, TypeConfig, TypeDef,
};
pub use cwrap_modules::{NumberKind, TensorKind, builtin_types};
pub use cwrap_registry::TypeRegistry;
