//! Core data model for the cwrap glue generator.
//!
//! This crate holds the types shared by every stage of wrapper generation:
//!
//! - [`ArgumentSpec`] / [`DefaultValue`] / [`ArgFlags`] - user-authored argument descriptions
//! - [`HookSet`] - per-type (and per-argument) code emission hooks
//! - [`TypeDef`] - a registered argument type
//! - [`ResolvedArgument`] / [`ArgRef`] / [`Variant`] - arguments ready for emission
//! - [`GenerationError`] - generation-time failures

mod arg;
mod error;
mod hooks;
mod resolved;
mod type_def;

pub use arg::{ArgFlags, ArgumentSpec, DefaultKinds, DefaultValue};
pub use error::GenerationError;
pub use hooks::{HookKind, HookSet, StackHook, StmtHook, TextHook};
pub use resolved::{ArgRef, ResolvedArgument, Variant};
pub use type_def::{TypeConfig, TypeDef, Validator};
