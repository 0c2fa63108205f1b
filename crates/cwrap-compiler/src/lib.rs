//! cwrap Compiler
//!
//! Turns wrap requests into native glue functions.
//!
//! ## Pipeline
//!
//! - **Resolution**: each argument description is joined with its registered
//!   type; per-argument hooks mask the type's ([`resolve`])
//! - **Variant planning**: each native function's accepted call shapes are
//!   enumerated and emitted as checks, bindings and the call ([`variant`])
//! - **Dispatch**: all variants of one scripting-level name are combined into a
//!   single wrapper with ordered selection and a failure branch ([`dispatch`])
//!
//! ## Modules
//!
//! - [`convention`]: runtime entry points used by generated code
//! - [`emit`]: source text accumulation

pub mod convention;
pub mod dispatch;
pub mod emit;
pub mod resolve;
pub mod variant;

pub use convention::Convention;
pub use dispatch::{DispatchPlan, Selection};
pub use emit::{SourceWriter, escape_c_format, escape_c_string};
pub use resolve::{VariantRequest, resolve_argument, resolve_variant};
pub use variant::{Arity, Branch, VariantPlan};

// Re-export GenerationError from core for convenience
pub use cwrap_core::GenerationError;
