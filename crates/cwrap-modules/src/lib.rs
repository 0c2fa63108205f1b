//! Built-in argument types for the cwrap glue generator.
//!
//! - **numeric** - `double`, `float`, `long`, `int`, `short`, `char`, `byte`
//!   and the ordinal `index`
//! - **boolean** - `boolean`
//! - **string** - `string` (borrowed `const char *`)
//! - **tensor** - `<Kind>Tensor` for every tensor element kind
//!
//! # Usage
//!
//! ```ignore
//! use cwrap_modules::builtin_types;
//! use cwrap_registry::TypeRegistry;
//!
//! let registry = TypeRegistry::with_types(builtin_types());
//! ```

pub mod boolean;
pub mod numeric;
pub mod string;
pub mod tensor;

pub use boolean::boolean;
pub use numeric::{NumberKind, index, number};
pub use string::string;
pub use tensor::{TensorKind, tensor};

use cwrap_core::TypeDef;

/// Every built-in type definition.
pub fn builtin_types() -> Vec<TypeDef> {
    let mut types: Vec<TypeDef> = NumberKind::ALL.into_iter().map(number).collect();
    types.push(index());
    types.push(boolean());
    types.push(string());
    types.extend(TensorKind::ALL.into_iter().map(tensor));
    types
}
