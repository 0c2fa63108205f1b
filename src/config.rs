//! Session configuration.
//!
//! Everything here is spliced verbatim into generated code. The defaults
//! target the Lua C API.

use cwrap_compiler::Convention;

/// Largest number of optional arguments one variant may have by default.
///
/// Each optional argument doubles the number of branches emitted.
pub const DEFAULT_MAX_OPTIONALS: usize = 16;

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Prepended to the scripting name to form the wrapper's native name.
    pub wrapper_prefix: String,
    /// Storage class and return type of a wrapper.
    pub signature_prefix: String,
    /// Parameter list of a wrapper.
    pub state_param: String,
    /// Expression yielding the number of supplied arguments.
    pub arg_count_expr: String,
    /// Opening of the runtime error call; the message literal and `);` are appended.
    pub error_fn: String,
    /// Element struct of registration tables.
    pub reg_struct: String,
    pub max_optionals: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let conv = Convention::default();
        Self {
            wrapper_prefix: "wrapper_".to_string(),
            signature_prefix: conv.signature_prefix,
            state_param: conv.state_param,
            arg_count_expr: conv.arg_count_expr,
            error_fn: conv.error_call,
            reg_struct: "luaL_Reg".to_string(),
            max_optionals: DEFAULT_MAX_OPTIONALS,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wrapper_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.wrapper_prefix = prefix.into();
        self
    }

    pub fn with_signature_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.signature_prefix = prefix.into();
        self
    }

    pub fn with_state_param(mut self, param: impl Into<String>) -> Self {
        self.state_param = param.into();
        self
    }

    pub fn with_arg_count_expr(mut self, expr: impl Into<String>) -> Self {
        self.arg_count_expr = expr.into();
        self
    }

    pub fn with_error_fn(mut self, error_fn: impl Into<String>) -> Self {
        self.error_fn = error_fn.into();
        self
    }

    pub fn with_reg_struct(mut self, reg_struct: impl Into<String>) -> Self {
        self.reg_struct = reg_struct.into();
        self
    }

    pub fn with_max_optionals(mut self, max: usize) -> Self {
        self.max_optionals = max;
        self
    }

    /// The calling convention generated wrappers follow.
    pub fn convention(&self) -> Convention {
        Convention {
            signature_prefix: self.signature_prefix.clone(),
            state_param: self.state_param.clone(),
            arg_count_expr: self.arg_count_expr.clone(),
            error_call: self.error_fn.clone(),
        }
    }
}
