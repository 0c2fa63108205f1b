//! Calling convention of the generated wrappers.

/// The runtime entry points a generated wrapper uses.
///
/// Defaults to the Lua C API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convention {
    /// Storage class and return type preceding the wrapper name.
    pub signature_prefix: String,
    /// Parameter list of a wrapper (the runtime state handle).
    pub state_param: String,
    /// Expression yielding the number of supplied arguments.
    pub arg_count_expr: String,
    /// Opening of the error call; the quoted message and `);` are appended.
    pub error_call: String,
}

impl Default for Convention {
    fn default() -> Self {
        Self {
            signature_prefix: "static int".to_string(),
            state_param: "lua_State *L".to_string(),
            arg_count_expr: "lua_gettop(L)".to_string(),
            error_call: "luaL_error(L, ".to_string(),
        }
    }
}

impl Convention {
    /// `error_call` applied to an already escaped message.
    pub fn error_statement(&self, escaped_message: &str) -> String {
        format!("{}\"{}\");", self.error_call, escaped_message)
    }

    /// First line of a wrapper definition.
    pub fn signature(&self, wrapper_name: &str) -> String {
        format!("{} {}({})", self.signature_prefix, wrapper_name, self.state_param)
    }
}
