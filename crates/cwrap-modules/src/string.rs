//! The `string` argument type.
//!
//! Strings are borrowed from the runtime as `const char *`; nothing is
//! copied or freed by the generated code.

use cwrap_core::{DefaultKinds, HookSet, TypeDef};

use crate::numeric::default_expr;

pub fn string() -> TypeDef {
    let hooks = HookSet::new()
        .with_helpname(|_| "string".to_string())
        .with_declare(|arg| format!("const char *{} = NULL;", arg.var()))
        .with_check(|_, idx| format!("lua_isstring(L, {})", idx))
        .with_read(|arg, idx| format!("{} = lua_tostring(L, {});", arg.var(), idx))
        .with_init(|arg| format!("{} = {};", arg.var(), default_expr(arg)))
        .with_carg(|arg| arg.var())
        .with_creturn(|arg| arg.var())
        .with_postcall(|arg| {
            (arg.is_returned() || arg.is_creturned())
                .then(|| format!("lua_pushstring(L, {});", arg.var()))
        });
    // Defaults are native expressions, e.g. a quoted C literal.
    TypeDef::new("string", hooks).accepting(DefaultKinds::EXPR | DefaultKinds::ARG)
}
