//! The `boolean` argument type.

use cwrap_core::{DefaultKinds, HookSet, TypeDef};

use crate::numeric::default_expr;

/// Booleans travel as native `int`s.
pub fn boolean() -> TypeDef {
    let hooks = HookSet::new()
        .with_helpname(|_| "boolean".to_string())
        .with_declare(|arg| format!("int {} = 0;", arg.var()))
        .with_check(|_, idx| format!("lua_isboolean(L, {})", idx))
        .with_read(|arg, idx| format!("{} = lua_toboolean(L, {});", arg.var(), idx))
        .with_init(|arg| format!("{} = {};", arg.var(), default_expr(arg)))
        .with_carg(|arg| arg.var())
        .with_creturn(|arg| arg.var())
        .with_postcall(|arg| {
            (arg.is_returned() || arg.is_creturned())
                .then(|| format!("lua_pushboolean(L, {});", arg.var()))
        });
    TypeDef::new("boolean", hooks)
        .accepting(DefaultKinds::BOOL | DefaultKinds::EXPR | DefaultKinds::ARG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwrap_core::{ArgFlags, ArgRef, DefaultValue, ResolvedArgument};

    #[test]
    fn hooks() {
        let def = boolean();
        let arg = ResolvedArgument {
            default: Some(DefaultValue::Bool(true)),
            flags: ArgFlags::RETURNED,
            ..ResolvedArgument::detached("boolean", def.hooks().clone())
        };
        let arg = ArgRef::new(&arg, std::slice::from_ref(&arg));
        assert_eq!(arg.declare().unwrap(), "int arg1 = 0;");
        assert_eq!(arg.check(1).unwrap(), "lua_isboolean(L, 1)");
        assert_eq!(arg.read(1).unwrap(), "arg1 = lua_toboolean(L, 1);");
        assert_eq!(arg.init().unwrap(), "arg1 = 1;");
        assert_eq!(arg.postcall().as_deref(), Some("lua_pushboolean(L, arg1);"));
    }

    #[test]
    fn rejects_numeric_defaults() {
        let kinds = boolean().config().defaults;
        assert!(kinds.contains(DefaultKinds::BOOL));
        assert!(!kinds.contains(DefaultKinds::INT));
        assert!(!kinds.contains(DefaultKinds::FLOAT));
    }
}
