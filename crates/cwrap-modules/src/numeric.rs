//! Numeric argument types.
//!
//! Every numeric type converts through `lua_Number`. The `index` type is a
//! `long` that crosses the boundary with the ordinal adjustment: values read
//! from the runtime (and literal defaults) are shifted down by one, values
//! pushed back are shifted up by one.

use std::fmt;

use cwrap_core::{ArgRef, DefaultKinds, DefaultValue, HookSet, TypeDef};

/// Primitive numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Double,
    Float,
    Long,
    Int,
    Short,
    Char,
    Byte,
}

impl NumberKind {
    pub const ALL: [NumberKind; 7] = [
        NumberKind::Double,
        NumberKind::Float,
        NumberKind::Long,
        NumberKind::Int,
        NumberKind::Short,
        NumberKind::Char,
        NumberKind::Byte,
    ];

    /// Registered type name.
    pub const fn name(self) -> &'static str {
        match self {
            NumberKind::Double => "double",
            NumberKind::Float => "float",
            NumberKind::Long => "long",
            NumberKind::Int => "int",
            NumberKind::Short => "short",
            NumberKind::Char => "char",
            NumberKind::Byte => "byte",
        }
    }

    /// Native C type.
    pub const fn c_type(self) -> &'static str {
        match self {
            NumberKind::Byte => "unsigned char",
            other => other.name(),
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The type definition for a numeric kind.
pub fn number(kind: NumberKind) -> TypeDef {
    numeric_type(kind.name(), kind.c_type())
        .accepting(DefaultKinds::INT | DefaultKinds::FLOAT | DefaultKinds::EXPR | DefaultKinds::ARG)
}

/// The `index` type: a `long` with ordinal adjustment.
pub fn index() -> TypeDef {
    numeric_type("index", "long")
        .ordinal()
        .accepting(DefaultKinds::INT | DefaultKinds::EXPR | DefaultKinds::ARG)
}

fn numeric_type(name: &'static str, c_type: &'static str) -> TypeDef {
    let hooks = HookSet::new()
        .with_helpname(move |_| name.to_string())
        .with_declare(move |arg| format!("{} {} = 0;", c_type, arg.var()))
        .with_check(|_, idx| format!("lua_isnumber(L, {})", idx))
        .with_read(move |arg, idx| {
            let shift = if arg.is_ordinal() { "-1" } else { "" };
            format!("{} = ({})lua_tonumber(L, {}){};", arg.var(), c_type, idx, shift)
        })
        .with_init(|arg| format!("{} = {};", arg.var(), default_expr(arg)))
        .with_carg(|arg| arg.var())
        .with_creturn(|arg| arg.var())
        .with_postcall(|arg| {
            let shift = if arg.is_ordinal() { "+1" } else { "" };
            (arg.is_returned() || arg.is_creturned())
                .then(|| format!("lua_pushnumber(L, (lua_Number){}{});", arg.var(), shift))
        });
    TypeDef::new(name, hooks)
}

/// Native expression of a numeric argument's default.
///
/// Literal defaults are written in the runtime's numbering, so ordinal
/// arguments shift them down by one. Sibling aliases are already native.
pub fn default_expr(arg: ArgRef<'_>) -> String {
    if let Some(alias) = arg.default_alias() {
        return alias;
    }
    match (arg.default(), arg.is_ordinal()) {
        (Some(DefaultValue::Int(v)), true) => v.saturating_sub(1).to_string(),
        (Some(DefaultValue::Expr(e)), true) => format!("({})-1", e),
        (Some(default), _) => default.literal().unwrap_or_default(),
        (None, _) => "0".to_string(),
    }
}
