//! Tensor argument types.
//!
//! One type per element kind, named `<Kind>Tensor`. Tensors are userdata
//! carrying the `torch.<Kind>Tensor` metatable. A tensor read from the stack
//! remembers its stack index in a companion `<var>_idx` variable so that a
//! returned tensor can be pushed back as the caller's own object instead of
//! a fresh userdata.

use std::fmt;

use cwrap_core::{ArgRef, DefaultKinds, DefaultValue, HookSet, TypeDef};

/// Tensor element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorKind {
    Double,
    Float,
    Long,
    Int,
    Short,
    Char,
    Byte,
}

impl TensorKind {
    pub const ALL: [TensorKind; 7] = [
        TensorKind::Double,
        TensorKind::Float,
        TensorKind::Long,
        TensorKind::Int,
        TensorKind::Short,
        TensorKind::Char,
        TensorKind::Byte,
    ];

    /// Registered type name, e.g. `DoubleTensor`.
    pub const fn name(self) -> &'static str {
        match self {
            TensorKind::Double => "DoubleTensor",
            TensorKind::Float => "FloatTensor",
            TensorKind::Long => "LongTensor",
            TensorKind::Int => "IntTensor",
            TensorKind::Short => "ShortTensor",
            TensorKind::Char => "CharTensor",
            TensorKind::Byte => "ByteTensor",
        }
    }

    /// Native struct name, e.g. `THDoubleTensor`.
    pub fn c_type(self) -> String {
        format!("TH{}", self.name())
    }

    /// Runtime metatable name, e.g. `torch.DoubleTensor`.
    pub fn metatable(self) -> String {
        format!("torch.{}", self.name())
    }
}

impl fmt::Display for TensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The type definition for a tensor kind.
///
/// Accepts `Create` (a fresh empty tensor) and sibling-alias defaults. A
/// created tensor is only reachable by the caller when it is returned, so
/// `Create` on a non-returned argument is rejected.
pub fn tensor(kind: TensorKind) -> TypeDef {
    let hooks = HookSet::new()
        .with_helpname(move |arg| match arg.dim() {
            Some(dim) => format!("{}~{}D", kind.name(), dim),
            None => kind.name().to_string(),
        })
        .with_declare(move |arg| {
            let var = arg.var();
            format!("{} *{} = NULL;\nint {}_idx = 0;", kind.c_type(), var, var)
        })
        .with_check(move |arg, idx| check(kind, arg, idx))
        .with_read(move |arg, idx| {
            let var = arg.var();
            format!(
                "{} = luaT_toudata(L, {}, \"{}\");\n{}_idx = {};",
                var,
                idx,
                kind.metatable(),
                var,
                idx
            )
        })
        .with_init(move |arg| match arg.default() {
            Some(DefaultValue::Create) => format!("{} = {}_new();", arg.var(), kind.c_type()),
            _ => {
                let source = arg.default_alias().unwrap_or_else(|| "NULL".to_string());
                format!("{} = {};", arg.var(), source)
            }
        })
        .with_carg(|arg| arg.var())
        .with_creturn(|arg| arg.var())
        .with_precall(move |arg| {
            // An aliased output that was not passed gets pushed as a new
            // userdata, which takes its own reference.
            let aliased = matches!(arg.default(), Some(DefaultValue::Arg(_)));
            (arg.is_returned() && aliased).then(|| {
                let var = arg.var();
                format!("if(!{}_idx)\n{}_retain({});", var, kind.c_type(), var)
            })
        })
        .with_postcall(move |arg| push(kind, arg));

    TypeDef::new(kind.name(), hooks)
        .accepting(DefaultKinds::CREATE | DefaultKinds::ARG)
        .with_validator(|spec| match spec.default {
            Some(DefaultValue::Create) if !spec.is_returned() => {
                Err("a tensor created by default must be returned".to_string())
            }
            _ => Ok(()),
        })
}

fn check(kind: TensorKind, arg: ArgRef<'_>, idx: usize) -> String {
    let isudata = format!("luaT_isudata(L, {}, \"{}\")", idx, kind.metatable());
    match arg.dim() {
        Some(dim) => format!(
            "({} && (({}*)luaT_toudata(L, {}, \"{}\"))->nDimension == {})",
            isudata,
            kind.c_type(),
            idx,
            kind.metatable(),
            dim
        ),
        None => isudata,
    }
}

fn push(kind: TensorKind, arg: ArgRef<'_>) -> Option<String> {
    let var = arg.var();
    let fresh = format!("luaT_pushudata(L, {}, \"{}\");", var, kind.metatable());
    if arg.is_creturned() {
        return Some(fresh);
    }
    if !arg.is_returned() {
        return None;
    }
    Some(match arg.default() {
        // May have been passed by the caller, or filled in by its default.
        Some(_) => format!("if({}_idx)\nlua_pushvalue(L, {}_idx);\nelse\n{}", var, var, fresh),
        None => format!("lua_pushvalue(L, {}_idx);", var),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwrap_core::{ArgFlags, ArgumentSpec, ResolvedArgument};
    use pretty_assertions::assert_eq;

    fn resolved(kind: TensorKind) -> ResolvedArgument {
        let def = tensor(kind);
        ResolvedArgument::detached(def.name(), def.hooks().clone())
    }

    fn view(arg: &ResolvedArgument) -> ArgRef<'_> {
        ArgRef::new(arg, std::slice::from_ref(arg))
    }

    #[test]
    fn names() {
        assert_eq!(TensorKind::Float.name(), "FloatTensor");
        assert_eq!(TensorKind::Float.c_type(), "THFloatTensor");
        assert_eq!(TensorKind::Byte.metatable(), "torch.ByteTensor");
    }

    #[test]
    fn declare_and_read() {
        let arg = resolved(TensorKind::Double);
        let arg = view(&arg);
        assert_eq!(arg.declare().unwrap(), "THDoubleTensor *arg1 = NULL;\nint arg1_idx = 0;");
        assert_eq!(
            arg.read(2).unwrap(),
            "arg1 = luaT_toudata(L, 2, \"torch.DoubleTensor\");\narg1_idx = 2;"
        );
        assert_eq!(arg.check(2).unwrap(), "luaT_isudata(L, 2, \"torch.DoubleTensor\")");
        assert_eq!(arg.helpname().unwrap(), "DoubleTensor");
    }

    #[test]
    fn dimension_constraint() {
        let arg = ResolvedArgument {
            dim: Some(2),
            ..resolved(TensorKind::Float)
        };
        let arg = view(&arg);
        assert_eq!(arg.helpname().unwrap(), "FloatTensor~2D");
        assert_eq!(
            arg.check(1).unwrap(),
            concat!(
                "(luaT_isudata(L, 1, \"torch.FloatTensor\") && ",
                "((THFloatTensor*)luaT_toudata(L, 1, \"torch.FloatTensor\"))->nDimension == 2)"
            )
        );
    }

    #[test]
    fn created_output() {
        let arg = ResolvedArgument {
            default: Some(DefaultValue::Create),
            flags: ArgFlags::RETURNED,
            ..resolved(TensorKind::Double)
        };
        let arg = view(&arg);
        assert_eq!(arg.init().unwrap(), "arg1 = THDoubleTensor_new();");
        assert_eq!(arg.precall(), None);
        assert_eq!(
            arg.postcall().as_deref(),
            Some(concat!(
                "if(arg1_idx)\nlua_pushvalue(L, arg1_idx);\n",
                "else\nluaT_pushudata(L, arg1, \"torch.DoubleTensor\");"
            ))
        );
    }

    #[test]
    fn aliased_output_is_retained() {
        let source = ResolvedArgument {
            position: 2,
            slot: 2,
            ..resolved(TensorKind::Double)
        };
        let output = ResolvedArgument {
            default: Some(DefaultValue::Arg(2)),
            flags: ArgFlags::RETURNED,
            ..resolved(TensorKind::Double)
        };
        let args = vec![output, source];
        let arg = ArgRef::new(&args[0], &args);
        assert_eq!(arg.init().unwrap(), "arg1 = arg2;");
        assert_eq!(
            arg.precall().as_deref(),
            Some("if(!arg1_idx)\nTHDoubleTensor_retain(arg1);")
        );
    }

    #[test]
    fn plain_input_is_not_pushed() {
        let arg = resolved(TensorKind::Long);
        assert_eq!(view(&arg).postcall(), None);
        assert_eq!(view(&arg).precall(), None);
    }

    #[test]
    fn returned_input_pushes_original() {
        let arg = ResolvedArgument {
            flags: ArgFlags::RETURNED,
            ..resolved(TensorKind::Int)
        };
        assert_eq!(view(&arg).postcall().as_deref(), Some("lua_pushvalue(L, arg1_idx);"));
    }

    #[test]
    fn creturned_is_fresh_userdata() {
        let arg = ResolvedArgument {
            flags: ArgFlags::CRETURNED,
            ..resolved(TensorKind::Short)
        };
        assert_eq!(
            view(&arg).postcall().as_deref(),
            Some("luaT_pushudata(L, arg1, \"torch.ShortTensor\");")
        );
    }

    #[test]
    fn created_default_requires_returned() {
        let def = tensor(TensorKind::Double);
        let validate = def.config().validate.as_deref().unwrap();
        let created = ArgumentSpec::new("DoubleTensor").with_default(DefaultValue::Create);
        assert!(validate(&created).is_err());
        assert!(validate(&created.returned()).is_ok());
    }
}
