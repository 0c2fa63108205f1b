//! User-authored argument descriptions.
//!
//! An [`ArgumentSpec`] describes one native parameter (or the native return
//! value, when flagged [`ArgFlags::CRETURNED`]). Every optional attribute is
//! explicit: the default is an `Option<DefaultValue>`, the role markers are
//! [`ArgFlags`], and per-argument hook overrides live in a [`HookSet`] whose
//! unset hooks fall through to the argument's type.

use std::fmt;

use bitflags::bitflags;
use ordered_float::OrderedFloat;

use crate::HookSet;

bitflags! {
    /// Role markers for an argument.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ArgFlags: u8 {
        /// Never supplied by the caller; always initialized from the default.
        const INVISIBLE = 1 << 0;
        /// Pushed back to the scripting runtime after the call.
        const RETURNED = 1 << 1;
        /// Captures the native function's own return value (and is pushed back).
        const CRETURNED = 1 << 2;
    }
}

bitflags! {
    /// Set of [`DefaultValue`] kinds a type knows how to initialize.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DefaultKinds: u8 {
        const CREATE = 1 << 0;
        const BOOL = 1 << 1;
        const INT = 1 << 2;
        const FLOAT = 1 << 3;
        const EXPR = 1 << 4;
        const ARG = 1 << 5;
    }
}

impl Default for DefaultKinds {
    fn default() -> Self {
        DefaultKinds::all()
    }
}

/// The default value of an optional or invisible argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultValue {
    /// Construct a fresh native value (e.g. an empty tensor).
    Create,
    /// Boolean literal.
    Bool(bool),
    /// Integer literal, in the scripting runtime's numbering.
    Int(i64),
    /// Floating point literal.
    Float(OrderedFloat<f64>),
    /// Verbatim native expression.
    Expr(String),
    /// Alias of the sibling argument at this 1-based position.
    Arg(usize),
}

impl DefaultValue {
    /// Floating point default.
    pub fn float(value: f64) -> Self {
        DefaultValue::Float(OrderedFloat(value))
    }

    /// Verbatim native expression default.
    pub fn expr(expr: impl Into<String>) -> Self {
        DefaultValue::Expr(expr.into())
    }

    /// The kind of this default, as a single flag.
    pub fn kind(&self) -> DefaultKinds {
        match self {
            DefaultValue::Create => DefaultKinds::CREATE,
            DefaultValue::Bool(_) => DefaultKinds::BOOL,
            DefaultValue::Int(_) => DefaultKinds::INT,
            DefaultValue::Float(_) => DefaultKinds::FLOAT,
            DefaultValue::Expr(_) => DefaultKinds::EXPR,
            DefaultValue::Arg(_) => DefaultKinds::ARG,
        }
    }

    /// Human-readable name of the kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DefaultValue::Create => "create",
            DefaultValue::Bool(_) => "boolean",
            DefaultValue::Int(_) => "integer",
            DefaultValue::Float(_) => "float",
            DefaultValue::Expr(_) => "expression",
            DefaultValue::Arg(_) => "argument alias",
        }
    }

    /// The default as a native literal or expression.
    ///
    /// `Create` and `Arg` have no literal form; their meaning depends on the
    /// type and the sibling list.
    pub fn literal(&self) -> Option<String> {
        match self {
            DefaultValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            DefaultValue::Int(v) => Some(v.to_string()),
            DefaultValue::Float(v) => Some(float_literal(v.0)),
            DefaultValue::Expr(e) => Some(e.clone()),
            DefaultValue::Create | DefaultValue::Arg(_) => None,
        }
    }
}

/// C spelling of a double. Non-finite values use the `<math.h>` macros.
fn float_literal(value: f64) -> String {
    if value.is_nan() {
        "NAN".to_string()
    } else if value == f64::INFINITY {
        "HUGE_VAL".to_string()
    } else if value == f64::NEG_INFINITY {
        "(-HUGE_VAL)".to_string()
    } else {
        format!("{:?}", value)
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Create => write!(f, "<new>"),
            DefaultValue::Arg(pos) => write!(f, "<arg {}>", pos),
            other => match other.literal() {
                Some(lit) => write!(f, "{}", lit),
                None => Ok(()),
            },
        }
    }
}

/// Raw description of one native argument.
///
/// # Example
///
/// ```
/// use cwrap_core::{ArgumentSpec, DefaultValue};
///
/// // Optional output tensor, created when the caller does not pass one.
/// let out = ArgumentSpec::new("DoubleTensor")
///     .with_default(DefaultValue::Create)
///     .returned();
/// assert!(out.is_returned());
/// assert!(out.default.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgumentSpec {
    /// Name of the registered type.
    pub type_name: String,
    /// Default value, if the argument is optional or invisible.
    pub default: Option<DefaultValue>,
    /// Role markers.
    pub flags: ArgFlags,
    /// Dimensionality constraint, for types that honour one.
    pub dim: Option<usize>,
    /// Hooks masking the type's hooks for this argument only.
    pub overrides: HookSet,
}

impl ArgumentSpec {
    /// Create a plain, required argument of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = Some(dim);
        self
    }

    /// Replace the per-argument hook overrides.
    pub fn with_hooks(mut self, overrides: HookSet) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn invisible(mut self) -> Self {
        self.flags |= ArgFlags::INVISIBLE;
        self
    }

    pub fn returned(mut self) -> Self {
        self.flags |= ArgFlags::RETURNED;
        self
    }

    pub fn creturned(mut self) -> Self {
        self.flags |= ArgFlags::CRETURNED;
        self
    }

    pub fn is_invisible(&self) -> bool {
        self.flags.contains(ArgFlags::INVISIBLE)
    }

    pub fn is_returned(&self) -> bool {
        self.flags.contains(ArgFlags::RETURNED)
    }

    pub fn is_creturned(&self) -> bool {
        self.flags.contains(ArgFlags::CRETURNED)
    }
}
