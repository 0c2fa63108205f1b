//! Generation-time error types.
//!
//! Everything that can go wrong while turning a wrap request into source text
//! is a [`GenerationError`]. These are configuration defects in the
//! declarative input: they abort the wrap request before anything is
//! appended to a session's history.
//!
//! Errors raised while resolving a single variant are wrapped in
//! [`GenerationError::InWrap`] so the message names the scripting-level
//! function and the native function being wrapped. Use
//! [`GenerationError::root`] to get at the underlying cause.

use thiserror::Error;

use crate::HookKind;

/// Errors raised while building a wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// An argument names a type that is not in the registry.
    #[error("unknown argument type: {0}")]
    UnknownType(String),

    /// A creturned argument also declares a default value.
    #[error("argument {position}: a creturned argument cannot have a default")]
    CreturnedWithDefault { position: usize },

    /// An invisible argument has no default to fill it with.
    #[error("argument {position}: an invisible argument must have a default")]
    InvisibleWithoutDefault { position: usize },

    /// An argument is both invisible and creturned.
    #[error("argument {position}: an invisible argument cannot be creturned")]
    InvisibleCreturned { position: usize },

    /// More than one argument captures the native return value.
    #[error("arguments {first} and {second} are both creturned")]
    MultipleCreturned { first: usize, second: usize },

    /// The argument's default is of a kind its type cannot initialize.
    #[error("argument {position}: type '{type_name}' does not accept {kind} defaults")]
    UnsupportedDefault {
        position: usize,
        type_name: String,
        kind: &'static str,
    },

    /// A sibling-alias default names an argument it cannot copy: itself, a
    /// position outside the list, the creturned slot, a sibling of another
    /// type, or an alias leading back to it.
    #[error("argument {position}: default cannot alias argument {target}")]
    InvalidDefaultReference { position: usize, target: usize },

    /// A type-specific rule rejected the argument.
    #[error("argument {position} ({type_name}): {reason}")]
    InvalidArgument {
        position: usize,
        type_name: String,
        reason: String,
    },

    /// The argument's role needs a hook that neither the argument nor its type provides.
    #[error("argument {position}: type '{type_name}' has no {hook} hook")]
    MissingHook {
        position: usize,
        type_name: String,
        hook: HookKind,
    },

    /// Too many optional arguments to enumerate every call shape.
    #[error("{count} optional arguments exceed the limit of {limit}")]
    TooManyOptionals { count: usize, limit: usize },

    /// A wrap request without any native function.
    #[error("no native function given")]
    NoVariants,

    /// The scripting-level name was already wrapped in this session.
    #[error("'{0}' is already wrapped")]
    DuplicateWrap(String),

    /// Context wrapper naming the wrapper and native function being built.
    #[error("wrapping '{name}' as {native}: {source}")]
    InWrap {
        name: String,
        native: String,
        #[source]
        source: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Attach the scripting name and native function name to this error.
    pub fn in_wrap(self, name: impl Into<String>, native: impl Into<String>) -> Self {
        GenerationError::InWrap {
            name: name.into(),
            native: native.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, with any [`GenerationError::InWrap`] context removed.
    pub fn root(&self) -> &GenerationError {
        match self {
            GenerationError::InWrap { source, .. } => source.root(),
            other => other,
        }
    }

    /// The 1-based argument position the error refers to, if any.
    pub fn position(&self) -> Option<usize> {
        match self.root() {
            GenerationError::CreturnedWithDefault { position }
            | GenerationError::InvisibleWithoutDefault { position }
            | GenerationError::InvisibleCreturned { position }
            | GenerationError::UnsupportedDefault { position, .. }
            | GenerationError::InvalidDefaultReference { position, .. }
            | GenerationError::InvalidArgument { position, .. }
            | GenerationError::MissingHook { position, .. } => Some(*position),
            GenerationError::MultipleCreturned { second, .. } => Some(*second),
            _ => None,
        }
    }
}
