//! Code-emission hooks.
//!
//! A [`HookSet`] holds the functions that turn one resolved argument into
//! fragments of native source. Types register a full set; arguments may carry
//! a partial set whose hooks mask the type's for that argument only
//! ([`HookSet::overlay`]).
//!
//! Hooks are pure functions of an [`ArgRef`] (and a stack index for
//! `check`/`read`). They carry no hidden state, so each can be exercised on
//! its own.

use std::fmt;
use std::sync::Arc;

use crate::ArgRef;

/// Hook producing a fragment from the argument alone.
pub type TextHook = Arc<dyn for<'a> Fn(ArgRef<'a>) -> String + Send + Sync>;

/// Hook producing a fragment for a 1-based stack position.
pub type StackHook = Arc<dyn for<'a> Fn(ArgRef<'a>, usize) -> String + Send + Sync>;

/// Hook producing an optional statement around the native call.
pub type StmtHook = Arc<dyn for<'a> Fn(ArgRef<'a>) -> Option<String> + Send + Sync>;

/// Names of the hooks, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    Helpname,
    Declare,
    Check,
    Read,
    Init,
    Carg,
    Creturn,
    Precall,
    Postcall,
}

impl HookKind {
    pub const fn name(self) -> &'static str {
        match self {
            HookKind::Helpname => "helpname",
            HookKind::Declare => "declare",
            HookKind::Check => "check",
            HookKind::Read => "read",
            HookKind::Init => "init",
            HookKind::Carg => "carg",
            HookKind::Creturn => "creturn",
            HookKind::Precall => "precall",
            HookKind::Postcall => "postcall",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (possibly partial) set of emission hooks.
///
/// # Example
///
/// ```
/// use cwrap_core::HookSet;
///
/// let hooks = HookSet::new()
///     .with_helpname(|_| "double".to_string())
///     .with_carg(|arg| arg.var());
/// assert!(hooks.helpname.is_some());
/// assert!(hooks.check.is_none());
/// ```
#[derive(Clone, Default)]
pub struct HookSet {
    pub helpname: Option<TextHook>,
    pub declare: Option<TextHook>,
    pub check: Option<StackHook>,
    pub read: Option<StackHook>,
    pub init: Option<TextHook>,
    pub carg: Option<TextHook>,
    pub creturn: Option<TextHook>,
    pub precall: Option<StmtHook>,
    pub postcall: Option<StmtHook>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_helpname<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>) -> String + Send + Sync + 'static,
    {
        self.helpname = Some(Arc::new(f));
        self
    }

    pub fn with_declare<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>) -> String + Send + Sync + 'static,
    {
        self.declare = Some(Arc::new(f));
        self
    }

    pub fn with_check<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>, usize) -> String + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(f));
        self
    }

    pub fn with_read<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>, usize) -> String + Send + Sync + 'static,
    {
        self.read = Some(Arc::new(f));
        self
    }

    pub fn with_init<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>) -> String + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(f));
        self
    }

    pub fn with_carg<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>) -> String + Send + Sync + 'static,
    {
        self.carg = Some(Arc::new(f));
        self
    }

    pub fn with_creturn<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>) -> String + Send + Sync + 'static,
    {
        self.creturn = Some(Arc::new(f));
        self
    }

    pub fn with_precall<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>) -> Option<String> + Send + Sync + 'static,
    {
        self.precall = Some(Arc::new(f));
        self
    }

    pub fn with_postcall<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ArgRef<'a>) -> Option<String> + Send + Sync + 'static,
    {
        self.postcall = Some(Arc::new(f));
        self
    }

    /// Merge this set over `base`: hooks set here win, the rest come from `base`.
    pub fn overlay(&self, base: &HookSet) -> HookSet {
        HookSet {
            helpname: self.helpname.clone().or_else(|| base.helpname.clone()),
            declare: self.declare.clone().or_else(|| base.declare.clone()),
            check: self.check.clone().or_else(|| base.check.clone()),
            read: self.read.clone().or_else(|| base.read.clone()),
            init: self.init.clone().or_else(|| base.init.clone()),
            carg: self.carg.clone().or_else(|| base.carg.clone()),
            creturn: self.creturn.clone().or_else(|| base.creturn.clone()),
            precall: self.precall.clone().or_else(|| base.precall.clone()),
            postcall: self.postcall.clone().or_else(|| base.postcall.clone()),
        }
    }

    /// Whether the hook of the given kind is set.
    pub fn provides(&self, kind: HookKind) -> bool {
        match kind {
            HookKind::Helpname => self.helpname.is_some(),
            HookKind::Declare => self.declare.is_some(),
            HookKind::Check => self.check.is_some(),
            HookKind::Read => self.read.is_some(),
            HookKind::Init => self.init.is_some(),
            HookKind::Carg => self.carg.is_some(),
            HookKind::Creturn => self.creturn.is_some(),
            HookKind::Precall => self.precall.is_some(),
            HookKind::Postcall => self.postcall.is_some(),
        }
    }

    /// Whether no hook is set at all.
    pub fn is_empty(&self) -> bool {
        ALL_HOOKS.iter().all(|kind| !self.provides(*kind))
    }
}

const ALL_HOOKS: [HookKind; 9] = [
    HookKind::Helpname,
    HookKind::Declare,
    HookKind::Check,
    HookKind::Read,
    HookKind::Init,
    HookKind::Carg,
    HookKind::Creturn,
    HookKind::Precall,
    HookKind::Postcall,
];

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let provided: Vec<&str> = ALL_HOOKS
            .iter()
            .filter(|kind| self.provides(**kind))
            .map(|kind| kind.name())
            .collect();
        f.debug_struct("HookSet").field("provided", &provided).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set() {
        let hooks = HookSet::new();
        assert!(hooks.is_empty());
        assert!(!hooks.provides(HookKind::Check));
    }

    #[test]
    fn overlay_prefers_own_hooks() {
        let base = HookSet::new()
            .with_helpname(|_| "base".to_string())
            .with_carg(|arg| arg.var());
        let own = HookSet::new().with_helpname(|_| "own".to_string());

        let merged = own.overlay(&base);
        assert!(merged.provides(HookKind::Helpname));
        assert!(merged.provides(HookKind::Carg));
        assert!(!merged.provides(HookKind::Init));

        let helpname = merged.helpname.as_deref().map(|h| {
            let arg = crate::ResolvedArgument::detached("x", merged.clone());
            h(crate::ArgRef::new(&arg, std::slice::from_ref(&arg)))
        });
        assert_eq!(helpname.as_deref(), Some("own"));
    }

    #[test]
    fn debug_lists_provided_hooks() {
        let hooks = HookSet::new().with_declare(|_| String::new());
        assert_eq!(format!("{:?}", hooks), "HookSet { provided: [\"declare\"] }");
    }
}
