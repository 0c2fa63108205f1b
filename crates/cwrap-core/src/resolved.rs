//! Resolved arguments and variants.
//!
//! A [`ResolvedArgument`] is an [`ArgumentSpec`](crate::ArgumentSpec) after
//! its per-argument hooks have been merged over its type's hooks and it has
//! been given a position and a variable slot. Hooks see it through an
//! [`ArgRef`], which also carries the sibling list so defaults can refer to
//! other arguments.

use crate::{ArgFlags, DefaultValue, GenerationError, HookKind, HookSet};

/// One argument of a variant, ready for emission.
#[derive(Debug, Clone)]
pub struct ResolvedArgument {
    /// Name of the argument's registered type.
    pub type_name: String,
    pub default: Option<DefaultValue>,
    pub flags: ArgFlags,
    /// Dimensionality constraint (argument's own, else the type's).
    pub dim: Option<usize>,
    /// Whether the ordinal +1/-1 adjustment applies.
    pub ordinal: bool,
    /// Argument hooks merged over the type hooks.
    pub hooks: HookSet,
    /// 1-based position among the variant's arguments.
    pub position: usize,
    /// Number naming the native variable, unique within one wrapper.
    pub slot: usize,
}

impl ResolvedArgument {
    /// A lone argument at position 1, slot 1.
    ///
    /// Handy for exercising a type's hooks outside of any wrapper.
    pub fn detached(type_name: impl Into<String>, hooks: HookSet) -> Self {
        Self {
            type_name: type_name.into(),
            default: None,
            flags: ArgFlags::empty(),
            dim: None,
            ordinal: false,
            hooks,
            position: 1,
            slot: 1,
        }
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

    /// Supplied by the caller on the scripting stack.
    pub fn is_visible(&self) -> bool {
        !self.flags.intersects(ArgFlags::INVISIBLE | ArgFlags::CRETURNED)
    }

    /// Visible but may be left out by the caller.
    pub fn is_optional(&self) -> bool {
        self.is_visible() && self.default.is_some()
    }

    /// Contributes one value to the results pushed back to the runtime.
    pub fn is_result(&self) -> bool {
        self.flags.intersects(ArgFlags::RETURNED | ArgFlags::CRETURNED)
    }

    /// Name of the native variable holding this argument.
    pub fn var(&self) -> String {
        format!("arg{}", self.slot)
    }
}

/// An argument seen together with its siblings.
///
/// This is what every hook receives. It is cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct ArgRef<'a> {
    arg: &'a ResolvedArgument,
    siblings: &'a [ResolvedArgument],
}

impl<'a> ArgRef<'a> {
    pub fn new(arg: &'a ResolvedArgument, siblings: &'a [ResolvedArgument]) -> Self {
        Self { arg, siblings }
    }

    pub fn arg(&self) -> &'a ResolvedArgument {
        self.arg
    }

    /// Every argument of the variant, including this one.
    pub fn siblings(&self) -> &'a [ResolvedArgument] {
        self.siblings
    }

    /// The sibling at a 1-based position.
    pub fn sibling(&self, position: usize) -> Option<ArgRef<'a>> {
        position
            .checked_sub(1)
            .and_then(|i| self.siblings.get(i))
            .map(|arg| ArgRef::new(arg, self.siblings))
    }

    pub fn var(&self) -> String {
        self.arg.var()
    }

    pub fn position(&self) -> usize {
        self.arg.position
    }

    pub fn default(&self) -> Option<&'a DefaultValue> {
        self.arg.default.as_ref()
    }

    pub fn dim(&self) -> Option<usize> {
        self.arg.dim
    }

    pub fn is_ordinal(&self) -> bool {
        self.arg.ordinal
    }

    pub fn is_returned(&self) -> bool {
        self.arg.is_returned()
    }

    pub fn is_creturned(&self) -> bool {
        self.arg.is_creturned()
    }

    /// Native expression of the sibling this argument's default aliases.
    ///
    /// Uses the sibling's `carg` when it has one, its variable otherwise.
    pub fn default_alias(&self) -> Option<String> {
        match self.default() {
            Some(DefaultValue::Arg(target)) => self
                .sibling(*target)
                .map(|sibling| sibling.carg().unwrap_or_else(|_| sibling.var())),
            _ => None,
        }
    }

    fn missing(&self, hook: HookKind) -> GenerationError {
        GenerationError::MissingHook {
            position: self.arg.position,
            type_name: self.arg.type_name.clone(),
            hook,
        }
    }

    fn require<T: ?Sized>(
        &self,
        kind: HookKind,
        hook: Option<&'a T>,
    ) -> Result<&'a T, GenerationError> {
        hook.ok_or_else(|| self.missing(kind))
    }

    pub fn helpname(&self) -> Result<String, GenerationError> {
        let hook = self.require(HookKind::Helpname, self.arg.hooks.helpname.as_deref())?;
        Ok(hook(*self))
    }

    pub fn declare(&self) -> Result<String, GenerationError> {
        let hook = self.require(HookKind::Declare, self.arg.hooks.declare.as_deref())?;
        Ok(hook(*self))
    }

    pub fn check(&self, idx: usize) -> Result<String, GenerationError> {
        let hook = self.require(HookKind::Check, self.arg.hooks.check.as_deref())?;
        Ok(hook(*self, idx))
    }

    pub fn read(&self, idx: usize) -> Result<String, GenerationError> {
        let hook = self.require(HookKind::Read, self.arg.hooks.read.as_deref())?;
        Ok(hook(*self, idx))
    }

    pub fn init(&self) -> Result<String, GenerationError> {
        let hook = self.require(HookKind::Init, self.arg.hooks.init.as_deref())?;
        Ok(hook(*self))
    }

    pub fn carg(&self) -> Result<String, GenerationError> {
        let hook = self.require(HookKind::Carg, self.arg.hooks.carg.as_deref())?;
        Ok(hook(*self))
    }

    pub fn creturn(&self) -> Result<String, GenerationError> {
        let hook = self.require(HookKind::Creturn, self.arg.hooks.creturn.as_deref())?;
        Ok(hook(*self))
    }

    /// Statement before the native call. Empty output counts as none.
    pub fn precall(&self) -> Option<String> {
        self.arg
            .hooks
            .precall
            .as_deref()
            .and_then(|hook| hook(*self))
            .filter(|s| !s.is_empty())
    }

    /// Statement after the native call. Empty output counts as none.
    pub fn postcall(&self) -> Option<String> {
        self.arg
            .hooks
            .postcall
            .as_deref()
            .and_then(|hook| hook(*self))
            .filter(|s| !s.is_empty())
    }
}

/// One native function and its resolved argument list.
#[derive(Debug, Clone)]
pub struct Variant {
    pub native_name: String,
    pub args: Vec<ResolvedArgument>,
}

impl Variant {
    pub fn new(native_name: impl Into<String>, args: Vec<ResolvedArgument>) -> Self {
        Self {
            native_name: native_name.into(),
            args,
        }
    }

    /// Hook views of every argument, in position order.
    pub fn arg_refs(&self) -> impl Iterator<Item = ArgRef<'_>> {
        self.args.iter().map(|arg| ArgRef::new(arg, &self.args))
    }

    /// Hook view of the argument at a 1-based position.
    pub fn arg_ref(&self, position: usize) -> Option<ArgRef<'_>> {
        position
            .checked_sub(1)
            .and_then(|i| self.args.get(i))
            .map(|arg| ArgRef::new(arg, &self.args))
    }

    /// The argument capturing the native return value, if any.
    pub fn creturned(&self) -> Option<&ResolvedArgument> {
        self.args.iter().find(|arg| arg.is_creturned())
    }

    /// Arguments the caller supplies, in position order.
    pub fn visible(&self) -> impl Iterator<Item = &ResolvedArgument> {
        self.args.iter().filter(|arg| arg.is_visible())
    }

    /// Number of values pushed back to the runtime.
    pub fn result_count(&self) -> usize {
        self.args.iter().filter(|arg| arg.is_result()).count()
    }
}
