//! Per-variant planning and emission.
//!
//! A variant accepts every call that supplies its required arguments plus any
//! subset of its optional ones. [`VariantPlan`] enumerates those call shapes
//! as [`Branch`]es: optional arguments are toggled in binary counting order
//! (the first optional is the lowest bit), so the shape with no optionals
//! comes first. Each branch checks an exact argument count and the type of
//! every supplied value at its stack position; when it matches, supplied
//! values are read and every absent argument is initialized from its default.

use cwrap_core::{DefaultValue, GenerationError, Variant};

use crate::emit::SourceWriter;

/// One call shape of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Exact number of supplied arguments.
    pub narg: usize,
    /// Positions read from the stack; the k-th entry sits at stack index k+1.
    pub present: Vec<usize>,
    /// Positions initialized from their default.
    pub absent: Vec<usize>,
}

impl Branch {
    /// Pairs of (argument position, stack index) for supplied arguments.
    pub fn stack_slots(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.present.iter().enumerate().map(|(k, position)| (*position, k + 1))
    }
}

/// Range of supplied argument counts a variant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub fn accepts(&self, narg: usize) -> bool {
        (self.min..=self.max).contains(&narg)
    }
}

/// A resolved variant together with its enumerated call shapes.
#[derive(Debug, Clone)]
pub struct VariantPlan {
    variant: Variant,
    branches: Vec<Branch>,
}

impl VariantPlan {
    /// Plan a variant, allowing at most `max_optionals` optional arguments.
    pub fn new(variant: Variant, max_optionals: usize) -> Result<Self, GenerationError> {
        let branches = enumerate_branches(&variant, max_optionals)?;
        tracing::trace!(
            native = variant.native_name.as_str(),
            branches = branches.len(),
            "planned variant"
        );
        Ok(Self { variant, branches })
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn native_name(&self) -> &str {
        &self.variant.native_name
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn arity(&self) -> Arity {
        let max = self.variant.visible().count();
        let min = self.variant.visible().filter(|arg| arg.default.is_none()).count();
        Arity { min, max }
    }

    /// Number of values the wrapper pushes when this variant runs.
    pub fn result_count(&self) -> usize {
        self.variant.result_count()
    }

    /// Expected-arguments text for the failure message.
    ///
    /// Optional arguments are bracketed.
    pub fn help(&self) -> Result<String, GenerationError> {
        let mut parts = Vec::new();
        for arg in self.variant.arg_refs().filter(|r| r.arg().is_visible()) {
            let name = arg.helpname()?;
            if arg.arg().is_optional() {
                parts.push(format!("[{}]", name));
            } else {
                parts.push(name);
            }
        }
        if parts.is_empty() {
            return Ok("no arguments".to_string());
        }
        Ok(parts.join(" "))
    }

    /// Declarations of every argument, invisible ones included.
    pub fn emit_declarations(&self, w: &mut SourceWriter) -> Result<(), GenerationError> {
        for arg in self.variant.arg_refs() {
            w.line(arg.declare()?);
        }
        Ok(())
    }

    /// Matching condition of one branch, against the `narg` variable.
    pub fn condition(&self, branch: &Branch) -> Result<String, GenerationError> {
        let mut cond = format!("narg == {}", branch.narg);
        for (position, idx) in branch.stack_slots() {
            if let Some(arg) = self.variant.arg_ref(position) {
                cond.push_str(" && ");
                cond.push_str(&arg.check(idx)?);
            }
        }
        Ok(cond)
    }

    /// Reads of supplied values followed by default initialization of absent ones.
    pub fn emit_binding(
        &self,
        branch: &Branch,
        w: &mut SourceWriter,
    ) -> Result<(), GenerationError> {
        for (position, idx) in branch.stack_slots() {
            if let Some(arg) = self.variant.arg_ref(position) {
                w.line(arg.read(idx)?);
            }
        }
        for position in self.init_order(branch) {
            if let Some(arg) = self.variant.arg_ref(position) {
                w.line(arg.init()?);
            }
        }
        Ok(())
    }

    /// Absent positions in initialization order.
    ///
    /// An alias default copies its sibling's variable, so when that sibling
    /// is absent as well it has to be initialized first. Positions are
    /// ordered by the length of their chain of absent alias targets.
    fn init_order(&self, branch: &Branch) -> Vec<usize> {
        let alias_target = |position: usize| match self
            .variant
            .arg_ref(position)
            .and_then(|arg| arg.default())
        {
            Some(DefaultValue::Arg(target)) => Some(*target),
            _ => None,
        };
        let depth = |position: usize| {
            let mut depth = 0;
            let mut current = position;
            while let Some(target) = alias_target(current) {
                if depth >= branch.absent.len() || !branch.absent.contains(&target) {
                    break;
                }
                depth += 1;
                current = target;
            }
            depth
        };

        let mut order = branch.absent.clone();
        order.sort_by_key(|position| depth(*position));
        order
    }

    /// The native call with its surrounding statements and the return.
    pub fn emit_call(&self, w: &mut SourceWriter) -> Result<(), GenerationError> {
        for arg in self.variant.arg_refs() {
            w.line_opt(arg.precall());
        }

        let mut cargs = Vec::with_capacity(self.variant.args.len());
        let mut creturn = None;
        for arg in self.variant.arg_refs() {
            if arg.is_creturned() {
                creturn = Some(arg.creturn()?);
            } else {
                cargs.push(arg.carg()?);
            }
        }
        let call = format!("{}({})", self.variant.native_name, cargs.join(","));
        match creturn {
            Some(target) => w.line(format!("{} = {};", target, call)),
            None => w.line(format!("{};", call)),
        }

        for arg in self.variant.arg_refs() {
            w.line_opt(arg.postcall());
        }
        w.line(format!("return {};", self.result_count()));
        Ok(())
    }
}

fn enumerate_branches(
    variant: &Variant,
    max_optionals: usize,
) -> Result<Vec<Branch>, GenerationError> {
    let optionals: Vec<usize> = variant
        .args
        .iter()
        .filter(|arg| arg.is_optional())
        .map(|arg| arg.position)
        .collect();
    let count = optionals.len();
    let too_many = || GenerationError::TooManyOptionals {
        count,
        limit: max_optionals,
    };
    if count > max_optionals {
        return Err(too_many());
    }
    let shapes = u32::try_from(count)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .ok_or_else(too_many)?;

    let mut branches = Vec::with_capacity(shapes);
    for mask in 0..shapes {
        let chosen = |position: usize| {
            optionals
                .iter()
                .position(|p| *p == position)
                .is_some_and(|bit| mask & (1usize << bit) != 0)
        };

        let mut present = Vec::new();
        let mut absent = Vec::new();
        for arg in &variant.args {
            if arg.is_creturned() {
                continue;
            }
            let supplied = arg.is_visible() && (arg.default.is_none() || chosen(arg.position));
            if supplied {
                present.push(arg.position);
            } else {
                absent.push(arg.position);
            }
        }
        branches.push(Branch {
            narg: present.len(),
            present,
            absent,
        });
    }
    Ok(branches)
}
