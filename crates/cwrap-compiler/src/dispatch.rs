//! Dispatch assembly.
//!
//! A [`DispatchPlan`] combines every variant registered under one
//! scripting-level name into a single wrapper function. The generated body
//! reads the argument count once, tries each branch of each variant as an
//! `if` / `else if` chain in declaration order (first match wins), and falls
//! through to an error listing the expected arguments of every variant.
//!
//! With one variant the native call follows the chain directly. With several,
//! the matching branch records its variant in `argset` and a second chain
//! performs the selected call.

use cwrap_core::{GenerationError, ResolvedArgument};
use cwrap_registry::TypeRegistry;

use crate::convention::Convention;
use crate::emit::{SourceWriter, escape_c_format};
use crate::resolve::{VariantRequest, resolve_variant};
use crate::variant::{Branch, VariantPlan};

/// The variant and branch a call would select.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    /// 0-based index of the variant in declaration order.
    pub variant: usize,
    pub plan: &'a VariantPlan,
    pub branch: &'a Branch,
}

/// Every variant of one wrapper, resolved and planned.
#[derive(Debug, Clone)]
pub struct DispatchPlan {
    name: String,
    wrapper_name: String,
    variants: Vec<VariantPlan>,
}

impl DispatchPlan {
    /// Resolve and plan each requested variant.
    ///
    /// Variable slots continue across variants so their declarations can share
    /// one function body.
    pub fn build(
        registry: &TypeRegistry,
        name: &str,
        wrapper_name: &str,
        requests: &[VariantRequest],
        max_optionals: usize,
    ) -> Result<Self, GenerationError> {
        if requests.is_empty() {
            return Err(GenerationError::NoVariants);
        }

        let mut variants = Vec::with_capacity(requests.len());
        let mut slot = 1;
        for request in requests {
            let variant = resolve_variant(registry, request, slot)
                .and_then(|variant| VariantPlan::new(variant, max_optionals))
                .map_err(|err| err.in_wrap(name, &request.native_name))?;
            slot += request.args.len();
            variants.push(variant);
        }

        Ok(Self {
            name: name.to_string(),
            wrapper_name: wrapper_name.to_string(),
            variants,
        })
    }

    /// The scripting-level name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The generated native function's name.
    pub fn wrapper_name(&self) -> &str {
        &self.wrapper_name
    }

    pub fn variants(&self) -> &[VariantPlan] {
        &self.variants
    }

    pub fn is_overloaded(&self) -> bool {
        self.variants.len() > 1
    }

    /// Expected arguments of every variant, as listed in the failure message.
    pub fn help(&self) -> Result<String, GenerationError> {
        let mut parts = Vec::with_capacity(self.variants.len());
        for plan in &self.variants {
            parts.push(plan.help().map_err(|err| err.in_wrap(&self.name, plan.native_name()))?);
        }
        Ok(parts.join(" | "))
    }

    /// Evaluate the selection chain for a call of `narg` values.
    ///
    /// `matches(arg, idx)` answers whether the value at stack index `idx`
    /// passes `arg`'s check. Branches are tried in the order the generated
    /// code tries them.
    pub fn select<F>(&self, narg: usize, mut matches: F) -> Option<Selection<'_>>
    where
        F: FnMut(&ResolvedArgument, usize) -> bool,
    {
        for (index, plan) in self.variants.iter().enumerate() {
            for branch in plan.branches().iter().filter(|b| b.narg == narg) {
                let hit = branch.stack_slots().all(|(position, idx)| {
                    plan.variant()
                        .arg_ref(position)
                        .is_some_and(|arg| matches(arg.arg(), idx))
                });
                if hit {
                    return Some(Selection {
                        variant: index,
                        plan,
                        branch,
                    });
                }
            }
        }
        None
    }

    /// Generate the wrapper function.
    pub fn render(&self, conv: &Convention) -> Result<String, GenerationError> {
        let mut w = SourceWriter::new();
        w.line(conv.signature(&self.wrapper_name));
        w.line("{");
        w.line(format!("int narg = {};", conv.arg_count_expr));

        for plan in &self.variants {
            plan.emit_declarations(&mut w).map_err(|err| self.context(plan, err))?;
        }
        if self.is_overloaded() {
            w.line("int argset = 0;");
        }

        let mut keyword = "if";
        for (index, plan) in self.variants.iter().enumerate() {
            for branch in plan.branches() {
                let cond = plan.condition(branch).map_err(|err| self.context(plan, err))?;
                w.line(format!("{}({})", keyword, cond));
                w.line("{");
                if self.is_overloaded() {
                    w.line(format!("argset = {};", index + 1));
                }
                plan.emit_binding(branch, &mut w).map_err(|err| self.context(plan, err))?;
                w.line("}");
                keyword = "else if";
            }
        }
        w.line("else");
        let message = format!("expected arguments: {}", self.help()?);
        w.line(conv.error_statement(&escape_c_format(&message)));

        if self.is_overloaded() {
            for (index, plan) in self.variants.iter().enumerate() {
                let keyword = if index == 0 { "if" } else { "else if" };
                w.line(format!("{}(argset == {})", keyword, index + 1));
                w.line("{");
                plan.emit_call(&mut w).map_err(|err| self.context(plan, err))?;
                w.line("}");
            }
            w.line("return 0;");
        } else if let Some(plan) = self.variants.first() {
            plan.emit_call(&mut w).map_err(|err| self.context(plan, err))?;
        }

        w.line("}");
        w.line("");
        Ok(w.finish())
    }

    fn context(&self, plan: &VariantPlan, err: GenerationError) -> GenerationError {
        err.in_wrap(&self.name, plan.native_name())
    }
}
