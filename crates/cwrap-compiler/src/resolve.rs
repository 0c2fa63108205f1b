//! Argument resolution.
//!
//! Joins each [`ArgumentSpec`] of a variant with its registered [`TypeDef`]:
//! hooks set on the argument mask the type's hooks of the same name, every
//! other hook falls through to the type. Resolution is also where the
//! declarative input is validated; any violation aborts the wrap request.

use cwrap_core::{ArgumentSpec, DefaultValue, GenerationError, ResolvedArgument, TypeDef, Variant};
use cwrap_registry::TypeRegistry;

/// One native function and its raw argument descriptions.
#[derive(Debug, Clone)]
pub struct VariantRequest {
    pub native_name: String,
    pub args: Vec<ArgumentSpec>,
}

impl VariantRequest {
    pub fn new(native_name: impl Into<String>, args: Vec<ArgumentSpec>) -> Self {
        Self {
            native_name: native_name.into(),
            args,
        }
    }
}

impl<N: Into<String>> From<(N, Vec<ArgumentSpec>)> for VariantRequest {
    fn from((native_name, args): (N, Vec<ArgumentSpec>)) -> Self {
        Self::new(native_name, args)
    }
}

/// Resolve one argument against its type.
///
/// `position` is 1-based within `siblings`; `slot` names the native variable.
pub fn resolve_argument(
    spec: &ArgumentSpec,
    position: usize,
    siblings: &[ArgumentSpec],
    def: &TypeDef,
    slot: usize,
) -> Result<ResolvedArgument, GenerationError> {
    if spec.is_invisible() && spec.is_creturned() {
        return Err(GenerationError::InvisibleCreturned { position });
    }
    if spec.is_creturned() && spec.default.is_some() {
        return Err(GenerationError::CreturnedWithDefault { position });
    }
    if spec.is_invisible() && spec.default.is_none() {
        return Err(GenerationError::InvisibleWithoutDefault { position });
    }

    let config = def.config();
    if let Some(default) = &spec.default {
        if !config.defaults.contains(default.kind()) {
            return Err(GenerationError::UnsupportedDefault {
                position,
                type_name: def.name().to_string(),
                kind: default.kind_name(),
            });
        }
        if let DefaultValue::Arg(target) = default {
            check_alias(spec, position, *target, siblings)?;
        }
    }

    if let Some(validate) = config.validate.as_deref() {
        validate(spec).map_err(|reason| GenerationError::InvalidArgument {
            position,
            type_name: def.name().to_string(),
            reason,
        })?;
    }

    Ok(ResolvedArgument {
        type_name: def.name().to_string(),
        default: spec.default.clone(),
        flags: spec.flags,
        dim: spec.dim.or(config.dim),
        ordinal: config.ordinal,
        hooks: spec.overrides.overlay(def.hooks()),
        position,
        slot,
    })
}

/// An alias must copy a sibling of the same type that holds a value before
/// the call and does not, through its own default, lead back here.
fn check_alias(
    spec: &ArgumentSpec,
    position: usize,
    target: usize,
    siblings: &[ArgumentSpec],
) -> Result<(), GenerationError> {
    let invalid = || GenerationError::InvalidDefaultReference { position, target };
    let sibling = sibling_at(siblings, target)
        .filter(|_| target != position)
        .ok_or_else(invalid)?;
    if sibling.is_creturned() || sibling.type_name != spec.type_name {
        return Err(invalid());
    }

    let mut current = target;
    for _ in 0..siblings.len() {
        match sibling_at(siblings, current).and_then(|s| s.default.as_ref()) {
            Some(DefaultValue::Arg(next)) if *next == position => return Err(invalid()),
            Some(DefaultValue::Arg(next)) => current = *next,
            _ => break,
        }
    }
    Ok(())
}

fn sibling_at(siblings: &[ArgumentSpec], position: usize) -> Option<&ArgumentSpec> {
    position.checked_sub(1).and_then(|i| siblings.get(i))
}

/// Resolve every argument of a variant.
///
/// Variable slots are numbered from `first_slot` so several variants of one
/// wrapper never share a native variable name.
pub fn resolve_variant(
    registry: &TypeRegistry,
    request: &VariantRequest,
    first_slot: usize,
) -> Result<Variant, GenerationError> {
    let mut args = Vec::with_capacity(request.args.len());
    let mut creturned: Option<usize> = None;

    for (i, spec) in request.args.iter().enumerate() {
        let position = i + 1;
        let def = registry.lookup(&spec.type_name)?;
        let arg = resolve_argument(spec, position, &request.args, def, first_slot + i)?;

        if arg.is_creturned() {
            if let Some(first) = creturned {
                return Err(GenerationError::MultipleCreturned {
                    first,
                    second: position,
                });
            }
            creturned = Some(position);
        }
        args.push(arg);
    }

    Ok(Variant::new(request.native_name.clone(), args))
}
