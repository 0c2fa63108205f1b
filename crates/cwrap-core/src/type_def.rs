//! Registered argument types.

use std::fmt;
use std::sync::Arc;

use crate::{ArgumentSpec, DefaultKinds, HookSet};

/// Type-specific validation of an argument description.
///
/// Returns a human-readable reason on rejection.
pub type Validator = Arc<dyn Fn(&ArgumentSpec) -> Result<(), String> + Send + Sync>;

/// Type-specific configuration carried next to the hooks.
#[derive(Clone, Default)]
pub struct TypeConfig {
    /// Dimensionality constraint applied when the argument sets none.
    pub dim: Option<usize>,
    /// Values cross the boundary with the +1/-1 ordinal adjustment.
    pub ordinal: bool,
    /// Default kinds the `init` hook understands.
    pub defaults: DefaultKinds,
    /// Extra rules checked while resolving each argument.
    pub validate: Option<Validator>,
}

impl fmt::Debug for TypeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConfig")
            .field("dim", &self.dim)
            .field("ordinal", &self.ordinal)
            .field("defaults", &self.defaults)
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

/// A named argument type: its emission hooks plus configuration.
///
/// Immutable once registered.
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    hooks: HookSet,
    config: TypeConfig,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, hooks: HookSet) -> Self {
        Self {
            name: name.into(),
            hooks,
            config: TypeConfig::default(),
        }
    }

    pub fn with_dim(mut self, dim: usize) -> Self {
        self.config.dim = Some(dim);
        self
    }

    /// Mark the type as an ordinal (index) type.
    pub fn ordinal(mut self) -> Self {
        self.config.ordinal = true;
        self
    }

    /// Restrict the default kinds the type accepts.
    pub fn accepting(mut self, defaults: DefaultKinds) -> Self {
        self.config.defaults = defaults;
        self
    }

    pub fn with_validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&ArgumentSpec) -> Result<(), String> + Send + Sync + 'static,
    {
        self.config.validate = Some(Arc::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hooks(&self) -> &HookSet {
        &self.hooks
    }

    pub fn config(&self) -> &TypeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultValue;

    #[test]
    fn defaults_accept_everything() {
        let def = TypeDef::new("double", HookSet::new());
        assert_eq!(def.name(), "double");
        assert_eq!(def.config().defaults, DefaultKinds::all());
        assert!(!def.config().ordinal);
    }

    #[test]
    fn builder_configures() {
        let def = TypeDef::new("index", HookSet::new())
            .ordinal()
            .accepting(DefaultKinds::INT | DefaultKinds::EXPR)
            .with_validator(|spec| match spec.default {
                Some(DefaultValue::Int(v)) if v < 1 => Err("index defaults start at 1".into()),
                _ => Ok(()),
            });
        assert!(def.config().ordinal);
        assert!(!def.config().defaults.contains(DefaultKinds::CREATE));

        let validate = def.config().validate.as_deref();
        let bad = ArgumentSpec::new("index").with_default(DefaultValue::Int(0));
        assert!(validate.is_some_and(|v| v(&bad).is_err()));
    }
}
