//! Generation session.
//!
//! A [`Session`] owns a type registry, the arguments prepended to every
//! variant, and the history of generated text. Wrap requests are resolved
//! against the registry and appended to the history as whole functions; a
//! rejected request leaves the session untouched.
//!
//! # Example
//!
//! ```
//! use cwrap::{ArgumentSpec, Session};
//!
//! let mut session = Session::with_builtin_types();
//! session
//!     .wrap(
//!         "numel",
//!         [(
//!             "THDoubleTensor_nElement",
//!             vec![ArgumentSpec::new("DoubleTensor"), ArgumentSpec::new("long").creturned()],
//!         )],
//!     )
//!     .unwrap();
//! session.register_table("tensor_methods");
//!
//! assert!(session.to_source().contains("static int wrapper_numel(lua_State *L)"));
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use cwrap_compiler::{DispatchPlan, SourceWriter, VariantRequest, escape_c_string};
use cwrap_core::{ArgumentSpec, GenerationError, TypeDef};
use cwrap_modules::builtin_types;
use cwrap_registry::TypeRegistry;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::history::{GenerationHistory, Registration};

/// Wrapper generation state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: SessionConfig,
    registry: TypeRegistry,
    default_args: Vec<ArgumentSpec>,
    history: GenerationHistory,
}

impl Session {
    /// Create a session with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a session with every built-in type registered.
    pub fn with_builtin_types() -> Self {
        Self::new().with_types(builtin_types())
    }

    /// Register additional types, builder style.
    pub fn with_types(mut self, types: impl IntoIterator<Item = TypeDef>) -> Self {
        self.registry.extend(types);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ==========================================================================
    // Types and default arguments
    // ==========================================================================

    /// Register a type, returning the definition it replaced, if any.
    pub fn register_type(&mut self, def: TypeDef) -> Option<TypeDef> {
        self.registry.register(def)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Prepend `spec` to every variant of every later wrap request.
    ///
    /// Default arguments take the leading positions, so `DefaultValue::Arg`
    /// references in a request count them too.
    pub fn add_default_argument(&mut self, spec: ArgumentSpec) {
        self.default_args.push(spec);
    }

    pub fn default_arguments(&self) -> &[ArgumentSpec] {
        &self.default_args
    }

    // ==========================================================================
    // Generation
    // ==========================================================================

    /// Native name of the wrapper generated for `name`.
    pub fn wrapper_name(&self, name: &str) -> String {
        format!("{}{}", self.config.wrapper_prefix, name)
    }

    /// Resolve and plan a wrap request without generating anything.
    pub fn plan<V>(
        &self,
        name: &str,
        variants: impl IntoIterator<Item = V>,
    ) -> Result<DispatchPlan, GenerationError>
    where
        V: Into<VariantRequest>,
    {
        let requests: Vec<VariantRequest> = variants
            .into_iter()
            .map(|variant| self.with_default_args(variant.into()))
            .collect();
        DispatchPlan::build(
            &self.registry,
            name,
            &self.wrapper_name(name),
            &requests,
            self.config.max_optionals,
        )
    }

    /// Generate the wrapper for `name` and append it to the history.
    ///
    /// Each variant is a native function name and its argument list. Nothing
    /// is appended when the request is rejected.
    #[tracing::instrument(level = "debug", skip_all, fields(name = %name))]
    pub fn wrap<V>(
        &mut self,
        name: &str,
        variants: impl IntoIterator<Item = V>,
    ) -> Result<(), GenerationError>
    where
        V: Into<VariantRequest>,
    {
        if self.history.is_registered(name) {
            return Err(GenerationError::DuplicateWrap(name.to_string()));
        }
        let plan = self.plan(name, variants)?;
        let source = plan.render(&self.config.convention())?;
        debug!(
            wrapper = plan.wrapper_name(),
            variants = plan.variants().len(),
            "generated wrapper"
        );
        self.history.push_wrapper(
            Registration {
                name: name.to_string(),
                wrapper_name: plan.wrapper_name().to_string(),
            },
            source,
        );
        Ok(())
    }

    fn with_default_args(&self, mut request: VariantRequest) -> VariantRequest {
        if !self.default_args.is_empty() {
            let mut args = self.default_args.clone();
            args.append(&mut request.args);
            request.args = args;
        }
        request
    }

    // ==========================================================================
    // History
    // ==========================================================================

    /// Append text verbatim.
    pub fn print(&mut self, text: impl Into<String>) {
        self.history.push(text);
    }

    /// Everything generated since the last clear, joined with newlines.
    pub fn to_source(&self) -> String {
        self.history.to_source()
    }

    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    pub fn registrations(&self) -> &[Registration] {
        self.history.registrations()
    }

    /// Drop all generated text and registrations.
    ///
    /// Registered types and default arguments are kept.
    pub fn clear_history(&mut self) {
        debug!(
            fragments = self.history.fragments().len(),
            registrations = self.history.registrations().len(),
            "clearing history"
        );
        self.history.clear();
    }

    /// Append a registration table listing every wrapper since the last clear.
    pub fn register_table(&mut self, table_name: &str) {
        let mut w = SourceWriter::new();
        w.line(format!(
            "static const struct {} {}[] = {{",
            self.config.reg_struct, table_name
        ));
        for reg in self.history.registrations() {
            w.line(format!(
                "{{\"{}\", {}}},",
                escape_c_string(&reg.name),
                reg.wrapper_name
            ));
        }
        w.line("{NULL, NULL}");
        w.line("};");
        w.line("");
        self.history.push(w.finish());
    }

    /// Write [`to_source`](Self::to_source) to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        fs::write(path, self.to_source()).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "wrote generated source");
        Ok(())
    }
}
