//! Generated source accumulated by a session.

/// One `(scripting name, wrapper function)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub wrapper_name: String,
}

/// Ordered text fragments plus the wrappers they define.
///
/// Fragments are only ever appended whole, so a failed wrap request leaves
/// the history exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct GenerationHistory {
    fragments: Vec<String>,
    registrations: Vec<Registration>,
}

impl GenerationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment verbatim.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Append a wrapper definition and record its registration.
    pub fn push_wrapper(&mut self, registration: Registration, source: String) {
        self.fragments.push(source);
        self.registrations.push(registration);
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Whether a wrapper for `name` was generated since the last clear.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registrations.iter().any(|r| r.name == name)
    }

    /// All fragments joined with newlines.
    pub fn to_source(&self) -> String {
        self.fragments.join("\n")
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
        self.registrations.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_join_with_newlines() {
        let mut history = GenerationHistory::new();
        history.push("#include <lua.h>");
        history.push("");
        history.push("/* end */");
        assert_eq!(history.to_source(), "#include <lua.h>\n\n/* end */");
        assert_eq!(history.to_source(), history.to_source());
    }

    #[test]
    fn clear_drops_registrations() {
        let mut history = GenerationHistory::new();
        history.push_wrapper(
            Registration {
                name: "abs".into(),
                wrapper_name: "wrapper_abs".into(),
            },
            "static int wrapper_abs(lua_State *L)\n{\n}\n".into(),
        );
        assert!(history.is_registered("abs"));
        history.clear();
        assert!(history.is_empty());
        assert!(!history.is_registered("abs"));
        assert_eq!(history.to_source(), "");
    }
}
