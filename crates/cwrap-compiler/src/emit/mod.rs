//! Source text emitter for generated wrappers.
//!
//! The [`SourceWriter`] accumulates lines of native source for one wrapper
//! function. Hooks may return multi-line fragments; they are kept as-is.
//!
//! # Example
//!
//! ```
//! use cwrap_compiler::emit::SourceWriter;
//!
//! let mut w = SourceWriter::new();
//! w.line("{");
//! w.line_opt(Some("return 0;".to_string()));
//! w.line_opt(None);
//! w.line("}");
//!
//! assert_eq!(w.finish(), "{\nreturn 0;\n}");
//! ```

mod literal;

pub use literal::{escape_c_format, escape_c_string};

/// Accumulates generated lines.
#[derive(Debug, Default, Clone)]
pub struct SourceWriter {
    lines: Vec<String>,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one line (or a multi-line fragment).
    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Emit a fragment if present and non-empty.
    pub fn line_opt(&mut self, text: Option<String>) {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.lines.push(text);
        }
    }

    /// Number of emitted fragments.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join everything emitted so far.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
