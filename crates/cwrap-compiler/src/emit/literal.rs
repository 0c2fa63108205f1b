//! C string literal helpers.

/// Escape text for use inside a double-quoted C string passed to a
/// printf-style error function.
pub fn escape_c_format(text: &str) -> String {
    escape(text, true)
}

/// Escape text for use inside a plain double-quoted C string.
pub fn escape_c_string(text: &str) -> String {
    escape(text, false)
}

fn escape(text: &str, format: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '%' if format => out.push_str("%%"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(escape_c_format("DoubleTensor [double]"), "DoubleTensor [double]");
    }

    #[test]
    fn escapes_quotes_and_format_specifiers() {
        assert_eq!(escape_c_format("say \"%d\"\\"), "say \\\"%%d\\\"\\\\");
        assert_eq!(escape_c_format("a\nb"), "a\\nb");
    }

    #[test]
    fn plain_strings_keep_percent() {
        assert_eq!(escape_c_string("50%"), "50%");
        assert_eq!(escape_c_string("say \"hi\"\\"), "say \\\"hi\\\"\\\\");
    }
}
