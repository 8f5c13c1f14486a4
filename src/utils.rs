//! Escaping helpers for emitted JS and HTML.
//!
//! Every piece of component text that ends up in an artifact goes through
//! one of these, so source content can never break out of its literal.

// ---------------------------------------------------------------------------
// JS String Escaping
// ---------------------------------------------------------------------------

/// Escape a string for safe embedding inside a JS template literal (backtick string).
/// Prevents injection by escaping backticks, backslashes, and `${`.
pub fn escape_js_template_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => {
                out.push_str("\\${");
                chars.next();
            }
            c => out.push(c),
        }
    }
    out
}

/// Quote a string as a JS string literal.
///
/// JSON string syntax is a subset of JS string syntax, so `serde_json` does
/// the escaping. `<` is additionally escaped so the literal is also safe
/// inside an inline `<script>`.
pub fn js_string_literal(s: &str) -> String {
    serde_json::Value::String(s.to_string())
        .to_string()
        .replace('<', "\\u003c")
}

// ---------------------------------------------------------------------------
// HTML Escaping
// ---------------------------------------------------------------------------

/// Escape text for an HTML attribute value or text node.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_template_literal() {
        assert_eq!(escape_js_template_literal("a`b"), "a\\`b");
        assert_eq!(escape_js_template_literal("${x}"), "\\${x}");
        assert_eq!(escape_js_template_literal("$x {y}"), "$x {y}");
        assert_eq!(escape_js_template_literal("a\\b"), "a\\\\b");
        assert_eq!(escape_js_template_literal("{name:World}"), "{name:World}");
    }

    #[test]
    fn test_js_string_literal() {
        assert_eq!(js_string_literal("card"), "\"card\"");
        assert_eq!(js_string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(js_string_literal("</script>"), "\"\\u003c/script>\"");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("\"x\" <y>"), "&quot;x&quot; &lt;y&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
