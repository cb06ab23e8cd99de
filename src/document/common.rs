//! Common utilities for document generation.
//!
//! Shared helpers for LaTeX escaping and argument templating.

/// Escape special characters for LaTeX body text.
///
/// The input is scanned once, left to right. Text produced by a substitution
/// is never rescanned, so `\` becomes `\textbackslash{}` without its braces
/// being escaped again. Escaping is not idempotent: feeding the output back
/// in escapes it a second time.
pub fn escape_latex(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '\\' => out.push_str(r"\textbackslash{}"),
            other => out.push(other),
        }
    }

    out
}

/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = tpl.to_string();
    for (k, v) in pairs {
        let needle = format!("{{{}}}", k);
        out = out.replace(&needle, v);
    }
    out
}

/// Keep the tail of a long compiler log.
pub fn tail_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}

/// Mask a secret for logging, keeping only the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_latex("Solve 2x = 4"), "Solve 2x = 4");
        assert_eq!(escape_latex(""), "");
    }

    #[test]
    fn test_backslash_braces_not_rescanned() {
        assert_eq!(escape_latex(r"\"), r"\textbackslash{}");
        assert_eq!(escape_latex(r"\&"), r"\textbackslash{}\&");
    }

    #[test]
    fn test_fill_template() {
        let out = fill_template("-o {workdir} {source}", &[("workdir", "/tmp/a"), ("source", "/tmp/a/output.tex")]);
        assert_eq!(out, "-o /tmp/a /tmp/a/output.tex");
    }

    #[test]
    fn test_tail_lines() {
        assert_eq!(tail_lines("a\nb\nc\nd", 2), "c\nd");
        assert_eq!(tail_lines("a", 5), "a");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret("supersecret"), "*******cret");
    }
}
