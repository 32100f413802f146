use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Render generated text as an HTML fragment.
///
/// Order matters: escape, strip code fences, `**x**` to `<b>x</b>`, collapse
/// three or more newlines to two, remaining `*` to a bullet entity.
pub fn render_display_html(text: &str) -> String {
    let escaped = escape_html(text);
    let unfenced = escaped.replace("```", "");
    let bolded = BOLD.replace_all(&unfenced, "<b>$1</b>");
    let collapsed = EXCESS_NEWLINES.replace_all(&bolded, "\n\n");
    collapsed.replace('*', "&#8226;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_bold_markup() {
        let html = render_display_html("This is **bold** text");
        assert_eq!(html, "This is <b>bold</b> text");
        assert!(!html.contains('*'));
    }

    #[test]
    fn test_script_is_inert() {
        let html = render_display_html("<script>alert('x')</script>");
        assert_eq!(
            html,
            "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"
        );
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_bold_cannot_smuggle_markup() {
        let html = render_display_html("**<img src=x onerror=alert(1)>**");
        assert_eq!(html, "<b>&lt;img src=x onerror=alert(1)&gt;</b>");
    }

    #[test]
    fn test_fences_newlines_and_bullets() {
        let html = render_display_html("```rust\nfn main() {}\n```\n\n\n\n* one\n* two");
        assert_eq!(html, "rust\nfn main() {}\n\n&#8226; one\n&#8226; two");
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        assert_eq!(
            render_display_html("**a\nb**"),
            "&#8226;&#8226;a\nb&#8226;&#8226;"
        );
    }
}
