//! String sanitizers.
//!
//! Pure transforms applied before storage or display. They are independent
//! of rule evaluation: no sanitizer ever runs as part of `Validator::validate`
//! (the one exception is [`Rule::no_unsafe_markup`](crate::domain::Rule::no_unsafe_markup),
//! which *compares* against [`text`]).

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Longest filename [`filename`] will produce.
pub const MAX_FILENAME_LEN: usize = 255;

/// Inline formatting tags kept by [`html`].
pub const ALLOWED_HTML_TAGS: &[&str] = &["b", "i", "em", "strong", "u", "br", "p"];

/// `<script>` / `<style>` elements with their content, closed or not.
static EXECUTABLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?(?:</\s*(?:script|style)\s*>|$)")
        .expect("block pattern is valid")
});

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?(?:-->|$)").expect("comment pattern is valid"));

/// Anything that opens like a tag: `<a`, `</a`, `<!x`, `<?x`.
static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[/!?]?[A-Za-z][^>]*>?").expect("tag pattern is valid"));

/// Same extent as [`TAG`], so an unterminated tag is consumed to the end.
static ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)[^>]*>?").expect("element pattern is valid")
});

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(?:#[0-9]+|#[xX][0-9A-Fa-f]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("entity pattern is valid")
});

fn strip_executable(input: &str) -> String {
    let without_blocks = EXECUTABLE_BLOCK.replace_all(input, "");
    COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Escape `<`, `>` and any `&` that does not already start an entity.
fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, c) in input.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if !ENTITY.is_match(&input[i..]) => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip all markup and return plain text.
///
/// Script and style elements are removed with their content, every other
/// tag is removed and its text kept, and stray `&`, `<`, `>` come back as
/// entities.
pub fn text(input: &str) -> String {
    let cleaned = strip_executable(input);
    let stripped = TAG.replace_all(&cleaned, "");
    escape_text(&stripped)
}

/// Keep only [`ALLOWED_HTML_TAGS`], with every attribute removed.
pub fn html(input: &str) -> String {
    let cleaned = strip_executable(input);
    ELEMENT
        .replace_all(&cleaned, |caps: &Captures<'_>| {
            let closing = &caps[1];
            let name = caps[2].to_ascii_lowercase();
            if !ALLOWED_HTML_TAGS.contains(&name.as_str()) {
                return String::new();
            }
            match (name.as_str(), closing) {
                ("br", "/") => String::new(),
                ("br", _) => "<br>".to_owned(),
                _ => format!("<{closing}{name}>"),
            }
        })
        .into_owned()
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`, then cap the
/// result at [`MAX_FILENAME_LEN`] characters.
pub fn filename(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_LEN)
        .collect()
}

/// Double single quotes and drop semicolons.
///
/// Defense in depth only. Queries still need bound parameters.
pub fn sql_string(input: &str) -> String {
    input.replace('\'', "''").replace(';', "")
}

/// Trim and lower-case an email address.
pub fn email(input: &str) -> String {
    input.trim().to_lowercase()
}

// ── Sanitizer selection ──────────────────────────────────────────────────────

/// Names the sanitizers so callers can pick one at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sanitizer {
    Text,
    Html,
    Filename,
    Sql,
    Email,
}

impl Sanitizer {
    pub const ALL: &'static [Sanitizer] = &[
        Self::Text,
        Self::Html,
        Self::Filename,
        Self::Sql,
        Self::Email,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Filename => "filename",
            Self::Sql => "sql",
            Self::Email => "email",
        }
    }

    pub fn apply(&self, input: &str) -> String {
        match self {
            Self::Text => text(input),
            Self::Html => html(input),
            Self::Filename => filename(input),
            Self::Sql => sql_string(input),
            Self::Email => email(input),
        }
    }
}

impl fmt::Display for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_strips_tags_and_keeps_content() {
        assert_eq!(text("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(text("plain"), "plain");
    }

    #[test]
    fn text_drops_script_content() {
        assert_eq!(text("a<script>alert('x')</script>b"), "ab");
        assert_eq!(text("a<style>p{}</style>b"), "ab");
        assert_eq!(text("a<script>never closed"), "a");
    }

    #[test]
    fn text_escapes_stray_markup_characters() {
        assert_eq!(text("1 < 2"), "1 &lt; 2");
        assert_eq!(text("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(text("already &amp; escaped"), "already &amp; escaped");
    }

    #[test]
    fn html_keeps_allow_listed_tags_without_attributes() {
        assert_eq!(
            html(r#"<b class="x" onclick="evil()">bold</b> <a href="/">link</a>"#),
            "<b>bold</b> link"
        );
        assert_eq!(html("<STRONG>x</STRONG>"), "<strong>x</strong>");
        assert_eq!(html("line<br/>next"), "line<br>next");
    }

    #[test]
    fn html_removes_scripts_and_unknown_tags() {
        assert_eq!(html("<i>ok</i><script>x()</script><img src=x onerror=y>"), "<i>ok</i>");
    }

    #[test]
    fn html_drops_attributes_of_unterminated_tags() {
        let out = html("hello <img src=x onerror=alert(1) ");
        assert_eq!(out, "hello ");
        assert!(!out.contains("onerror"));

        assert_eq!(html(r#"<b onclick="alert(1)""#), "<b>");
        assert_eq!(html(r#"ok <p style="x"#), "ok <p>");
    }

    #[test]
    fn filename_substitutes_then_truncates() {
        assert_eq!(filename("my file (1).png"), "my_file__1_.png");
        assert_eq!(filename("../etc/passwd"), ".._etc_passwd");

        let long = "é".repeat(300);
        let out = filename(&long);
        assert_eq!(out.chars().count(), MAX_FILENAME_LEN);
        assert!(out.chars().all(|c| c == '_'));
    }

    #[test]
    fn filename_is_a_fixed_point() {
        let once = filename("Report: Q1/Q2 <final>.pdf");
        assert_eq!(filename(&once), once);
    }

    #[test]
    fn filename_output_is_restricted() {
        let out = filename("a\u{0}b\nc d/e\\f.txt");
        assert!(out.len() <= MAX_FILENAME_LEN);
        assert!(
            out.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        );
    }

    #[test]
    fn sql_string_doubles_quotes_and_drops_semicolons() {
        assert_eq!(sql_string("O'Brien; DROP"), "O''Brien DROP");
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[test]
    fn sanitizer_applies_by_kind() {
        assert_eq!(Sanitizer::Sql.apply("it's"), "it''s");
        assert_eq!(Sanitizer::Html.to_string(), "html");
    }
}
