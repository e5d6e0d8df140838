//! Input sanitization for form fields, URLs, filenames and search queries.
//!
//! # Design
//! - Every function is total: bad input degrades to an empty string, never an error.
//! - Markup is stripped (text kept) rather than escaped; the UI renders text nodes only.
//! - Elements whose content is code (`script`, `style`, ...) are dropped with their content.

use docboard_api_models::SettingsRequest;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Schemes that are never accepted in a URL field.
pub const DANGEROUS_SCHEMES: [&str; 5] = ["javascript:", "data:", "vbscript:", "file:", "about:"];

/// Maximum filename length kept by [`sanitize_filename`].
pub const MAX_FILENAME_CHARS: usize = 255;

const DROPPED_ELEMENTS: [&str; 7] = [
    "script", "style", "iframe", "object", "embed", "noscript", "template",
];

const SUSPICIOUS_PATTERNS: [&str; 10] = [
    r"(?i)<script",
    r"(?i)javascript:",
    r"(?i)on\w+\s*=",
    r"(?i)<iframe",
    r"(?i)<object",
    r"(?i)<embed",
    r"(?i)<link",
    r"(?i)<meta",
    r"(?i)data:\s*text/html",
    r"(?i)vbscript:",
];

struct MarkupPatterns {
    dropped: Vec<Regex>,
    comment: Option<Regex>,
    declaration: Option<Regex>,
    tag: Option<Regex>,
    suspicious: Vec<Regex>,
}

static PATTERNS: LazyLock<MarkupPatterns> = LazyLock::new(|| MarkupPatterns {
    dropped: DROPPED_ELEMENTS
        .iter()
        .filter_map(|name| {
            Regex::new(&format!(r"(?is)<{name}\b[^>]*>.*?(?:</{name}\s*>|\z)")).ok()
        })
        .collect(),
    comment: Regex::new(r"(?s)<!--.*?(?:-->|\z)").ok(),
    declaration: Regex::new(r"(?s)<[!?][^>]*(?:>|\z)").ok(),
    tag: Regex::new(r"(?s)</?[A-Za-z][^>]*(?:>|\z)").ok(),
    suspicious: SUSPICIOUS_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect(),
});

/// Strip all markup from a form value and keep its text content.
#[must_use]
pub fn sanitize_form_input(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    // Stripping may expose a new tag (`<<b>b>`); every changing pass shortens the text.
    let patterns = &*PATTERNS;
    let mut current = input.to_string();
    loop {
        let next = strip_once(patterns, &current);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn strip_once(patterns: &MarkupPatterns, input: &str) -> String {
    let mut text = input.to_string();
    for element in &patterns.dropped {
        text = element.replace_all(&text, "").into_owned();
    }
    for pattern in [&patterns.comment, &patterns.declaration, &patterns.tag]
        .into_iter()
        .flatten()
    {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text
}

/// Sanitize content destined for display. Same policy as form input.
#[must_use]
pub fn sanitize_for_display(content: &str) -> String {
    sanitize_form_input(content)
}

/// Sanitize a URL and reject it entirely when it uses a dangerous scheme.
#[must_use]
pub fn sanitize_url(url: &str) -> String {
    let sanitized = sanitize_form_input(url);
    let lowered = sanitized.trim().to_lowercase();
    if DANGEROUS_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return String::new();
    }
    sanitized
}

/// Sanitize a filename so it is safe on common filesystems.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let sanitized = sanitize_form_input(filename);
    let kept: String = sanitized
        .chars()
        .filter(|ch| !matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .filter(|ch| u32::from(*ch) > 31)
        .collect();
    let trimmed = kept.trim_matches(|ch: char| ch.is_whitespace() || ch == '.');
    trimmed.chars().take(MAX_FILENAME_CHARS).collect()
}

/// Sanitize a search query: strip markup, stray angle brackets, and padding.
#[must_use]
pub fn sanitize_search_query(query: &str) -> String {
    sanitize_form_input(query)
        .replace(['<', '>'], "")
        .trim()
        .to_string()
}

/// Apply `sanitizer` to every string leaf of a JSON object, keeping its shape.
///
/// Values that are not objects are returned unchanged.
#[must_use]
pub fn sanitize_object(value: Value, sanitizer: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, leaf)| (key, sanitize_leaf(leaf, sanitizer)))
                .collect(),
        ),
        other => other,
    }
}

fn sanitize_leaf(value: Value, sanitizer: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::String(text) => Value::String(sanitizer(&text)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| sanitize_leaf(item, sanitizer))
                .collect(),
        ),
        object @ Value::Object(_) => sanitize_object(object, sanitizer),
        other => other,
    }
}

/// Sanitize the settings payload before it leaves the browser.
#[must_use]
pub fn sanitize_config(config: &SettingsRequest) -> SettingsRequest {
    SettingsRequest {
        address: sanitize_url(&config.address),
        header: sanitize_form_input(&config.header),
        secret: sanitize_form_input(&config.secret),
        demo: config.demo,
    }
}

/// Whether the input looks like a markup or script injection attempt.
///
/// Used for audit logging; callers still sanitize regardless of the answer.
#[must_use]
pub fn contains_suspicious_content(input: &str) -> bool {
    !input.is_empty()
        && PATTERNS
            .suspicious
            .iter()
            .any(|pattern| pattern.is_match(input))
}

/// Result of [`security_sanitize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityReport {
    /// Sanitized value.
    pub sanitized: String,
    /// Whether the raw input matched a suspicious pattern.
    pub was_suspicious: bool,
    /// Character count before sanitizing.
    pub original_length: usize,
    /// Character count after sanitizing.
    pub sanitized_length: usize,
}

/// Sanitize and report whether the input looked hostile.
#[must_use]
pub fn security_sanitize(input: &str) -> SecurityReport {
    let sanitized = sanitize_form_input(input);
    let was_suspicious = contains_suspicious_content(input);
    if was_suspicious {
        tracing::warn!(
            original_length = input.chars().count(),
            "suspicious content stripped from input"
        );
    }
    SecurityReport {
        original_length: input.chars().count(),
        sanitized_length: sanitized.chars().count(),
        sanitized,
        was_suspicious,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(PATTERNS.dropped.len(), DROPPED_ELEMENTS.len());
        assert_eq!(PATTERNS.suspicious.len(), SUSPICIOUS_PATTERNS.len());
        assert!(PATTERNS.tag.is_some());
        assert!(PATTERNS.comment.is_some());
        assert!(PATTERNS.declaration.is_some());
    }

    #[test]
    fn form_input_keeps_text_and_drops_tags() {
        assert_eq!(sanitize_form_input("<b>bold</b> text"), "bold text");
        assert_eq!(sanitize_form_input("plain"), "plain");
        assert_eq!(sanitize_form_input(""), "");
        assert_eq!(sanitize_form_input("a < b"), "a < b");
    }

    #[test]
    fn form_input_drops_script_bodies_and_comments() {
        assert_eq!(
            sanitize_form_input("hi<script>alert(1)</script> there"),
            "hi there"
        );
        assert_eq!(sanitize_form_input("x<!-- hidden -->y"), "xy");
        assert_eq!(sanitize_form_input("<style>p{}</style>ok"), "ok");
        assert_eq!(sanitize_form_input("open<script>never closed"), "open");
    }

    #[test]
    fn form_input_never_leaves_tags_behind() {
        let samples = [
            "<<b>script>alert(1)<</b>/script>",
            "<img src=x onerror=alert(1)>",
            "<a href='javascript:alert(1)'>link</a>",
            "<div><p>nested <em>deep</em></p></div>",
            "<svg/onload=alert(1)",
            "<!doctype html><html>doc</html>",
        ];
        for sample in samples {
            let cleaned = sanitize_form_input(sample);
            assert!(
                PATTERNS.tag.as_ref().is_some_and(|tag| !tag.is_match(&cleaned)),
                "tag survived in {cleaned:?} from {sample:?}"
            );
        }
    }

    #[test]
    fn deeply_nested_tags_are_fully_stripped() {
        for name in ["b", "script"] {
            let open = format!("{name}>");
            let input = format!("{}{open}{}x", "<".repeat(12), open.repeat(11));
            let cleaned = sanitize_form_input(&input);
            assert!(!cleaned.contains(&format!("<{name}")), "tag survived: {cleaned:?}");
        }
        let cleaned = sanitize_form_input(&format!("{}b>{}x", "<".repeat(9), "b>".repeat(8)));
        assert_eq!(cleaned, "x");
    }

    #[test]
    fn url_rejects_dangerous_schemes() {
        assert_eq!(sanitize_url("javascript:alert(1)"), "");
        assert_eq!(sanitize_url("  JavaScript:alert(1)"), "");
        assert_eq!(sanitize_url("data:text/html;base64,AAAA"), "");
        assert_eq!(sanitize_url("vbscript:msgbox"), "");
        assert_eq!(sanitize_url("file:///etc/passwd"), "");
        assert_eq!(sanitize_url("about:blank"), "");
        assert_eq!(sanitize_url("https://x.com"), "https://x.com");
    }

    #[test]
    fn filename_strips_invalid_characters() {
        assert_eq!(sanitize_filename("a/b:c*d"), "abcd");
        assert_eq!(sanitize_filename("  ..report.docx.. "), "report.docx");
        assert_eq!(sanitize_filename("tab\there"), "tabhere");
        assert_eq!(sanitize_filename("<i>name</i>.txt"), "name.txt");
    }

    #[test]
    fn filename_is_capped() {
        let long = "a".repeat(400);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn search_query_strips_brackets_and_whitespace() {
        assert_eq!(sanitize_search_query("  <b>report</b> "), "report");
        assert_eq!(sanitize_search_query("a < b > c"), "a  b  c");
        assert_eq!(sanitize_search_query(""), "");
    }

    #[test]
    fn object_sanitizes_string_leaves_only() {
        let input = json!({
            "name": "<b>x</b>",
            "count": 3,
            "nested": { "title": "<i>t</i>", "flag": true },
            "tags": ["<u>a</u>", 1]
        });
        let cleaned = sanitize_object(input, &sanitize_form_input);
        assert_eq!(
            cleaned,
            json!({
                "name": "x",
                "count": 3,
                "nested": { "title": "t", "flag": true },
                "tags": ["a", 1]
            })
        );
    }

    #[test]
    fn object_returns_non_objects_unchanged() {
        assert_eq!(sanitize_object(json!("<b>x</b>"), &sanitize_form_input), json!("<b>x</b>"));
        assert_eq!(sanitize_object(Value::Null, &sanitize_form_input), Value::Null);
    }

    #[test]
    fn config_uses_field_specific_sanitizers() {
        let cleaned = sanitize_config(&SettingsRequest {
            address: "javascript:alert(1)".to_string(),
            header: "<b>Authorization</b>".to_string(),
            secret: "s<script>x</script>".to_string(),
            demo: true,
        });
        assert_eq!(cleaned.address, "");
        assert_eq!(cleaned.header, "Authorization");
        assert_eq!(cleaned.secret, "s");
        assert!(cleaned.demo);
    }

    #[test]
    fn suspicious_content_detection() {
        assert!(contains_suspicious_content("<script>alert(1)</script>"));
        assert!(contains_suspicious_content("<img onerror = x>"));
        assert!(contains_suspicious_content("data: text/html,<p>"));
        assert!(contains_suspicious_content("<META http-equiv>"));
        assert!(!contains_suspicious_content("quarterly report"));
        assert!(!contains_suspicious_content(""));
    }

    #[test]
    fn security_report_counts_lengths() {
        let report = security_sanitize("<b>hey</b>");
        assert_eq!(report.sanitized, "hey");
        assert!(!report.was_suspicious);
        assert_eq!(report.original_length, 10);
        assert_eq!(report.sanitized_length, 3);
    }
}
