//! Document markup preparation
//!
//! Full pages are unwrapped to their `<body>` contents and `<script>`
//! blocks are removed with a pattern match. This is a best-effort deterrent
//! against accidental script execution and NOT a security boundary: inline
//! event handlers, `javascript:` URLs, iframes and every other injection
//! vector pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// `<body ...>` to the LAST `</body>`, case-insensitive, across lines
static BODY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("invalid body pattern")
});

/// Each `<script ...>...</script>` block, shortest match
static SCRIPT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script.*?>.*?</script>").expect("invalid script pattern")
});

/// Body contents of a full page, or `None` for fragments
///
/// An empty body capture counts as no match, so `<body></body>` pages are
/// shown whole.
#[must_use]
pub fn extract_body(text: &str) -> Option<&str> {
    BODY_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|body| !body.is_empty())
}

/// Remove every `<script>` block
#[must_use]
pub fn strip_scripts(text: &str) -> Cow<'_, str> {
    SCRIPT_PATTERN.replace_all(text, "")
}

/// Body extraction followed by script stripping
#[must_use]
pub fn prepare_markup(text: &str) -> String {
    let content = extract_body(text).unwrap_or(text);
    strip_scripts(content).into_owned()
}

/// Escape text for use inside element content or a quoted attribute
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
