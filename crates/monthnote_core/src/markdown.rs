//! Markdown token scanning helpers.
//!
//! # Responsibility
//! - Count and scan task-list checkbox tokens so callers can validate
//!   checkbox indices and supply literal default states.
//! - Derive plain-text previews for revision history display.
//!
//! # Invariants
//! - Note content is otherwise opaque: no parsing, no rendering, no HTML.
//! - Checkbox indices are 0-based in top-to-bottom scan order.

use once_cell::sync::Lazy;
use regex::Regex;

static CHECKBOX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:[-*+]|\d+[.)])\s+\[([ xX])\]").expect("valid checkbox regex")
});
static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const PREVIEW_MAX_CHARS: usize = 100;

/// Returns the literal checked state of every checkbox token in `content`,
/// in scan order.
///
/// Indices into the returned vector are the positional checkbox indices used
/// by the checkbox state store. Any structural edit upstream of a checkbox
/// renumbers everything below it, so callers must re-scan on every render and
/// never persist index-to-meaning mappings.
pub fn scan_checkbox_states(content: &str) -> Vec<bool> {
    CHECKBOX_RE
        .captures_iter(content)
        .map(|caps| {
            let token = caps.get(1).map(|m| m.as_str()).unwrap_or(" ");
            token.eq_ignore_ascii_case("x")
        })
        .collect()
}

/// Counts checkbox tokens in `content`.
pub fn count_checkboxes(content: &str) -> usize {
    CHECKBOX_RE.find_iter(content).count()
}

/// Derives a revision-history preview from markdown content.
///
/// Rules:
/// - markdown images removed, links reduced to their text;
/// - markdown symbols stripped, whitespace normalized;
/// - first 100 chars retained; empty result becomes `None`.
pub fn derive_preview(content: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}
