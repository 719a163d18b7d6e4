use regex::Regex;
use std::sync::OnceLock;

static OPTION_PREFIX: OnceLock<Regex> = OnceLock::new();
static MARKER_GLYPHS: OnceLock<Regex> = OnceLock::new();
static LEADING_MARKERS: OnceLock<Regex> = OnceLock::new();

fn option_prefix() -> &'static Regex {
    OPTION_PREFIX.get_or_init(|| Regex::new(r"^[A-Za-z]\)\s*").expect("option prefix pattern"))
}

fn marker_glyphs() -> &'static Regex {
    MARKER_GLYPHS.get_or_init(|| Regex::new(r"[✅♦]\s*").expect("marker glyph pattern"))
}

fn leading_markers() -> &'static Regex {
    LEADING_MARKERS.get_or_init(|| Regex::new(r"^(?:[✅♦]\s*)+").expect("leading marker pattern"))
}

/// Strips marker glyphs anywhere in the text and a leading `a) ` option prefix.
pub(crate) fn clean_selected_answer(value: &str) -> String {
    let without_markers = marker_glyphs().replace_all(value.trim(), "");
    let without_prefix = option_prefix().replace(without_markers.trim_start(), "");
    without_prefix.trim().to_string()
}

/// Strips leading marker glyphs only; the option prefix is kept.
pub(crate) fn strip_leading_markers(value: &str) -> String {
    leading_markers().replace(value.trim(), "").trim().to_string()
}

/// Matching key for question and option texts.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{a0}'], " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}
