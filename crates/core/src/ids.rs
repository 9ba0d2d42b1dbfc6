//! Generated heading identifiers.

use pw_toc_types::HeadingId;
use regex::Regex;
use std::sync::LazyLock;

static NON_WORD_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_]+").expect("BUG: invalid NON_WORD_RUN regex literal")
});

/// Lower-cases and trims `text` (whitespace and U+FEFF), then replaces
/// every run of non-word characters with a single hyphen.
///
/// Word characters are ASCII letters, digits and `_`. Leading and trailing
/// punctuation is kept as a hyphen, so `"Why?"` becomes `"why-"`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    NON_WORD_RUN.replace_all(trimmed, "-").into_owned()
}

/// Identifier for the heading at `index` among the matched headings.
pub fn generated_heading_id(text: &str, index: usize) -> HeadingId {
    HeadingId::from(format!("toc-{}-{}", slugify(text), index))
}
