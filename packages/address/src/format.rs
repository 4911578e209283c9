//! Final address formatting.

use std::sync::LazyLock;

use regex::Regex;

use crate::reference::ReferenceData;

/// A leading `"HD "` left over from hundred-qualified suburbs.
static HUNDRED_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^HD\s+").expect("valid regex"));

/// A trailing state code.
static STATE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+SA$").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Strips the `"HD "` prefix and `" SA"` suffix from a suburb.
#[must_use]
pub fn clean_suburb(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_prefix = HUNDRED_PREFIX_RE.replace(trimmed, "");
    STATE_SUFFIX_RE.replace(&without_prefix, "").into_owned()
}

/// Cleans a suburb and maps it to its canonical name when one is known.
#[must_use]
pub fn canonical_suburb(raw: &str, refs: &ReferenceData) -> String {
    let cleaned = clean_suburb(raw);
    refs.canonical_suburb(&cleaned)
        .map_or(cleaned, str::to_owned)
}

/// Formats `"<house> <street>, <suburb>"`, upper-cased with single spaces.
#[must_use]
pub fn format_address(house_number: &str, street_name: &str, suburb_name: &str) -> String {
    let joined = format!(
        "{} {}, {}",
        house_number.trim(),
        street_name.trim(),
        suburb_name.trim()
    );
    let collapsed = WHITESPACE_RE.replace_all(joined.trim(), " ");
    collapsed
        .trim_start_matches(',')
        .trim_end_matches(',')
        .trim()
        .to_uppercase()
}
