//! Edit-distance lookups against reference vocabularies.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Largest edit distance accepted as a vocabulary match.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Case-folds and trims a value, collapsing runs of whitespace.
#[must_use]
pub fn fold(text: &str) -> String {
    WHITESPACE_RE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Finds the vocabulary entry closest to `input`, if any is within
/// `max_distance` edits.
///
/// Comparison ignores case and surrounding or repeated whitespace.  Ties
/// go to the entry seen first.
pub fn closest_match<'a>(
    input: &str,
    vocabulary: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
) -> Option<(&'a str, usize)> {
    let needle = fold(input);
    let mut best: Option<(&'a str, usize)> = None;

    for entry in vocabulary {
        let distance = strsim::levenshtein(&needle, &fold(entry));
        if distance > max_distance {
            continue;
        }
        if best.is_none_or(|(_, current)| distance < current) {
            best = Some((entry, distance));
            if distance == 0 {
                break;
            }
        }
    }

    best
}
