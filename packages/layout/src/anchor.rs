//! Fuzzy location of printed labels among page fragments.
//!
//! Decoders rarely hand back a label such as `"Property House No"` as one
//! fragment.  It may be split across several runs, carry stray
//! punctuation, or contain recognition errors.  The resolver seeds a search
//! from every fragment that starts with the label's first character, walks
//! rightward through nearest neighbours assembling text, and scores each
//! assembled phrase by edit distance against the condensed label.

use std::sync::LazyLock;

use da_register_layout_models::TextFragment;
use regex::Regex;

use crate::geometry::right_neighbour;

/// The label that opens every application record on a register page.
pub const START_LABEL: &str = "Application No";

/// Most fragments one assembled phrase may span.
const MAX_CHAIN_LENGTH: usize = 5;

/// How far (in characters) an assembled phrase may be from the label length.
const LENGTH_TOLERANCE: usize = 2;

/// Characters ignored when comparing labels.
static CONDENSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,\-_]+").expect("valid regex"));

/// Recognition artefacts seen in place of `"no"` after `"Application"`.
const NUMBER_ARTEFACTS: &[&str] = &["n0", "n°", "\"o", "\"0", "\"°", "“°"];

/// Strips whitespace, commas, hyphens and underscores, then lowercases.
#[must_use]
pub fn condense(text: &str) -> String {
    CONDENSE_RE.replace_all(text, "").to_lowercase()
}

/// Edit-distance tolerance at which an assembled phrase matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchThreshold {
    /// Identical after condensing.
    Exact = 0,
    /// One edit away.
    OneEdit = 1,
    /// Two edits away.
    TwoEdits = 2,
}

impl MatchThreshold {
    /// Classifies a condensed phrase against a condensed label.
    #[must_use]
    pub fn classify(phrase: &str, label: &str) -> Option<Self> {
        if phrase == label {
            return Some(Self::Exact);
        }
        match strsim::levenshtein(phrase.trim(), label.trim()) {
            0 => Some(Self::Exact),
            1 => Some(Self::OneEdit),
            2 => Some(Self::TwoEdits),
            _ => None,
        }
    }
}

/// Which end of a matched phrase a caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// The fragment the phrase starts with.
    Leftmost,
    /// The fragment the phrase ends with.
    Rightmost,
}

/// One way a run of fragments matched a label.
#[derive(Debug, Clone)]
pub struct AnchorMatch<'a> {
    /// Fragments consumed, left to right.  Never empty.
    pub chain: Vec<&'a TextFragment>,
    /// The condensed text assembled from `chain`.
    pub text: String,
    /// Tolerance at which the match succeeded.
    pub threshold: MatchThreshold,
}

impl<'a> AnchorMatch<'a> {
    /// The fragment the phrase starts with.
    #[must_use]
    pub fn left(&self) -> &'a TextFragment {
        self.chain[0]
    }

    /// The fragment the phrase ends with.
    #[must_use]
    pub fn right(&self) -> &'a TextFragment {
        self.chain[self.chain.len() - 1]
    }

    /// Returns the requested end of the phrase.
    #[must_use]
    pub fn pick(&self, pick: Pick) -> &'a TextFragment {
        match pick {
            Pick::Leftmost => self.left(),
            Pick::Rightmost => self.right(),
        }
    }

    fn length_error(&self, label_length: usize) -> usize {
        self.text.trim().chars().count().abs_diff(label_length)
    }

    /// Whether `self` should replace `best`: lower threshold first, then
    /// a length closer to the label (so `"plan"` beats `"plan)"`).
    fn beats(&self, best: &Self, label_length: usize) -> bool {
        self.threshold < best.threshold
            || (self.threshold == best.threshold
                && self.length_error(label_length) < best.length_error(label_length))
    }
}

/// Walks rightward from `seed`, scoring every assembled phrase whose length
/// falls within `min_length..=max_length`.
fn chain_matches<'a>(
    fragments: &'a [TextFragment],
    seed: &'a TextFragment,
    label: &str,
    min_length: usize,
    max_length: usize,
    assemble: impl Fn(&[&TextFragment]) -> String,
) -> Vec<AnchorMatch<'a>> {
    let mut matches = Vec::new();
    let mut chain: Vec<&'a TextFragment> = Vec::with_capacity(MAX_CHAIN_LENGTH);
    let mut next = Some(seed);

    while let Some(fragment) = next {
        chain.push(fragment);

        let text = assemble(&chain);
        let length = text.chars().count();
        if length > max_length {
            break;
        }

        if length >= min_length
            && let Some(threshold) = MatchThreshold::classify(&text, label)
        {
            matches.push(AnchorMatch {
                chain: chain.clone(),
                text,
                threshold,
            });
        }

        if chain.len() >= MAX_CHAIN_LENGTH {
            break;
        }
        next = right_neighbour(fragments, fragment);
    }

    matches
}

fn best_of<'a>(
    matches: impl IntoIterator<Item = AnchorMatch<'a>>,
    label_length: usize,
) -> Option<AnchorMatch<'a>> {
    matches.into_iter().reduce(|best, current| {
        if current.beats(&best, label_length) {
            current
        } else {
            best
        }
    })
}

fn assemble_condensed(chain: &[&TextFragment]) -> String {
    condense(&chain.iter().map(|f| f.text.as_str()).collect::<String>())
}

/// Finds the best match for `label` among `fragments`.
///
/// Returns `None` when nothing within two edits was assembled from at most
/// five neighbouring fragments.
#[must_use]
pub fn find_anchor<'a>(fragments: &'a [TextFragment], label: &str) -> Option<AnchorMatch<'a>> {
    let target = condense(label);
    let first = target.chars().next()?;
    let label_length = target.chars().count();
    let min_length = label_length.saturating_sub(LENGTH_TOLERANCE);
    let max_length = label_length + LENGTH_TOLERANCE;

    let matches = fragments
        .iter()
        .filter(|fragment| {
            fragment
                .text
                .trim()
                .to_lowercase()
                .starts_with(first)
        })
        .flat_map(|seed| {
            chain_matches(
                fragments,
                seed,
                &target,
                min_length,
                max_length,
                assemble_condensed,
            )
        });

    best_of(matches, label_length)
}

/// Finds the fragment that best matches `label`, returning the requested
/// end of the matched phrase.
#[must_use]
pub fn find_element<'a>(
    fragments: &'a [TextFragment],
    label: &str,
    pick: Pick,
) -> Option<&'a TextFragment> {
    let found = find_anchor(fragments, label)?;
    log::trace!(
        "Matched label {label:?} as {:?} ({:?})",
        found.text,
        found.threshold
    );
    Some(found.pick(pick))
}

/// Condenses an assembled start label, repairing the recognition artefacts
/// commonly seen in its `"No"` suffix.
fn assemble_start_label(chain: &[&TextFragment]) -> String {
    let mut text = assemble_condensed(chain);
    for artefact in NUMBER_ARTEFACTS {
        text = text.replace(artefact, "no");
    }
    text
}

/// Finds the anchor fragment of every application record on a page.
///
/// Each fragment starting with `"a"` seeds its own search for
/// [`START_LABEL`]; the rightmost fragment of each seed's best match is an
/// anchor.  Anchors are returned in top-to-bottom order.
#[must_use]
pub fn find_start_elements(fragments: &[TextFragment]) -> Vec<&TextFragment> {
    let target = condense(START_LABEL);
    let label_length = target.chars().count();

    let mut anchors: Vec<&TextFragment> = Vec::new();

    for seed in fragments
        .iter()
        .filter(|fragment| fragment.text.trim().to_lowercase().starts_with('a'))
    {
        let matches = chain_matches(
            fragments,
            seed,
            &target,
            label_length,
            label_length + LENGTH_TOLERANCE,
            assemble_start_label,
        );

        if let Some(best) = best_of(matches, label_length) {
            let anchor = best.right();
            if !anchors.iter().any(|existing| std::ptr::eq(*existing, anchor)) {
                anchors.push(anchor);
            }
        }
    }

    anchors.sort_by(|a, b| a.y.total_cmp(&b.y));
    anchors
}
