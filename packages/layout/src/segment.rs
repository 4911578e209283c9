//! Partitioning of a page into per-application record groups.

use da_register_layout_models::{Rectangle, TextFragment};

use crate::anchor::find_start_elements;
use crate::geometry::{MIN_LINE_OVERLAP_PERCENT, is_vertical_overlap, vertical_overlap_percentage};

/// The fragments of one page attributed to a single application record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup {
    /// The `"Application No"` anchor that opened the record.
    pub start: TextFragment,
    /// Every fragment whose top lies within the record's vertical band.
    pub fragments: Vec<TextFragment>,
}

/// Highest `y` of any fragment sharing a row with `anchor`.
///
/// Only fragments overlapping the anchor by more than half their own
/// height count, so a tall border or column rule never drags the row top
/// up to the top of the page.
#[must_use]
pub fn row_top(fragments: &[TextFragment], anchor: &Rectangle) -> f64 {
    fragments
        .iter()
        .map(TextFragment::bounds)
        .filter(|bounds| {
            is_vertical_overlap(anchor, bounds)
                && vertical_overlap_percentage(anchor, bounds) > MIN_LINE_OVERLAP_PERCENT
        })
        .map(|bounds| bounds.y)
        .fold(anchor.y, f64::min)
}

/// Raises an anchor by half its height so that a record whose lodged date
/// sits slightly above the label still starts at that date.
fn raised(anchor: &TextFragment) -> Rectangle {
    let bounds = anchor.bounds();
    Rectangle::new(
        bounds.x,
        bounds.y - bounds.height / 2.0,
        bounds.width,
        bounds.height,
    )
}

/// Splits a page into one [`RecordGroup`] per application.
///
/// Each group spans `y` in `[row_top(anchor), row_top(next anchor))`; the
/// last group extends to the bottom of the page.  Fragments above the
/// first record (page headers) belong to no group.
#[must_use]
pub fn segment_page(fragments: &[TextFragment]) -> Vec<RecordGroup> {
    let anchors = find_start_elements(fragments);

    log::debug!("Found {} application record(s) on page", anchors.len());

    anchors
        .iter()
        .enumerate()
        .map(|(index, anchor)| {
            let top = row_top(fragments, &raised(anchor));
            let next_top = anchors
                .get(index + 1)
                .map_or(f64::INFINITY, |next| row_top(fragments, &next.bounds()));

            RecordGroup {
                start: (*anchor).clone(),
                fragments: fragments
                    .iter()
                    .filter(|fragment| fragment.y >= top && fragment.y < next_top)
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, x: f64, y: f64, width: f64, height: f64) -> TextFragment {
        TextFragment::new(text, x, y, width, height)
    }

    fn page() -> Vec<TextFragment> {
        vec![
            fragment("Development Register", 20.0, 20.0, 120.0, 12.0),
            fragment("border", 5.0, 0.0, 1.0, 1000.0),
            fragment("Application No", 20.0, 100.0, 70.0, 10.0),
            fragment("19/02/2019", 300.0, 96.0, 50.0, 10.0),
            fragment("ABC/1/19", 100.0, 100.0, 50.0, 10.0),
            fragment("Property street", 20.0, 130.0, 75.0, 10.0),
            fragment("Application No", 20.0, 300.0, 70.0, 10.0),
            fragment("DEF/2/19", 100.0, 300.0, 50.0, 10.0),
            fragment("Property street", 20.0, 330.0, 75.0, 10.0),
        ]
    }

    #[test]
    fn tall_fragments_never_set_the_row_top() {
        let fragments = page();
        let top = row_top(&fragments, &fragments[2].bounds());
        assert!((top - 96.0).abs() < f64::EPSILON);
    }

    #[test]
    fn segments_page_into_records() {
        let fragments = page();
        let groups = segment_page(&fragments);
        assert_eq!(groups.len(), 2);

        let first: Vec<&str> = groups[0].fragments.iter().map(|f| f.text.as_str()).collect();
        assert!(first.contains(&"19/02/2019"));
        assert!(first.contains(&"ABC/1/19"));
        assert!(!first.contains(&"DEF/2/19"));
        assert!(!first.contains(&"Development Register"));
        assert!(!first.contains(&"border"));

        let second: Vec<&str> = groups[1].fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(second, vec!["Application No", "DEF/2/19", "Property street"]);
        assert!((groups[1].start.y - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn group_fragments_lie_within_their_band() {
        let fragments = page();
        let groups = segment_page(&fragments);
        for group in &groups {
            for fragment in &group.fragments {
                assert!(fragment.y >= group.start.y - group.start.height);
            }
        }
        assert!(groups[0].fragments.iter().all(|f| f.y < 300.0));
    }

    #[test]
    fn raised_anchor_captures_text_printed_above_it() {
        let fragments = vec![
            fragment("Application No", 20.0, 100.0, 70.0, 10.0),
            fragment("lodged", 300.0, 93.0, 40.0, 10.0),
        ];

        let unraised = row_top(&fragments, &fragments[0].bounds());
        assert!((unraised - 100.0).abs() < f64::EPSILON);

        let groups = segment_page(&fragments);
        assert_eq!(groups.len(), 1);
        let texts: Vec<&str> = groups[0].fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Application No", "lodged"]);
    }

    #[test]
    fn page_without_anchors_has_no_groups() {
        let fragments = vec![fragment("Hundred", 20.0, 100.0, 40.0, 10.0)];
        assert!(segment_page(&fragments).is_empty());
    }
}
