//! Rectangular field extraction.
//!
//! A field's value is whatever text sits inside a rectangle delineated by
//! up to three labels: the origin label (mandatory) and two optional
//! bounding labels.  A bound that is not given, or cannot be found, leaves
//! that side of the rectangle open.

use std::sync::LazyLock;

use da_register_layout_models::{Rectangle, TextFragment};
use regex::Regex;

use crate::anchor::{Pick, find_element};
use crate::geometry::intersect;

/// Extent used for an open side of a field rectangle.
pub const UNBOUNDED_EXTENT: f64 = 1.0e9;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Direction in which a field's value lies relative to its origin label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Value starts at the origin's right edge, level with its top.
    Right,
    /// Value ends at the origin's left edge, level with its top.
    Left,
    /// Value starts below the origin, level with its left edge.
    Down,
}

/// Extracts the text to the right of `origin`, up to the `right` label and
/// above the `bottom` label.
#[must_use]
pub fn extract_right(
    fragments: &[TextFragment],
    origin: &str,
    right: Option<&str>,
    bottom: Option<&str>,
) -> Option<String> {
    extract(fragments, Direction::Right, origin, right, bottom)
}

/// Extracts the text to the left of `origin`, starting after the `left`
/// label and above the `bottom` label.
#[must_use]
pub fn extract_left(
    fragments: &[TextFragment],
    origin: &str,
    left: Option<&str>,
    bottom: Option<&str>,
) -> Option<String> {
    extract(fragments, Direction::Left, origin, left, bottom)
}

/// Extracts the text below `origin`, up to the `right` label and above the
/// `bottom` label.
#[must_use]
pub fn extract_down(
    fragments: &[TextFragment],
    origin: &str,
    right: Option<&str>,
    bottom: Option<&str>,
) -> Option<String> {
    extract(fragments, Direction::Down, origin, right, bottom)
}

/// Resolves the labels and extracts the text of the implied rectangle.
///
/// Returns `None` if the origin label cannot be found or no fragment lies
/// mostly inside the rectangle.
#[must_use]
pub fn extract(
    fragments: &[TextFragment],
    direction: Direction,
    origin: &str,
    side: Option<&str>,
    bottom: Option<&str>,
) -> Option<String> {
    let Some(origin_element) = find_element(fragments, origin, Pick::Rightmost) else {
        log::trace!("Label {origin:?} not found");
        return None;
    };
    let side_element = side.and_then(|label| find_element(fragments, label, Pick::Leftmost));
    let bottom_element = bottom.and_then(|label| find_element(fragments, label, Pick::Leftmost));

    let (left, top, right) = match direction {
        Direction::Right => (
            origin_element.right(),
            origin_element.y,
            side_element.map_or(origin_element.right() + UNBOUNDED_EXTENT, |e| e.x),
        ),
        Direction::Left => (
            side_element.map_or(origin_element.x - UNBOUNDED_EXTENT, TextFragment::right),
            origin_element.y,
            origin_element.x,
        ),
        Direction::Down => (
            origin_element.x,
            origin_element.bottom(),
            side_element.map_or(origin_element.x + UNBOUNDED_EXTENT, |e| e.x),
        ),
    };
    let height = bottom_element.map_or(UNBOUNDED_EXTENT, |e| e.y - top);

    text_within(fragments, &Rectangle::new(left, top, right - left, height))
}

/// Joins, in reading order, the text of every fragment lying more than
/// half inside `bounds`.
///
/// Bare `":"` fragments are ignored.
#[must_use]
pub fn text_within(fragments: &[TextFragment], bounds: &Rectangle) -> Option<String> {
    let mut inside: Vec<&TextFragment> = fragments
        .iter()
        .filter(|fragment| {
            let area = fragment.bounds().area();
            area > 0.0
                && intersect(&fragment.bounds(), bounds).area() * 2.0 > area
                && fragment.text.trim() != ":"
        })
        .collect();

    if inside.is_empty() {
        return None;
    }

    inside.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let joined = inside
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Some(WHITESPACE_RE.replace_all(joined.trim(), " ").into_owned())
}
