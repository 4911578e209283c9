//! Rectangle geometry over page coordinates.
//!
//! Pure functions used by every other layout stage: intersection, the
//! asymmetric vertical overlap measure, and nearest right-hand neighbour
//! lookup.

use da_register_layout_models::{Rectangle, TextFragment};

/// Largest horizontal gap (in page units) still considered adjacent text.
pub const MAX_HORIZONTAL_GAP: f64 = 30.0;

/// Fraction of the left element's width a right-hand candidate may start
/// inside it before being treated as overlapping rather than adjacent.
const HORIZONTAL_OVERLAP_FACTOR: f64 = 0.2;

/// Minimum vertical overlap (percent of the candidate's height) required
/// for two fragments to be considered on the same line.
pub const MIN_LINE_OVERLAP_PERCENT: f64 = 50.0;

/// Intersects two rectangles.
///
/// Returns [`Rectangle::EMPTY`] when they are disjoint.  The result does
/// not depend on argument order.
#[must_use]
pub fn intersect(a: &Rectangle, b: &Rectangle) -> Rectangle {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = a.right().min(b.right());
    let y2 = a.bottom().min(b.bottom());

    if x2 >= x1 && y2 >= y1 {
        Rectangle::new(x1, y1, x2 - x1, y2 - y1)
    } else {
        Rectangle::EMPTY
    }
}

/// Whether the two rectangles share any vertical extent.
#[must_use]
pub fn is_vertical_overlap(a: &Rectangle, b: &Rectangle) -> bool {
    b.y < a.bottom() && b.bottom() > a.y
}

/// Percentage (0 to 100) of `b`'s height that overlaps vertically with `a`.
///
/// Relative to the second argument: a tall `a` fully covers a short `b`
/// (100), while a short `a` covers only a sliver of a tall `b`.
#[must_use]
pub fn vertical_overlap_percentage(a: &Rectangle, b: &Rectangle) -> f64 {
    let y1 = a.y.max(b.y);
    let y2 = a.bottom().min(b.bottom());

    if y2 < y1 || b.height <= 0.0 {
        return 0.0;
    }

    ((y2 - y1) * 100.0 / b.height).min(100.0)
}

/// Squared distance from the right-middle of `a` to the left-middle of `b`.
///
/// Returns [`f64::INFINITY`] when `b` starts more than 20% of `a`'s width
/// to the left of `a`'s right edge.
#[must_use]
pub fn distance_squared(a: &Rectangle, b: &Rectangle) -> f64 {
    let (x1, y1) = (a.right(), a.y + a.height / 2.0);
    let (x2, y2) = (b.x, b.y + b.height / 2.0);

    if x2 < x1 - a.width * HORIZONTAL_OVERLAP_FACTOR {
        return f64::INFINITY;
    }

    (x2 - x1).mul_add(x2 - x1, (y2 - y1) * (y2 - y1))
}

/// Finds the fragment immediately to the right of `fragment` on the same
/// line.
///
/// Candidates must overlap the fragment's line by more than
/// [`MIN_LINE_OVERLAP_PERCENT`], start strictly right of its right edge and
/// lie within [`MAX_HORIZONTAL_GAP`] of it.  The nearest candidate wins;
/// ties keep the earliest fragment.
#[must_use]
pub fn right_neighbour<'a>(
    fragments: &'a [TextFragment],
    fragment: &TextFragment,
) -> Option<&'a TextFragment> {
    let origin = fragment.bounds();

    fragments
        .iter()
        .filter_map(|candidate| {
            let bounds = candidate.bounds();
            let on_line = is_vertical_overlap(&origin, &bounds)
                && vertical_overlap_percentage(&origin, &bounds) > MIN_LINE_OVERLAP_PERCENT;
            let gap = bounds.x - origin.right();

            if !on_line || gap <= 0.0 || gap >= MAX_HORIZONTAL_GAP {
                return None;
            }

            let distance = distance_squared(&origin, &bounds);
            distance.is_finite().then_some((candidate, distance))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(candidate, _)| candidate)
}
