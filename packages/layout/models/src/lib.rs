#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Positioned text types for development application register pages.
//!
//! A rendered register page is handed to this workspace as a flat list of
//! [`TextFragment`]s: runs of text with a bounding box in page
//! coordinates (`y` grows downward).  Everything the layout crate does is
//! expressed over these fragments and the [`Rectangle`]s derived from
//! them.

use serde::{Deserialize, Serialize};

/// One positioned run of text recovered from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text exactly as the decoder produced it.
    pub text: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent, already corrected for any decoder height distortion.
    pub height: f64,
}

impl TextFragment {
    /// Creates a fragment from its text and bounding box.
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the bounding box of this fragment.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// An axis-aligned rectangle in page coordinates.
///
/// Width and height are never negative: [`Rectangle::new`] clamps them to
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rectangle {
    /// The degenerate rectangle reported for disjoint intersections.
    pub const EMPTY: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a rectangle, clamping negative extents to zero.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area covered by the rectangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_negative_extents() {
        let rect = Rectangle::new(10.0, 20.0, -5.0, -1.0);
        assert!(rect.width.abs() < f64::EPSILON);
        assert!(rect.height.abs() < f64::EPSILON);
        assert!(rect.area().abs() < f64::EPSILON);
    }

    #[test]
    fn fragment_edges() {
        let fragment = TextFragment::new("Lot", 10.0, 20.0, 30.0, 8.0);
        assert!((fragment.right() - 40.0).abs() < f64::EPSILON);
        assert!((fragment.bottom() - 28.0).abs() < f64::EPSILON);
        assert_eq!(fragment.bounds(), Rectangle::new(10.0, 20.0, 30.0, 8.0));
    }

    #[test]
    fn deserializes_decoder_output() {
        let fragment: TextFragment = serde_json::from_str(
            r#"{"text":"Application No","x":20.5,"y":100.0,"width":70.0,"height":9.5}"#,
        )
        .unwrap();
        assert_eq!(fragment.text, "Application No");
        assert!((fragment.height - 9.5).abs() < f64::EPSILON);
    }
}
