#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Layout analysis for development application register pages.
//!
//! Register PDFs encode record boundaries and field meaning purely through
//! where text is printed.  This crate recovers that structure from the
//! positioned [`TextFragment`]s of a single page:
//!
//! - [`geometry`]: intersections, vertical overlap and right-hand
//!   neighbours.
//! - [`anchor`]: fuzzy location of printed labels, including the
//!   `"Application No"` label that opens every record.
//! - [`segment`]: slicing a page into one [`RecordGroup`] per record.
//! - [`extract`]: reading the text inside a rectangle delineated by labels.
//!
//! Everything here is synchronous and free of shared state; pages can be
//! processed independently.

pub mod anchor;
pub mod extract;
pub mod geometry;
pub mod segment;

pub use anchor::{AnchorMatch, MatchThreshold, Pick, find_anchor, find_element, find_start_elements};
pub use da_register_layout_models::{Rectangle, TextFragment};
pub use extract::{extract_down, extract_left, extract_right};
pub use segment::{RecordGroup, segment_page};
