#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address reconstruction for development application records.
//!
//! Addresses arrive as three raw slots (house number, street and suburb)
//! that may hold several merged values.  [`ReferenceData`] carries the
//! street, suffix, suburb and hundred vocabularies, and [`AddressResolver`]
//! turns the slots into one formatted `"<house> <street>, <suburb>"`
//! string.

pub mod field;
pub mod format;
pub mod fuzzy;
pub mod reference;
pub mod resolve;

pub use field::{DEFAULT_SENTINEL, Field};
pub use format::{canonical_suburb, clean_suburb, format_address};
pub use fuzzy::{MAX_EDIT_DISTANCE, closest_match};
pub use reference::{ReferenceData, ReferenceDataError, ReferencePaths};
pub use resolve::{AddressResolver, Candidate, Resolution, ScoredAddress, Threshold};
