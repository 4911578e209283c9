#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Development application records from register pages.
//!
//! Each page is segmented into record groups, and each group is read
//! field by field: application number, address slots (resolved through
//! the reference vocabularies), legal description, description and
//! received date.  Groups lacking an application number or an address are
//! logged and skipped rather than failing the page.

use chrono::NaiveDate;

pub mod document;
pub mod progress;
pub mod record;

#[cfg(test)]
mod fixtures;

pub use document::{PageApplications, parse_document, parse_page};
pub use progress::{NullProgress, ProgressCallback, null_progress};
pub use record::{RejectReason, parse_application, parse_received_date, received_date};

/// Per-document values copied into every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// URL of the document being parsed.
    pub info_url: String,
    /// Where the public can comment on applications.
    pub comment_url: String,
    /// Day the document is parsed.
    pub date_scraped: NaiveDate,
    /// Separator of merged values in address slots.
    pub sentinel: char,
}
