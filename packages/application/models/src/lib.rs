#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Development application record types.
//!
//! A [`DevelopmentApplication`] is one accepted row of a council register:
//! an application number, a reconstructed street address, a free-text
//! description and the provenance of the document it came from.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Description used when a record has no description text.
pub const NO_DESCRIPTION: &str = "No Description Provided";

/// One development application extracted from a register document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentApplication {
    /// Council application number, e.g. `"340/001/19"`.
    pub application_number: String,
    /// `"<HOUSE> <STREET>, <SUBURB>"`, upper-cased.
    pub address: String,
    /// What is being developed.
    pub description: String,
    /// URL of the register document the record was read from.
    pub info_url: String,
    /// Where the public can comment on applications.
    pub comment_url: String,
    /// Day the document was parsed.
    pub date_scraped: NaiveDate,
    /// Day the council received the application, when legible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_received: Option<NaiveDate>,
    /// Lot, section, plan, title and hundred of the land joined as
    /// `"Lot 4, Hundred KULPARA"`; empty when none were printed.
    #[serde(default)]
    pub legal_description: String,
}

/// Cadastral identifiers of the land an application concerns.
///
/// Only its [`Display`](fmt::Display) form is stored on a
/// [`DevelopmentApplication`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalDescription {
    /// Allotment number.
    pub lot: Option<String>,
    /// Section number.
    pub section: Option<String>,
    /// Deposited or filed plan.
    pub plan: Option<String>,
    /// Certificate of title reference.
    pub title: Option<String>,
    /// Cadastral hundred.
    pub hundred: Option<String>,
}

impl LegalDescription {
    fn parts(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Lot", &self.lot),
            ("Section", &self.section),
            ("Plan", &self.plan),
            ("Title", &self.title),
            ("Hundred", &self.hundred),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|value| (label, value)))
    }
}

/// Formats as `"Lot 4, Plan D1234, Hundred Kulpara"`, omitting absent parts.
impl fmt::Display for LegalDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (label, value)) in self.parts().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label} {value}")?;
        }
        Ok(())
    }
}
