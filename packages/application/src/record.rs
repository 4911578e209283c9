//! Assembly of one [`DevelopmentApplication`] from a [`RecordGroup`].

use std::sync::LazyLock;

use chrono::NaiveDate;
use da_register_address::{AddressResolver, ReferenceData};
use da_register_application_models::{DevelopmentApplication, LegalDescription, NO_DESCRIPTION};
use da_register_layout::{RecordGroup, TextFragment, extract_down, extract_left, extract_right};
use regex::Regex;
use strum_macros::{AsRefStr, Display};

use crate::ParseContext;

/// Received dates are printed as `D/MM/YYYY`.
static RECEIVED_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{2}/\d{4}$").expect("valid regex"));

/// Labels under which the received date is printed, depending on the
/// register's vintage.
const RECEIVED_LABELS: &[&str] = &["Application Received", "Application received"];

/// Why a record group produced no application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum RejectReason {
    /// No application number was printed (or it could not be found).
    #[strum(serialize = "no application number")]
    MissingApplicationNumber,
    /// The street slot was empty.
    #[strum(serialize = "no street name")]
    MissingStreetName,
    /// The suburb slot was empty.
    #[strum(serialize = "no suburb name")]
    MissingSuburbName,
    /// The address slots could not be reconstructed into an address.
    #[strum(serialize = "no address candidate")]
    NoAddressCandidate,
}

/// Builds a development application from the fragments of one record.
///
/// # Errors
///
/// Returns the [`RejectReason`] when the record lacks an application
/// number or a usable address.
pub fn parse_application(
    group: &RecordGroup,
    refs: &ReferenceData,
    context: &ParseContext,
) -> Result<DevelopmentApplication, RejectReason> {
    let fragments = group.fragments.as_slice();

    let Some(application_number) = extract_right(
        fragments,
        "Application No",
        Some("Application Date"),
        Some("Applicants Name"),
    )
    .filter(|number| !number.is_empty()) else {
        return Err(reject(RejectReason::MissingApplicationNumber, None, fragments));
    };
    let application_number = repair_application_number(&application_number);
    log::debug!("Found {application_number:?}");

    let house_number = extract_right(
        fragments,
        "Property House No",
        Some("Planning Conditions"),
        Some("Lot"),
    )
    .filter(|house| house != "0")
    .unwrap_or_default();

    let Some(street_name) = meaningful(extract_right(
        fragments,
        "Property street",
        Some("Planning Conditions"),
        Some("Property suburb"),
    )) else {
        return Err(reject(
            RejectReason::MissingStreetName,
            Some(&application_number),
            fragments,
        ));
    };

    let Some(suburb_name) = meaningful(extract_right(
        fragments,
        "Property suburb",
        Some("Planning Conditions"),
        Some("Title"),
    )) else {
        return Err(reject(
            RejectReason::MissingSuburbName,
            Some(&application_number),
            fragments,
        ));
    };

    let Some(address) = AddressResolver::new(refs, context.sentinel).resolve(
        &house_number,
        &street_name,
        &suburb_name,
    ) else {
        return Err(reject(
            RejectReason::NoAddressCandidate,
            Some(&application_number),
            fragments,
        ));
    };

    let description = extract_down(
        fragments,
        "Development Description",
        Some("Relevant Authority"),
        Some("Private Certifier Name"),
    )
    .filter(|description| !description.is_empty())
    .unwrap_or_else(|| NO_DESCRIPTION.to_owned());

    Ok(DevelopmentApplication {
        application_number,
        address,
        description,
        info_url: context.info_url.clone(),
        comment_url: context.comment_url.clone(),
        date_scraped: context.date_scraped,
        date_received: received_date(fragments),
        legal_description: legal_description(fragments).to_string(),
    })
}

/// Replaces characters the decoder confuses with `/` in application
/// numbers (`I`, `l` and `,`).
#[must_use]
pub fn repair_application_number(number: &str) -> String {
    number.replace(['I', 'l', ','], "/")
}

/// Parses a `D/MM/YYYY` date, rejecting anything looser.
#[must_use]
pub fn parse_received_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if !RECEIVED_DATE_RE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
}

/// Finds and parses the date the application was received.
#[must_use]
pub fn received_date(fragments: &[TextFragment]) -> Option<NaiveDate> {
    let text = received_date_text(fragments)?;
    let date = parse_received_date(&text);
    if date.is_none() {
        log::debug!("Ignoring unparseable received date {text:?}");
    }
    date
}

fn received_date_text(fragments: &[TextFragment]) -> Option<String> {
    let printed = |label: &str| fragments.iter().any(|fragment| fragment.text.trim() == label);

    if let Some(label) = RECEIVED_LABELS.iter().copied().find(|label| printed(label)) {
        extract_right(
            fragments,
            label,
            Some("Planning Approval"),
            Some("Land Division Approval"),
        )
        .or_else(|| {
            extract_right(
                fragments,
                "Application Date",
                Some("Planning Approval"),
                Some(label),
            )
        })
    } else if printed("Building Approval") {
        extract_left(
            fragments,
            "Building Approval",
            Some("Application Date"),
            Some("Building  received"),
        )
        .or_else(|| {
            extract_right(
                fragments,
                "Application Date",
                Some("Planning Approval"),
                Some("Building Approval"),
            )
        })
    } else {
        None
    }
}

fn legal_description(fragments: &[TextFragment]) -> LegalDescription {
    let part = |label: &str, bottom: &str| {
        extract_right(fragments, label, Some("Planning Conditions"), Some(bottom))
            .filter(|value| !value.is_empty())
    };

    LegalDescription {
        lot: part("Lot", "Section"),
        section: part("Section", "Plan"),
        plan: part("Plan", "Property Street"),
        title: part("Title", "Hundred"),
        hundred: part("Hundred", "Development Description"),
    }
}

/// Drops empty and `"0"` slot values.
fn meaningful(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty() && value != "0")
}

fn reject(
    reason: RejectReason,
    application_number: Option<&str>,
    fragments: &[TextFragment],
) -> RejectReason {
    match application_number {
        Some(number) => log::info!("Ignoring application {number:?}: {reason}"),
        None => log::info!("Ignoring record on page: {reason}"),
    }
    log::debug!(
        "Elements: {}",
        fragments
            .iter()
            .map(|fragment| format!("[{}]", fragment.text))
            .collect::<String>()
    );
    reason
}
