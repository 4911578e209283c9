//! Page- and document-level parsing.

use std::collections::BTreeSet;
use std::sync::Arc;

use da_register_address::ReferenceData;
use da_register_application_models::DevelopmentApplication;
use da_register_layout::{TextFragment, segment_page};

use crate::ParseContext;
use crate::progress::ProgressCallback;
use crate::record::parse_application;

/// Applications read from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageApplications {
    /// Accepted applications, top to bottom.
    pub applications: Vec<DevelopmentApplication>,
    /// Record groups that produced no application.
    pub rejected: usize,
}

/// Parses every application record on one page.
///
/// Fragments may arrive in any order; they are put into reading order
/// before the page is segmented.
#[must_use]
pub fn parse_page(
    fragments: &[TextFragment],
    refs: &ReferenceData,
    context: &ParseContext,
) -> PageApplications {
    let mut fragments = fragments.to_vec();
    fragments.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut page = PageApplications::default();

    for group in segment_page(&fragments) {
        match parse_application(&group, refs, context) {
            Ok(application) => page.applications.push(application),
            Err(_) => page.rejected += 1,
        }
    }

    page
}

/// Parses every page of a document, in order.
///
/// An application number seen earlier in the same document usually means
/// a misread digit, so repeats get a `" (1)"`, `" (2)"`, ... suffix.
#[must_use]
pub fn parse_document(
    pages: &[Vec<TextFragment>],
    refs: &ReferenceData,
    context: &ParseContext,
    progress: &Arc<dyn ProgressCallback>,
) -> Vec<DevelopmentApplication> {
    log::info!("Reading development applications from {}", context.info_url);
    progress.set_total(pages.len() as u64);

    let mut seen = BTreeSet::new();
    let mut applications = Vec::new();
    let mut rejected = 0;

    for (index, fragments) in pages.iter().enumerate() {
        log::info!("Reading page {} of {}", index + 1, pages.len());
        progress.set_message(format!("page {}/{}", index + 1, pages.len()));

        let page = parse_page(fragments, refs, context);
        rejected += page.rejected;

        for mut application in page.applications {
            application.application_number =
                unique_number(&application.application_number, &seen);
            seen.insert(application.application_number.clone());
            applications.push(application);
        }

        progress.inc(1);
    }

    log::info!(
        "Parsed {} application(s) from {} ({rejected} ignored)",
        applications.len(),
        context.info_url
    );
    progress.finish(format!("{} application(s)", applications.len()));

    applications
}

fn unique_number(number: &str, seen: &BTreeSet<String>) -> String {
    if !seen.contains(number) {
        return number.to_owned();
    }

    let unique = (1_u32..)
        .map(|suffix| format!("{number} ({suffix})"))
        .find(|candidate| !seen.contains(candidate))
        .unwrap_or_else(|| number.to_owned());
    log::warn!("Application number {number:?} repeats within the document; renamed to {unique:?}");
    unique
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use da_register_address::DEFAULT_SENTINEL;

    use super::*;
    use crate::fixtures::{RECORD_HEIGHT, Slots, record};
    use crate::progress::null_progress;

    fn refs() -> ReferenceData {
        ReferenceData::from_tables("MAIN STREET,KADINA\n", "ST,STREET\n", "", "").unwrap()
    }

    fn context() -> ParseContext {
        ParseContext {
            info_url: "https://example.org/register.pdf".to_owned(),
            comment_url: "mailto:admin@example.org".to_owned(),
            date_scraped: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
            sentinel: DEFAULT_SENTINEL,
        }
    }

    fn page(numbers: &[&str]) -> Vec<TextFragment> {
        let mut fragments = vec![TextFragment::new(
            "Development Applications Register",
            20.0,
            20.0,
            160.0,
            12.0,
        )];
        for (index, number) in (0_u32..).zip(numbers) {
            let top = f64::from(index).mul_add(RECORD_HEIGHT, 60.0);
            fragments.extend(record(
                top,
                &Slots {
                    number,
                    house: &(index + 1).to_string(),
                    street: "MAIN STREET",
                    suburb: "KADINA",
                },
            ));
        }
        fragments
    }

    #[test]
    fn parses_every_record_on_a_page() {
        let mut fragments = page(&["340/001/19", "340/002/19", ""]);
        fragments.reverse();

        let page = parse_page(&fragments, &refs(), &context());

        let numbers: Vec<&str> = page
            .applications
            .iter()
            .map(|a| a.application_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["340/001/19", "340/002/19"]);
        assert_eq!(page.applications[1].address, "2 MAIN STREET, KADINA");
        assert_eq!(page.rejected, 1);
    }

    #[test]
    fn numbers_repeats_within_a_document() {
        let pages = vec![
            page(&["340/001/19", "340/001/19"]),
            page(&["340/001/19"]),
        ];

        let applications = parse_document(&pages, &refs(), &context(), &null_progress());

        let numbers: Vec<&str> = applications
            .iter()
            .map(|a| a.application_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["340/001/19", "340/001/19 (1)", "340/001/19 (2)"]);
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: std::sync::Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl ProgressCallback for RecordingProgress {
        fn set_total(&self, total: u64) {
            self.push(format!("total {total}"));
        }

        fn inc(&self, delta: u64) {
            self.push(format!("inc {delta}"));
        }

        fn set_message(&self, msg: String) {
            self.push(msg);
        }

        fn finish(&self, msg: String) {
            self.push(format!("finish {msg}"));
        }
    }

    #[test]
    fn reports_progress_for_every_page() {
        let recorder = Arc::new(RecordingProgress::default());
        let progress: Arc<dyn ProgressCallback> = recorder.clone();
        let pages = vec![page(&["340/001/19"]), page(&["340/002/19"])];

        parse_document(&pages, &refs(), &context(), &progress);

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec![
                "total 2",
                "page 1/2",
                "inc 1",
                "page 2/2",
                "inc 1",
                "finish 2 application(s)",
            ]
        );
    }

    #[test]
    fn empty_document_has_no_applications() {
        assert!(parse_document(&[], &refs(), &context(), &null_progress()).is_empty());
    }
}
