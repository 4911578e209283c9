#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Discovery of register documents on the council's listing page.
//!
//! The listing page links each month's register as a PDF.  The markup
//! has changed over the years, so several CSS selectors are tried and
//! their matches merged in page order.

use reqwest::Url;
use scraper::{Html, Selector};

/// Anchor selectors for the register PDFs across listing page layouts.
pub const DEFAULT_LINK_SELECTORS: &[&str] = &[
    "td.uContentListDesc p a[href$='.pdf']",
    "td.u6ListTD div.u6ListItem a[href$='.pdf']",
    "div.unityHtmlArticle p a[href$='.pdf']",
];

/// Errors that can occur while discovering documents.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// The listing page could not be fetched.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A selector could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The page URL or a link on it is not a valid URL.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        /// Why it was rejected.
        message: String,
    },
}

/// Fetches the listing page body.
///
/// # Errors
///
/// Returns [`ListingError::Http`] if the request fails or the server
/// responds with an error status.
pub async fn fetch_listing(url: &str) -> Result<String, ListingError> {
    log::info!("Retrieving page: {url}");
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Finds the absolute URLs of every register document linked from `html`.
///
/// Links are resolved against `base_url` and returned in the order the
/// selectors and the page list them, without duplicates.
///
/// # Errors
///
/// Returns [`ListingError`] if `base_url` is not a valid URL or a
/// selector cannot be parsed.
pub fn find_document_urls(
    html: &str,
    base_url: &str,
    selectors: &[impl AsRef<str>],
) -> Result<Vec<String>, ListingError> {
    let base = Url::parse(base_url).map_err(|e| ListingError::InvalidUrl {
        url: base_url.to_owned(),
        message: e.to_string(),
    })?;
    let document = Html::parse_document(html);

    let mut urls: Vec<String> = Vec::new();

    for selector in selectors {
        let selector = selector.as_ref();
        let parsed = Selector::parse(selector)
            .map_err(|e| ListingError::Parse(format!("invalid CSS selector '{selector}': {e}")))?;

        for element in document.select(&parsed) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            match base.join(href.trim()) {
                Ok(url) => {
                    let url = url.to_string();
                    if !urls.contains(&url) {
                        urls.push(url);
                    }
                }
                Err(e) => log::warn!("Skipping unresolvable link {href:?}: {e}"),
            }
        }
    }

    log::debug!("Found {} document link(s) on {base_url}", urls.len());

    Ok(urls)
}

/// Chooses which documents to parse: the first (most recent) one, plus
/// the `pick`-th of the rest (wrapping around).
#[must_use]
pub fn select_documents(urls: &[String], pick: usize) -> Vec<String> {
    let Some((first, rest)) = urls.split_first() else {
        return Vec::new();
    };

    let mut selected = vec![first.clone()];
    if !rest.is_empty() {
        selected.push(rest[pick % rest.len()].clone());
    }
    selected
}
