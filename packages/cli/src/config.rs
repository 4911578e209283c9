//! Scraper configuration.
//!
//! A compiled-in default (`config/default.toml`) describes the Wakefield
//! register; `--config` replaces it wholesale.

use std::path::Path;

use da_register_address::{DEFAULT_SENTINEL, ReferencePaths};
use da_register_listing::DEFAULT_LINK_SELECTORS;
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for [`ScraperConfig`].
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Everything the scraper needs to know about one council's register.
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Separator of merged values in address slots.
    #[serde(default = "default_sentinel")]
    pub sentinel: char,
    /// Copied into every record.
    pub comment_url: String,
    /// Locations of the reference tables.
    pub reference: ReferencePaths,
    /// Where register documents are linked from.
    pub listing: ListingConfig,
}

/// The council page linking the register documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    pub url: String,
    /// CSS selectors for the document anchors, tried in order.
    #[serde(default = "default_link_selectors")]
    pub link_selectors: Vec<String>,
}

const fn default_sentinel() -> char {
    DEFAULT_SENTINEL
}

fn default_link_selectors() -> Vec<String> {
    DEFAULT_LINK_SELECTORS
        .iter()
        .map(|selector| (*selector).to_owned())
        .collect()
}

impl ScraperConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text is not a valid
    /// configuration.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads the file at `path`, or the compiled-in default when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Self::from_toml(DEFAULT_CONFIG);
        };

        log::debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }
}
