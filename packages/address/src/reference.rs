//! Reference vocabularies loaded once at start-up.
//!
//! Four newline-delimited tables back address resolution:
//!
//! | Table | Line format | Example |
//! |---|---|---|
//! | street names | `STREET,SUBURB` | `RAILWAY TCE SOUTH,PASKEVILLE` |
//! | street suffixes | `ABBREVIATION,WORD` | `TCE,TERRACE` |
//! | suburb names | `RAW,CANONICAL` | `KADINA SA,KADINA` |
//! | hundred names | `NAME` | `KULPARA` |
//!
//! Every entry is upper-cased.  Street names keep the order of their
//! first appearance in the file, which decides ties between equally close
//! fuzzy matches.  The suburb column of the street table is validated but
//! not retained.  The resulting [`ReferenceData`] is
//! immutable and passed by reference to whatever needs it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors raised while loading reference tables.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    /// A table file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A pair table could not be tokenised.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A pair table line had no second column.
    #[error("malformed {table} entry on line {line}: {message}")]
    Malformed {
        /// Which table the line came from.
        table: &'static str,
        /// One-based line number.
        line: u64,
        /// What was wrong with it.
        message: String,
    },
}

/// File locations of the four reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferencePaths {
    /// `STREET,SUBURB` pairs.
    pub street_names: PathBuf,
    /// `ABBREVIATION,WORD` pairs.
    pub street_suffixes: PathBuf,
    /// `RAW,CANONICAL` pairs.
    pub suburb_names: PathBuf,
    /// One hundred name per line.
    pub hundred_names: PathBuf,
}

impl ReferencePaths {
    /// Resolves relative paths against `base`.
    #[must_use]
    pub fn relative_to(&self, base: &Path) -> Self {
        Self {
            street_names: base.join(&self.street_names),
            street_suffixes: base.join(&self.street_suffixes),
            suburb_names: base.join(&self.suburb_names),
            hundred_names: base.join(&self.hundred_names),
        }
    }
}

/// The immutable vocabularies used to validate and canonicalise addresses.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    street_names: Vec<String>,
    street_suffixes: BTreeMap<String, String>,
    suburb_names: BTreeMap<String, String>,
    hundred_names: BTreeSet<String>,
}

impl ReferenceData {
    /// Parses the four tables from their text.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDataError`] if a pair table is malformed.
    pub fn from_tables(
        street_names: &str,
        street_suffixes: &str,
        suburb_names: &str,
        hundred_names: &str,
    ) -> Result<Self, ReferenceDataError> {
        let mut seen = BTreeSet::new();
        let streets: Vec<String> = parse_pairs("street names", street_names)?
            .into_iter()
            .map(|(street, _suburb)| street)
            .filter(|street| seen.insert(street.clone()))
            .collect();

        let data = Self {
            street_names: streets,
            street_suffixes: parse_pairs("street suffixes", street_suffixes)?
                .into_iter()
                .collect(),
            suburb_names: parse_pairs("suburb names", suburb_names)?
                .into_iter()
                .collect(),
            hundred_names: hundred_names
                .lines()
                .map(|line| line.trim().to_uppercase())
                .filter(|line| !line.is_empty())
                .collect(),
        };

        log::debug!(
            "Loaded {} street names, {} street suffixes, {} suburb names and {} hundred names",
            data.street_names.len(),
            data.street_suffixes.len(),
            data.suburb_names.len(),
            data.hundred_names.len()
        );

        Ok(data)
    }

    /// Reads and parses the four tables from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceDataError`] if a file cannot be read or a pair
    /// table is malformed.
    pub fn load(paths: &ReferencePaths) -> Result<Self, ReferenceDataError> {
        Self::from_tables(
            &read_table(&paths.street_names)?,
            &read_table(&paths.street_suffixes)?,
            &read_table(&paths.suburb_names)?,
            &read_table(&paths.hundred_names)?,
        )
    }

    /// Every known street name, in file order without repeats.
    pub fn street_names(&self) -> impl Iterator<Item = &str> {
        self.street_names.iter().map(String::as_str)
    }

    /// Full word for a street suffix abbreviation (`"TCE"` gives
    /// `"TERRACE"`).
    #[must_use]
    pub fn expand_suffix(&self, abbreviation: &str) -> Option<&str> {
        self.street_suffixes
            .get(&abbreviation.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Canonical form of a raw suburb name.
    #[must_use]
    pub fn canonical_suburb(&self, raw: &str) -> Option<&str> {
        self.suburb_names
            .get(&raw.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Whether `name` is a valid hundred (exact, case-insensitive).
    #[must_use]
    pub fn is_hundred(&self, name: &str) -> bool {
        self.hundred_names.contains(&name.trim().to_uppercase())
    }
}

fn read_table(path: &Path) -> Result<String, ReferenceDataError> {
    std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parses `A,B` lines into upper-cased, trimmed pairs, skipping blank
/// lines.  Anything after the second column is ignored.
fn parse_pairs(
    table: &'static str,
    text: &str,
) -> Result<Vec<(String, String)>, ReferenceDataError> {
    let cleaned = text.replace('\r', "");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(cleaned.as_bytes());

    let mut pairs = Vec::new();

    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map_or(0, csv::Position::line);
        let (Some(key), Some(value)) = (record.get(0), record.get(1)) else {
            return Err(ReferenceDataError::Malformed {
                table,
                line,
                message: format!(
                    "expected two comma-separated values, got {:?}",
                    record.iter().collect::<Vec<_>>()
                ),
            });
        };

        pairs.push((key.to_uppercase(), value.to_uppercase()));
    }

    Ok(pairs)
}
