//! Fields that may carry several merged values.
//!
//! When two rows of the source register overlap, the publisher merges their
//! values into one layout slot, separated by a sentinel character that
//! never otherwise appears in the text.  [`Field::parse`] detects this once,
//! at the boundary, so downstream code matches on the variant instead of
//! probing for the sentinel.

/// The sentinel registers use between merged values.
pub const DEFAULT_SENTINEL: char = 'ü';

/// A layout slot holding one value or several positionally zipped values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// An ordinary single value.
    Single(String),
    /// Two or more values merged with the sentinel, in slot order.
    Multiplexed(Vec<String>),
}

impl Field {
    /// Splits `raw` on `sentinel`.
    #[must_use]
    pub fn parse(raw: &str, sentinel: char) -> Self {
        if raw.contains(sentinel) {
            Self::Multiplexed(raw.split(sentinel).map(str::to_owned).collect())
        } else {
            Self::Single(raw.to_owned())
        }
    }

    /// Number of values in the slot (at least one).
    #[must_use]
    pub fn value_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multiplexed(values) => values.len(),
        }
    }

    /// Returns the values, right-padded with empty strings to at least
    /// `count`.
    #[must_use]
    pub fn padded(&self, count: usize) -> Vec<String> {
        let mut values = match self {
            Self::Single(value) => vec![value.clone()],
            Self::Multiplexed(values) => values.clone(),
        };
        if values.len() < count {
            values.resize(count, String::new());
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_single() {
        assert_eq!(
            Field::parse("RAILWAY TCE", DEFAULT_SENTINEL),
            Field::Single("RAILWAY TCE".to_owned())
        );
    }

    #[test]
    fn splits_on_the_sentinel() {
        let field = Field::parse("ü35", DEFAULT_SENTINEL);
        assert_eq!(
            field,
            Field::Multiplexed(vec![String::new(), "35".to_owned()])
        );
        assert_eq!(field.value_count(), 2);
    }

    #[test]
    fn pads_missing_values() {
        let field = Field::parse("ROSSLYNüSWIFT WINGS ROAD", DEFAULT_SENTINEL);
        assert_eq!(
            field.padded(3),
            vec!["ROSSLYN".to_owned(), "SWIFT WINGS ROAD".to_owned(), String::new()]
        );
        assert_eq!(field.padded(1).len(), 2);
        assert_eq!(Field::Single("KADINA".to_owned()).padded(2)[1], "");
    }
}
