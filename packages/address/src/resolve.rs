//! Reconstruction of addresses from house number, street and suburb slots.
//!
//! Registers sometimes merge two (or more) addresses into one row.  The
//! house number and suburb slots then hold `N` sentinel-separated values,
//! but the street slot is mangled further: each of the `N` street names
//! was cut in two, and the first halves were joined with the sentinel,
//! followed by a space, followed by the second halves joined with the
//! sentinel.  For example:
//!
//! ```text
//! House Number: ü35
//!       Street: RAILWAYüSCHOOL TCE SOUTHüTERRA
//!       Suburb: PASKEVILLEüPASKEVILLE
//! ```
//!
//! Which space in the middle street token is the join is ambiguous, so
//! every space yields a [`Candidate`].  Each candidate's street names are
//! checked against the reference vocabularies and the best scoring address
//! is kept.  Exact recovery of the merged addresses is not possible in
//! general; the ranking only picks the most plausible one.

use std::cmp::Reverse;

use crate::field::Field;
use crate::format::{canonical_suburb, format_address};
use crate::fuzzy::{MAX_EDIT_DISTANCE, closest_match};
use crate::reference::ReferenceData;

/// Street suffixes that mark a hundred rather than a street.
const HUNDRED_SUFFIXES: &[&str] = &[" HD", " HUNDRED"];

/// How closely a street name matched the street vocabulary.
///
/// Orders from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Threshold {
    /// Matched a vocabulary entry within this many edits.
    Within(usize),
    /// No vocabulary entry was close enough; the raw text is kept.
    Unbounded,
}

/// One hypothesis for where the ambiguous space in the middle street token
/// falls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// First halves of the `N` street names.
    pub first_halves: Vec<String>,
    /// Second halves of the `N` street names.
    pub second_halves: Vec<String>,
    /// Set when one of this split's names ended in a hundred suffix that
    /// is not a known hundred, which means the split itself is wrong.
    pub has_invalid_hundred_name: bool,
}

/// A fully assembled address with its vocabulary score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredAddress {
    /// House number (possibly empty).
    pub house_number: String,
    /// Street name: the vocabulary entry if matched, else the raw text.
    pub street_name: String,
    /// Canonical suburb name.
    pub suburb_name: String,
    /// How well the street name matched.
    pub threshold: Threshold,
    /// Index of the owning [`Candidate`] in [`Resolution::candidates`].
    pub candidate: usize,
}

impl ScoredAddress {
    fn has_house_number(&self) -> bool {
        !self.house_number.trim().is_empty()
    }

    /// Formats the address for output.
    #[must_use]
    pub fn format(&self) -> String {
        format_address(&self.house_number, &self.street_name, &self.suburb_name)
    }
}

/// The ranking key of an address; smaller sorts first.
///
/// Compared lexicographically:
///
/// 1. a house number on a street matched within two edits,
/// 2. the street's threshold,
/// 3. a house number at all,
/// 4. an owning candidate free of invalid hundred names.
pub type RankKey = (Reverse<bool>, Threshold, Reverse<bool>, Reverse<bool>);

/// Everything a multiplexed resolution considered, best address first.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Every split of the ambiguous street token.
    pub candidates: Vec<Candidate>,
    /// Every street address built from the candidates, ranked.
    pub addresses: Vec<ScoredAddress>,
}

impl Resolution {
    /// The top-ranked address, formatted.
    #[must_use]
    pub fn best(&self) -> Option<String> {
        self.addresses.first().map(ScoredAddress::format)
    }

    /// Ranking key of `address` within this resolution.
    #[must_use]
    pub fn rank_key(&self, address: &ScoredAddress) -> RankKey {
        let valid_hundreds = self
            .candidates
            .get(address.candidate)
            .is_none_or(|candidate| !candidate.has_invalid_hundred_name);
        let low_threshold = matches!(address.threshold, Threshold::Within(d) if d <= MAX_EDIT_DISTANCE);

        (
            Reverse(address.has_house_number() && low_threshold),
            address.threshold,
            Reverse(address.has_house_number()),
            Reverse(valid_hundreds),
        )
    }

    fn rank(&mut self) {
        let mut addresses = std::mem::take(&mut self.addresses);
        addresses.sort_by_key(|address| self.rank_key(address));
        self.addresses = addresses;
    }
}

/// Resolves house number, street and suburb slots into one address.
#[derive(Debug, Clone, Copy)]
pub struct AddressResolver<'a> {
    refs: &'a ReferenceData,
    sentinel: char,
}

impl<'a> AddressResolver<'a> {
    /// Creates a resolver over `refs` splitting on `sentinel`.
    #[must_use]
    pub const fn new(refs: &'a ReferenceData, sentinel: char) -> Self {
        Self { refs, sentinel }
    }

    /// Resolves the three raw slots into a formatted address.
    ///
    /// A house number without the sentinel is formatted directly.
    /// Otherwise the slots are treated as merged and the best scoring
    /// reconstruction is returned; `None` means no street address could
    /// be built at all.
    #[must_use]
    pub fn resolve(&self, house_number: &str, street_name: &str, suburb_name: &str) -> Option<String> {
        match Field::parse(house_number, self.sentinel) {
            Field::Single(house_number) => Some(format_address(
                &house_number,
                street_name,
                &canonical_suburb(suburb_name, self.refs),
            )),
            house_numbers @ Field::Multiplexed(_) => {
                let resolution = self.resolve_multiplexed(
                    &house_numbers,
                    &Field::parse(street_name, self.sentinel),
                    &Field::parse(suburb_name, self.sentinel),
                );
                let best = resolution.best();
                if best.is_none() {
                    log::debug!(
                        "No address could be built from house number {house_number:?}, street {street_name:?} and suburb {suburb_name:?}"
                    );
                }
                best
            }
        }
    }

    /// Enumerates, scores and ranks every reconstruction of merged slots.
    #[must_use]
    pub fn resolve_multiplexed(
        &self,
        house_numbers: &Field,
        street_names: &Field,
        suburb_names: &Field,
    ) -> Resolution {
        let count = house_numbers.value_count();
        let house_numbers = house_numbers.padded(count);
        let suburb_names = suburb_names.padded(count);

        let mut resolution = Resolution {
            candidates: split_candidates(&street_names.padded(2 * count - 1), count),
            addresses: Vec::new(),
        };

        for (index, candidate) in resolution.candidates.iter_mut().enumerate() {
            for slot in 0..count {
                let street = self.join_halves(&candidate.first_halves[slot], &candidate.second_halves[slot]);
                if street.is_empty() {
                    continue;
                }

                if let Some(hundred) = strip_hundred_suffix(&street) {
                    if !self.refs.is_hundred(hundred) && !self.refs.is_hundred(&street) {
                        log::debug!("Split produced unknown hundred {street:?}");
                        candidate.has_invalid_hundred_name = true;
                    }
                    continue;
                }

                let (street_name, threshold) =
                    match closest_match(&street, self.refs.street_names(), MAX_EDIT_DISTANCE) {
                        Some((entry, distance)) => (entry.to_owned(), Threshold::Within(distance)),
                        None => (street, Threshold::Unbounded),
                    };

                resolution.addresses.push(ScoredAddress {
                    house_number: house_numbers[slot].trim().to_owned(),
                    street_name,
                    suburb_name: canonical_suburb(&suburb_names[slot], self.refs),
                    threshold,
                    candidate: index,
                });
            }
        }

        resolution.rank();
        resolution
    }

    /// Joins a street name's halves, expanding the last word of the second
    /// half if it is a known suffix abbreviation.
    fn join_halves(&self, first: &str, second: &str) -> String {
        let second = second.trim();
        let expanded = match second.rsplit_once(' ') {
            Some((head, last)) => self
                .refs
                .expand_suffix(last)
                .map_or_else(|| second.to_owned(), |full| format!("{head} {full}")),
            None => self
                .refs
                .expand_suffix(second)
                .map_or_else(|| second.to_owned(), str::to_owned),
        };

        format!("{} {expanded}", first.trim())
            .trim()
            .to_uppercase()
    }
}

/// Builds one [`Candidate`] per space in the middle street token.
///
/// `tokens` holds at least `2 * count - 1` values: the first halves of the
/// first `count - 1` names, the middle token, then the second halves of
/// the last `count - 1` names.  A middle token without a space (truncated
/// at the source) is treated as ending in one.
fn split_candidates(tokens: &[String], count: usize) -> Vec<Candidate> {
    let middle_index = count - 1;
    let middle = &tokens[middle_index];
    let middle = if middle.contains(' ') {
        middle.clone()
    } else {
        format!("{middle} ")
    };

    middle
        .match_indices(' ')
        .map(|(position, _)| {
            let mut first_halves = tokens[..middle_index].to_vec();
            first_halves.push(middle[..position].to_owned());

            let mut second_halves = vec![middle[position + 1..].to_owned()];
            second_halves.extend_from_slice(&tokens[count..2 * count - 1]);

            Candidate {
                first_halves,
                second_halves,
                has_invalid_hundred_name: false,
            }
        })
        .collect()
}

/// Returns the name before a trailing `" HD"`/`" HUNDRED"`, if present.
fn strip_hundred_suffix(street: &str) -> Option<&str> {
    HUNDRED_SUFFIXES
        .iter()
        .find_map(|suffix| street.strip_suffix(suffix))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::DEFAULT_SENTINEL;

    const SUFFIXES: &str = "TCE,TERRACE\nRD,ROAD\nST,STREET\nHD,HUNDRED\n";

    fn refs(streets: &str, hundreds: &str) -> ReferenceData {
        ReferenceData::from_tables(streets, SUFFIXES, "WALLAROO MINES,WALLAROO\n", hundreds).unwrap()
    }

    fn address(house: &str, threshold: Threshold, candidate: usize) -> ScoredAddress {
        ScoredAddress {
            house_number: house.to_owned(),
            street_name: "MAIN STREET".to_owned(),
            suburb_name: "KADINA".to_owned(),
            threshold,
            candidate,
        }
    }

    #[test]
    fn single_values_are_formatted_directly() {
        let refs = refs("", "");
        let resolver = AddressResolver::new(&refs, DEFAULT_SENTINEL);
        assert_eq!(
            resolver.resolve("12", "main  st", "HD Wallaroo Mines SA"),
            Some("12 MAIN ST, WALLAROO".to_owned())
        );
    }

    #[test]
    fn house_numbered_address_beats_exact_unnumbered_one() {
        let refs = refs("RAILWAY TCE SOUTH,PASKEVILLE\nSCHOOL TERRACE,PASKEVILLE\n", "");
        let resolver = AddressResolver::new(&refs, DEFAULT_SENTINEL);
        assert_eq!(
            resolver.resolve(
                "ü35",
                "RAILWAYüSCHOOL TCE SOUTHüTERRA",
                "PASKEVILLEüPASKEVILLE"
            ),
            Some("35 SCHOOL TERRACE, PASKEVILLE".to_owned())
        );
    }

    #[test]
    fn prefers_the_split_with_vocabulary_names() {
        let refs = refs("ROSSLYN ROAD,WALLAROO\nSWIFT WINGS ROAD,WALLAROO\n", "");
        let resolver = AddressResolver::new(&refs, DEFAULT_SENTINEL);
        let resolution = resolver.resolve_multiplexed(
            &Field::parse("79ü4", DEFAULT_SENTINEL),
            &Field::parse("ROSSLYNüSWIFT WINGS ROADüROAD", DEFAULT_SENTINEL),
            &Field::parse("WALLAROOüWALLAROO", DEFAULT_SENTINEL),
        );

        assert_eq!(resolution.candidates.len(), 2);
        let best = &resolution.addresses[0];
        assert_eq!(best.threshold, Threshold::Within(0));
        assert_eq!(
            resolution.candidates[best.candidate].first_halves,
            vec!["ROSSLYN".to_owned(), "SWIFT WINGS".to_owned()]
        );

        let streets: Vec<&str> = resolution
            .addresses
            .iter()
            .filter(|a| a.candidate == best.candidate)
            .map(|a| a.street_name.as_str())
            .collect();
        assert_eq!(streets, vec!["ROSSLYN ROAD", "SWIFT WINGS ROAD"]);
    }

    #[test]
    fn known_hundred_is_excluded_without_flagging() {
        let refs = refs("MAIN STREET,KADINA\n", "KULPARA\n");
        let resolver = AddressResolver::new(&refs, DEFAULT_SENTINEL);
        let resolution = resolver.resolve_multiplexed(
            &Field::parse("ü12", DEFAULT_SENTINEL),
            &Field::parse("KULPARAüMAIN HDüSTREET", DEFAULT_SENTINEL),
            &Field::parse("KADINAüKADINA", DEFAULT_SENTINEL),
        );

        assert_eq!(resolution.candidates.len(), 1);
        assert!(!resolution.candidates[0].has_invalid_hundred_name);
        assert_eq!(resolution.addresses.len(), 1);
        assert_eq!(resolution.best(), Some("12 MAIN STREET, KADINA".to_owned()));
    }

    #[test]
    fn unknown_hundred_flags_its_candidate() {
        let refs = refs("MAIN STREET,KADINA\n", "WILTUNGA\n");
        let resolver = AddressResolver::new(&refs, DEFAULT_SENTINEL);
        let resolution = resolver.resolve_multiplexed(
            &Field::parse("ü12", DEFAULT_SENTINEL),
            &Field::parse("KULPARAüMAIN HDüSTREET", DEFAULT_SENTINEL),
            &Field::parse("KADINAüKADINA", DEFAULT_SENTINEL),
        );

        assert!(resolution.candidates[0].has_invalid_hundred_name);
        assert!(
            resolution
                .addresses
                .iter()
                .all(|a| !a.street_name.ends_with("HUNDRED"))
        );
    }

    #[test]
    fn invalid_hundred_taints_sibling_addresses() {
        let resolution = Resolution {
            candidates: vec![
                Candidate {
                    first_halves: vec![],
                    second_halves: vec![],
                    has_invalid_hundred_name: true,
                },
                Candidate {
                    first_halves: vec![],
                    second_halves: vec![],
                    has_invalid_hundred_name: false,
                },
            ],
            addresses: vec![],
        };
        let tainted = address("", Threshold::Unbounded, 0);
        let clean = address("", Threshold::Unbounded, 1);
        assert!(resolution.rank_key(&clean) < resolution.rank_key(&tainted));
    }

    #[test]
    fn ranking_follows_the_documented_order() {
        let resolution = Resolution {
            candidates: vec![Candidate {
                first_halves: vec![],
                second_halves: vec![],
                has_invalid_hundred_name: false,
            }],
            addresses: vec![],
        };
        let key = |house: &str, threshold| resolution.rank_key(&address(house, threshold, 0));

        // Both within two edits: a house number wins regardless of distance.
        assert!(key("7", Threshold::Within(2)) < key("", Threshold::Within(0)));
        // Otherwise the lower threshold wins.
        assert!(key("", Threshold::Within(1)) < key("7", Threshold::Unbounded));
        assert!(key("7", Threshold::Within(0)) < key("7", Threshold::Within(1)));
        // Equal thresholds: a house number wins.
        assert!(key("7", Threshold::Unbounded) < key("", Threshold::Unbounded));
    }

    #[test]
    fn middle_token_without_space_is_split_at_its_end() {
        let tokens = vec!["OLIVE".to_owned(), "TUCKER".to_owned(), "ROAD".to_owned()];
        let candidates = split_candidates(&tokens, 2);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].first_halves, vec!["OLIVE".to_owned(), "TUCKER".to_owned()]);
        assert_eq!(candidates[0].second_halves, vec![String::new(), "ROAD".to_owned()]);
    }

    #[test]
    fn three_merged_addresses_are_each_recovered() {
        let refs = refs("ALPHA ROAD,KADINA\nBETA STREET,KADINA\nGAMMA TERRACE,KADINA\n", "");
        let resolver = AddressResolver::new(&refs, DEFAULT_SENTINEL);
        let resolution = resolver.resolve_multiplexed(
            &Field::parse("1ü2ü3", DEFAULT_SENTINEL),
            &Field::parse("ALPHAüBETAüGAMMA RDüSTüTCE", DEFAULT_SENTINEL),
            &Field::parse("KADINAüKADINAüKADINA", DEFAULT_SENTINEL),
        );

        assert_eq!(resolution.candidates.len(), 1);
        assert_eq!(resolution.candidates[0].first_halves, vec!["ALPHA", "BETA", "GAMMA"]);
        assert_eq!(resolution.candidates[0].second_halves, vec!["RD", "ST", "TCE"]);

        let formatted: Vec<String> = resolution.addresses.iter().map(ScoredAddress::format).collect();
        assert_eq!(
            formatted,
            vec![
                "1 ALPHA ROAD, KADINA",
                "2 BETA STREET, KADINA",
                "3 GAMMA TERRACE, KADINA",
            ]
        );
        assert!(resolution.addresses.iter().all(|address| address.threshold == Threshold::Within(0)));
        assert_eq!(resolution.best(), Some("1 ALPHA ROAD, KADINA".to_owned()));
    }

    #[test]
    fn no_street_text_gives_no_address() {
        let refs = refs("MAIN STREET,KADINA\n", "");
        let resolver = AddressResolver::new(&refs, DEFAULT_SENTINEL);
        assert_eq!(resolver.resolve("1ü2", "", "KADINA"), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        let refs = refs("ROSSLYN ROAD,WALLAROO\nSWIFT WINGS ROAD,WALLAROO\n", "");
        let resolver = AddressResolver::new(&refs, DEFAULT_SENTINEL);
        let first = resolver.resolve("79ü4", "ROSSLYNüSWIFT WINGS ROADüROAD", "WALLAROOüWALLAROO");
        let second = resolver.resolve("79ü4", "ROSSLYNüSWIFT WINGS ROADüROAD", "WALLAROOüWALLAROO");
        assert_eq!(first, second);
        assert!(first.is_some());
    }
}
