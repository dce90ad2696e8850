//! Short identifiers
//!
//! The short form of an article DOI is `<journal code>.<article number>`, e.g.
//! `info:doi/10.1371/journal.ppat.1003156` becomes `ppat.1003156`. It is
//! derived by peeling the DOI one layer at a time, so each rejection reason
//! is reported separately.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ShortIdentifierError, ShortIdentifierFault};
use crate::family::JournalFamily;
use crate::uri_style::UriStyle;

lazy_static! {
    static ref REGISTRANT_SEGMENT: Regex = Regex::new(r"^10\.[0-9]+(?:\.[0-9]+)*/").unwrap();
    static ref DEFAULT_EXTRACTOR: ShortIdentifierExtractor = ShortIdentifierExtractor::default();
}

const JOURNAL_SEGMENT: &str = "journal.";

/// A compact per-journal identifier such as `pone.0053052`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ShortIdentifier {
    pub code: String,
    pub number: String,
}

impl ShortIdentifier {
    pub fn new(code: &str, number: &str) -> Self {
        Self {
            code: code.to_string(),
            number: number.to_string(),
        }
    }
}

impl fmt::Display for ShortIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.code, self.number)
    }
}

/// Strip one catalog URI prefix, if present
pub fn strip_scheme(raw: &str) -> &str {
    UriStyle::strip(raw).1
}

/// Strip a `10.<digits>/` registrant segment, if present
pub fn strip_registrant(text: &str) -> &str {
    match REGISTRANT_SEGMENT.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Strip a literal `journal.` segment, if present
pub fn strip_journal_segment(text: &str) -> &str {
    text.strip_prefix(JOURNAL_SEGMENT).unwrap_or(text)
}

/// Derives short identifiers for one journal family
#[derive(Debug, Clone, Default)]
pub struct ShortIdentifierExtractor {
    family: JournalFamily,
}

impl ShortIdentifierExtractor {
    pub fn new(family: JournalFamily) -> Self {
        Self { family }
    }

    pub fn family(&self) -> &JournalFamily {
        &self.family
    }

    /// Derive the short identifier from any supported DOI form.
    ///
    /// Accepts bare names, catalog-prefixed URIs, and text that is already
    /// short. Suffixes after the article number (figure and table parts such
    /// as `.g002`) are dropped.
    pub fn extract(&self, raw: &str) -> Result<ShortIdentifier, ShortIdentifierError> {
        let fail = |reason| ShortIdentifierError {
            raw: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(fail(ShortIdentifierFault::Empty));
        }

        let rest = strip_scheme(raw);
        if rest.is_empty() {
            return Err(fail(ShortIdentifierFault::NothingAfterScheme));
        }

        let rest = strip_journal_segment(strip_registrant(rest));
        self.family.match_code_and_digits(rest).map_err(fail)
    }
}

/// Short identifier for the default journal family, as a string.
///
/// ```
/// use doi_identity::get_short_identifier;
/// assert_eq!(
///     get_short_identifier("info:doi/10.1371/journal.pone.0053052").unwrap(),
///     "pone.0053052"
/// );
/// assert!(get_short_identifier("info:doi/10.1371/image.pntd.v07.i01").is_err());
/// ```
pub fn get_short_identifier(raw: &str) -> Result<String, ShortIdentifierError> {
    DEFAULT_EXTRACTOR.extract(raw).map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_rules() {
        assert_eq!(strip_scheme("info:doi/10.1371/x"), "10.1371/x");
        assert_eq!(strip_scheme("info:"), "info:");

        assert_eq!(strip_registrant("10.1371/journal.pone"), "journal.pone");
        assert_eq!(strip_registrant("10.1000.10/abc"), "abc");
        assert_eq!(strip_registrant("10.1371"), "10.1371");
        assert_eq!(strip_registrant("pone.0053052"), "pone.0053052");

        assert_eq!(strip_journal_segment("journal.pone.1"), "pone.1");
        assert_eq!(strip_journal_segment("image.pone.1"), "image.pone.1");
    }

    #[test]
    fn extract_reasons() {
        let extractor = ShortIdentifierExtractor::default();
        let reason = |raw: &str| extractor.extract(raw).unwrap_err().reason;

        assert_eq!(reason(""), ShortIdentifierFault::Empty);
        assert_eq!(reason("info:doi/"), ShortIdentifierFault::NothingAfterScheme);
        assert_eq!(reason("info:"), ShortIdentifierFault::PatternNotFound);
        assert_eq!(
            reason("info:doi/10.1371/journal.pone."),
            ShortIdentifierFault::WrongDigitCount {
                found: 0,
                expected: 7
            }
        );
        assert_eq!(
            reason("info:doi/10.1371/image.pntd.v07.i01"),
            ShortIdentifierFault::PatternNotFound
        );
    }

    #[test]
    fn error_keeps_raw_input() {
        let err = get_short_identifier("10.1371/journal.crap.0056866").unwrap_err();
        assert_eq!(err.raw, "10.1371/journal.crap.0056866");
    }

    #[test]
    fn structured_result() {
        let id = ShortIdentifierExtractor::default()
            .extract("doi:10.1371/journal.pbio.1001234")
            .unwrap();
        assert_eq!(id, ShortIdentifier::new("pbio", "1001234"));
    }
}
