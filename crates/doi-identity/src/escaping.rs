//! Path-segment escaping for DOIs
//!
//! `"++"` represents `'/'` and `"+-"` represents a literal `'+'`. Every other
//! character is copied unchanged. Any other use of `'+'`, and any literal `'/'`,
//! is invalid in escaped text. A style prefix is escaped like the rest of the
//! string.
//!
//! The encoding is stable: escaped DOIs are embedded in URLs and storage keys.

use crate::doi::Doi;
use crate::error::{DoiError, EscapeFault, EscapedDoiError};

/// Escape a DOI, DOI URI, or any text into a form containing no `'/'`.
///
/// ```
/// use doi_identity::escape;
/// assert_eq!(escape("10.1371/journal.pone.0000000"), "10.1371++journal.pone.0000000");
/// assert_eq!(escape("++"), "+-+-");
/// ```
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match c {
            '/' => escaped.push_str("++"),
            '+' => escaped.push_str("+-"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Plain,
    AfterPlus,
}

/// Decode escaped text back into the original string.
///
/// This is the exact inverse of [`escape`] and accepts the empty string.
pub fn unescape_to_string(escaped: &str) -> Result<String, EscapedDoiError> {
    let fail = |fault| EscapedDoiError {
        escaped: escaped.to_string(),
        fault,
    };

    let mut unescaped = String::with_capacity(escaped.len());
    let mut state = ScanState::Plain;
    for (position, c) in escaped.chars().enumerate() {
        state = match (state, c) {
            (ScanState::Plain, '/') => return Err(fail(EscapeFault::UnescapedSlash { position })),
            (ScanState::Plain, '+') => ScanState::AfterPlus,
            (ScanState::Plain, c) => {
                unescaped.push(c);
                ScanState::Plain
            }
            (ScanState::AfterPlus, '+') => {
                unescaped.push('/');
                ScanState::Plain
            }
            (ScanState::AfterPlus, '-') => {
                unescaped.push('+');
                ScanState::Plain
            }
            (ScanState::AfterPlus, found) => {
                return Err(fail(EscapeFault::InvalidEscape { position, found }))
            }
        };
    }

    match state {
        ScanState::Plain => Ok(unescaped),
        ScanState::AfterPlus => Err(fail(EscapeFault::DanglingEscape)),
    }
}

/// Resolve an escaped DOI (with or without a style prefix) into a [`Doi`].
///
/// ```
/// use doi_identity::{unescape, Doi};
/// let doi = unescape("info:doi++10.1371++journal.pone.0000000").unwrap();
/// assert_eq!(doi, Doi::create("10.1371/journal.pone.0000000").unwrap());
/// assert!(unescape("10.1371+journal").is_err());
/// ```
pub fn unescape(escaped: &str) -> Result<Doi, DoiError> {
    let unescaped = unescape_to_string(escaped)?;
    Ok(Doi::create(&unescaped)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_basic() {
        assert_eq!(escape(""), "");
        assert_eq!(escape("/"), "++");
        assert_eq!(escape("+"), "+-");
        assert_eq!(escape("/+"), "+++-");
        assert_eq!(escape("\u{2603}/\u{2603}"), "\u{2603}++\u{2603}");
    }

    #[test]
    fn unescape_transitions() {
        assert_eq!(unescape_to_string("++").unwrap(), "/");
        assert_eq!(unescape_to_string("+-").unwrap(), "+");
        assert_eq!(unescape_to_string("").unwrap(), "");
    }

    #[test]
    fn unescaped_slash_fault() {
        let err = unescape_to_string("ab/c").unwrap_err();
        assert_eq!(err.escaped, "ab/c");
        assert_eq!(err.fault, EscapeFault::UnescapedSlash { position: 2 });
    }

    #[test]
    fn invalid_escape_fault() {
        let err = unescape_to_string("a+a").unwrap_err();
        assert_eq!(
            err.fault,
            EscapeFault::InvalidEscape {
                position: 2,
                found: 'a'
            }
        );

        // the slash after '+' is reported as a bad escape, not a bare slash
        let err = unescape_to_string("+/").unwrap_err();
        assert_eq!(
            err.fault,
            EscapeFault::InvalidEscape {
                position: 1,
                found: '/'
            }
        );
    }

    #[test]
    fn dangling_escape_fault() {
        assert_eq!(
            unescape_to_string("+").unwrap_err().fault,
            EscapeFault::DanglingEscape
        );
        assert_eq!(
            unescape_to_string("+++").unwrap_err().fault,
            EscapeFault::DanglingEscape
        );
    }

    #[test]
    fn positions_count_characters() {
        let err = unescape_to_string("\u{2603}\u{2603}/").unwrap_err();
        assert_eq!(err.fault, EscapeFault::UnescapedSlash { position: 2 });
    }

    #[test]
    fn empty_decode_is_invalid_doi() {
        assert!(matches!(unescape(""), Err(DoiError::InvalidDoi(_))));
        assert!(matches!(unescape("doi:"), Err(DoiError::InvalidDoi(_))));
    }

    #[test]
    fn malformed_is_escaped_doi_error() {
        assert!(matches!(unescape("+a"), Err(DoiError::EscapedDoi(_))));
    }
}
