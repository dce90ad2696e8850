//! Error types for doi-identity
//!
//! Every error here is a local input-validation failure. None of them is
//! transient, and the library never logs or retries them.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for doi-identity operations
pub type Result<T> = std::result::Result<T, DoiError>;

/// Umbrella error for callers that mix parsing, unescaping and extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DoiError {
    /// Raw text could not be turned into a DOI
    #[error(transparent)]
    InvalidDoi(#[from] InvalidDoiError),

    /// Escaped text contained a malformed escape sequence
    #[error(transparent)]
    EscapedDoi(#[from] EscapedDoiError),

    /// Short identifier could not be derived
    #[error(transparent)]
    ShortIdentifier(#[from] ShortIdentifierError),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DoiError {
    /// Whether the error was caused by caller-supplied identifier text.
    ///
    /// Callers embedding identifiers in request paths should report these as
    /// client errors rather than internal faults.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DoiError::Config(_))
    }
}

/// Raised by [`Doi::create`](crate::Doi::create) when nothing is left after
/// stripping URI prefixes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid DOI: {raw:?} has an empty name")]
pub struct InvalidDoiError {
    /// The raw text as supplied by the caller
    pub raw: String,
}

/// Raised when an escaped DOI contains invalid or ambiguous escaping syntax.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid escaped DOI {escaped:?}: {fault}")]
pub struct EscapedDoiError {
    /// The escaped text as supplied by the caller
    pub escaped: String,
    /// What went wrong and where
    pub fault: EscapeFault,
}

/// The specific malformation found while unescaping.
///
/// Offsets are character (not byte) positions in the escaped text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeFault {
    #[error("invalid character '/' at {position}")]
    UnescapedSlash { position: usize },

    #[error("invalid escape '+{found}' at {position}")]
    InvalidEscape { position: usize, found: char },

    #[error("escape sequence begins at end of string")]
    DanglingEscape,
}

/// Raised by the short identifier extractor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Not a valid short identifier source {raw:?}: {reason}")]
pub struct ShortIdentifierError {
    pub raw: String,
    pub reason: ShortIdentifierFault,
}

/// Why a short identifier could not be derived.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortIdentifierFault {
    #[error("input is empty")]
    Empty,

    #[error("nothing follows the URI prefix")]
    NothingAfterScheme,

    #[error("no journal code followed by an article number")]
    PatternNotFound,

    #[error("article number has {found} digits, expected {expected}")]
    WrongDigitCount { found: usize, expected: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_error_carries_input() {
        let err = EscapedDoiError {
            escaped: "a+a".to_string(),
            fault: EscapeFault::InvalidEscape {
                position: 1,
                found: 'a',
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid escaped DOI \"a+a\": invalid escape '+a' at 1"
        );
    }

    #[test]
    fn input_errors_are_client_errors() {
        let err: DoiError = InvalidDoiError { raw: String::new() }.into();
        assert!(err.is_client_error());

        let err: DoiError = ConfigError::OutOfRange("digit_count".to_string()).into();
        assert!(!err.is_client_error());
    }
}
