//! FFI exports
//!
//! Flat string-in, string-out wrappers for Swift/Kotlin callers.

use crate::{escaping, short_id, Doi, UriStyle};

/// FFI-safe error type
#[derive(uniffi::Error, Debug, Clone)]
#[uniffi(flat_error)]
pub enum FfiError {
    InvalidDoi { message: String },
    EscapedDoi { message: String },
    ShortIdentifier { message: String },
}

impl std::fmt::Display for FfiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FfiError::InvalidDoi { message }
            | FfiError::EscapedDoi { message }
            | FfiError::ShortIdentifier { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for FfiError {}

impl From<crate::DoiError> for FfiError {
    fn from(err: crate::DoiError) -> Self {
        let message = err.to_string();
        match err {
            crate::DoiError::EscapedDoi(_) => FfiError::EscapedDoi { message },
            crate::DoiError::ShortIdentifier(_) => FfiError::ShortIdentifier { message },
            crate::DoiError::InvalidDoi(_) | crate::DoiError::Config(_) => {
                FfiError::InvalidDoi { message }
            }
        }
    }
}

/// Canonical DOI name for raw text in any style
#[uniffi::export]
pub fn doi_name_ffi(raw: String) -> Result<String, FfiError> {
    Doi::create(&raw)
        .map(Doi::into_name)
        .map_err(|e| crate::DoiError::from(e).into())
}

#[uniffi::export]
pub fn doi_as_uri_ffi(raw: String, style: UriStyle) -> Result<String, FfiError> {
    Doi::create(&raw)
        .map(|doi| doi.as_uri(style))
        .map_err(|e| crate::DoiError::from(e).into())
}

#[uniffi::export]
pub fn escape_doi_ffi(text: String) -> String {
    escaping::escape(&text)
}

/// Unescape to the canonical DOI name
#[uniffi::export]
pub fn unescape_doi_ffi(escaped: String) -> Result<String, FfiError> {
    escaping::unescape(&escaped)
        .map(Doi::into_name)
        .map_err(FfiError::from)
}

#[uniffi::export]
pub fn short_identifier_ffi(raw: String) -> Result<String, FfiError> {
    short_id::get_short_identifier(&raw).map_err(|e| crate::DoiError::from(e).into())
}
