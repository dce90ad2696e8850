//! DOI identity model
//!
//! This crate provides the identifier core shared by services that store and
//! route publications by DOI:
//! - [`Doi`], the canonical value type (bare DOI name, no URI prefix)
//! - [`UriStyle`], the fixed catalog of URI prefixes (`info:doi/`, `doi:`, resolvers)
//! - [`escape`]/[`unescape`], a bijective codec producing single path segments
//! - [`get_short_identifier`], the compact `<code>.<number>` form of article DOIs
//!
//! Everything is a pure function over its input and safe to call from any
//! thread.

pub mod config;
pub mod doi;
pub mod error;
pub mod escaping;
pub mod family;
pub mod short_id;
pub mod uri_style;

#[cfg(feature = "uniffi")]
pub mod ffi;

pub use config::{ConfigError, DoiConfig, JournalFamilyConfig};
pub use doi::Doi;
pub use error::{
    DoiError, EscapeFault, EscapedDoiError, InvalidDoiError, Result, ShortIdentifierError,
    ShortIdentifierFault,
};
pub use escaping::{escape, unescape, unescape_to_string};
pub use family::{is_valid_family_doi, JournalFamily};
pub use short_id::{get_short_identifier, ShortIdentifier, ShortIdentifierExtractor};
pub use uri_style::{verify_catalog, CatalogError, UnknownUriStyle, UriStyle};

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
