//! URI prefix conventions for writing a DOI
//!
//! The catalog is a fixed table. No prefix may be a prefix of another, which
//! makes style detection a single unambiguous `starts_with` per entry. The
//! property is asserted at compile time and can be re-checked at start-up
//! with [`verify_catalog`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One recognized convention for prefixing a DOI name into URI form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum UriStyle {
    /// `info:doi/`, the legacy repository style
    InfoDoi,
    /// `doi:`
    DoiScheme,
    /// `https://doi.org/`, Crossref's current recommendation
    HttpsDoiResolver,
    /// `http://doi.org/`
    HttpDoiResolver,
    /// `https://dx.doi.org/`
    HttpsDxResolver,
    /// `http://dx.doi.org/`
    HttpDxResolver,
}

const PREFIXES: [&str; 6] = [
    UriStyle::InfoDoi.prefix(),
    UriStyle::DoiScheme.prefix(),
    UriStyle::HttpsDoiResolver.prefix(),
    UriStyle::HttpDoiResolver.prefix(),
    UriStyle::HttpsDxResolver.prefix(),
    UriStyle::HttpDxResolver.prefix(),
];

// Editing the catalog must keep it prefix-free; this fails the build otherwise.
const _: () = assert!(prefixes_are_disjoint(&PREFIXES));

impl UriStyle {
    /// Every style, in declaration order
    pub const ALL: [UriStyle; 6] = [
        UriStyle::InfoDoi,
        UriStyle::DoiScheme,
        UriStyle::HttpsDoiResolver,
        UriStyle::HttpDoiResolver,
        UriStyle::HttpsDxResolver,
        UriStyle::HttpDxResolver,
    ];

    /// The literal text this style puts in front of a DOI name
    pub const fn prefix(self) -> &'static str {
        match self {
            UriStyle::InfoDoi => "info:doi/",
            UriStyle::DoiScheme => "doi:",
            UriStyle::HttpsDoiResolver => "https://doi.org/",
            UriStyle::HttpDoiResolver => "http://doi.org/",
            UriStyle::HttpsDxResolver => "https://dx.doi.org/",
            UriStyle::HttpDxResolver => "http://dx.doi.org/",
        }
    }

    /// Stable kebab-case name, as used by serde and the CLI
    pub const fn name(self) -> &'static str {
        match self {
            UriStyle::InfoDoi => "info-doi",
            UriStyle::DoiScheme => "doi-scheme",
            UriStyle::HttpsDoiResolver => "https-doi-resolver",
            UriStyle::HttpDoiResolver => "http-doi-resolver",
            UriStyle::HttpsDxResolver => "https-dx-resolver",
            UriStyle::HttpDxResolver => "http-dx-resolver",
        }
    }

    /// Whether the style is an HTTP(S) resolver address rather than a bare scheme
    pub fn is_resolver(self) -> bool {
        self.prefix().starts_with("http")
    }

    /// Find the style `raw` is written in, if any.
    ///
    /// At most one style can match because the catalog is prefix-free.
    pub fn detect(raw: &str) -> Option<UriStyle> {
        Self::ALL
            .iter()
            .copied()
            .find(|style| raw.starts_with(style.prefix()))
    }

    /// Strip one level of style prefix from `raw`.
    ///
    /// Returns the detected style (if any) and the remainder.
    pub fn strip(raw: &str) -> (Option<UriStyle>, &str) {
        match Self::detect(raw) {
            Some(style) => (Some(style), &raw[style.prefix().len()..]),
            None => (None, raw),
        }
    }
}

impl fmt::Display for UriStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized style name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown URI style: {0} (expected one of info-doi, doi-scheme, https-doi-resolver, http-doi-resolver, https-dx-resolver, http-dx-resolver)")]
pub struct UnknownUriStyle(pub String);

impl FromStr for UriStyle {
    type Err = UnknownUriStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownUriStyle(s.to_string()))
    }
}

/// A violation of the prefix-free catalog property
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("URI style {0} has an empty prefix")]
    EmptyPrefix(UriStyle),

    #[error("prefix of {shadowed} ({shadowed_prefix:?}) starts with prefix of {style} ({prefix:?})")]
    Overlap {
        style: UriStyle,
        prefix: &'static str,
        shadowed: UriStyle,
        shadowed_prefix: &'static str,
    },
}

/// Check every ordered pair of distinct styles for prefix collisions.
///
/// The same property is asserted when the crate is compiled; this runtime
/// form reports which pair collides and is what start-up code should call.
pub fn verify_catalog() -> Result<(), CatalogError> {
    for style in UriStyle::ALL {
        if style.prefix().is_empty() {
            return Err(CatalogError::EmptyPrefix(style));
        }
    }
    for style in UriStyle::ALL {
        for other in UriStyle::ALL {
            if style != other && other.prefix().starts_with(style.prefix()) {
                return Err(CatalogError::Overlap {
                    style,
                    prefix: style.prefix(),
                    shadowed: other,
                    shadowed_prefix: other.prefix(),
                });
            }
        }
    }
    tracing::debug!(styles = UriStyle::ALL.len(), "URI style catalog is prefix-free");
    Ok(())
}

const fn starts_with(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    let mut i = 0;
    while i < needle.len() {
        if haystack[i] != needle[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn prefixes_are_disjoint(prefixes: &[&str]) -> bool {
    let mut i = 0;
    while i < prefixes.len() {
        if prefixes[i].is_empty() {
            return false;
        }
        let mut j = 0;
        while j < prefixes.len() {
            if i != j && starts_with(prefixes[j].as_bytes(), prefixes[i].as_bytes()) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}
