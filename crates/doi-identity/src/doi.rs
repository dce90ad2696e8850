//! The canonical DOI value type
//!
//! A [`Doi`] holds only the DOI name, never a URI prefix. This type does not
//! check that the name has a registered prefix: a publisher without one is
//! free to use any string in place of a resolvable DOI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidDoiError;
use crate::escaping;
use crate::uri_style::UriStyle;

/// A Digital Object Identifier, stored as its bare name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Doi {
    name: String,
}

impl Doi {
    /// Parse raw text written in any catalog style, or already bare.
    ///
    /// Prefixes are stripped until none matches, so the stored name never
    /// begins with a catalog prefix.
    ///
    /// ```
    /// use doi_identity::Doi;
    /// let doi = Doi::create("info:doi/10.1371/journal.pone.0000000").unwrap();
    /// assert_eq!(doi.name(), "10.1371/journal.pone.0000000");
    /// assert!(Doi::create("doi:").is_err());
    /// ```
    pub fn create(raw: &str) -> Result<Doi, InvalidDoiError> {
        let mut name = raw;
        while let (Some(_), rest) = UriStyle::strip(name) {
            name = rest;
        }
        if name.is_empty() {
            return Err(InvalidDoiError {
                raw: raw.to_string(),
            });
        }
        Ok(Doi {
            name: name.to_string(),
        })
    }

    /// The DOI name with no URI prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with the given style's prefix. Not resolved or validated.
    pub fn as_uri(&self, style: UriStyle) -> String {
        format!("{}{}", style.prefix(), self.name)
    }

    /// Path-segment-safe form, optionally carrying a style prefix
    pub fn escaped(&self, style: Option<UriStyle>) -> String {
        match style {
            Some(style) => escaping::escape(&self.as_uri(style)),
            None => escaping::escape(&self.name),
        }
    }

    /// Compare names ignoring ASCII case.
    ///
    /// DOI names are case-insensitive for resolution; `==` stays exact so that
    /// escaped forms and storage keys built from equal values are identical.
    pub fn eq_ignore_ascii_case(&self, other: &Doi) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

impl fmt::Display for Doi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Doi {
    type Err = InvalidDoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Doi::create(s)
    }
}

impl TryFrom<&str> for Doi {
    type Error = InvalidDoiError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Doi::create(value)
    }
}

impl TryFrom<String> for Doi {
    type Error = InvalidDoiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Doi::create(&value)
    }
}

impl AsRef<str> for Doi {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl Serialize for Doi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for Doi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Doi::create(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn create_strips_each_style() {
        for style in UriStyle::ALL {
            let raw = format!("{}10.1371/foo", style.prefix());
            assert_eq!(Doi::create(&raw).unwrap().name(), "10.1371/foo");
        }
    }

    #[test]
    fn create_bare() {
        let doi = Doi::create("10.1371/foo").unwrap();
        assert_eq!(doi.name(), "10.1371/foo");
        assert_eq!(doi.to_string(), "10.1371/foo");
    }

    #[test]
    fn create_strips_stacked_prefixes() {
        let doi = Doi::create("info:doi/doi:10.1371/foo").unwrap();
        assert_eq!(doi.name(), "10.1371/foo");
    }

    #[test]
    fn create_rejects_empty() {
        assert_eq!(
            Doi::create(""),
            Err(InvalidDoiError { raw: String::new() })
        );
        for style in UriStyle::ALL {
            assert!(Doi::create(style.prefix()).is_err());
        }
    }

    #[test]
    fn partial_prefix_is_kept() {
        // "info:" is not a catalog prefix, so it is part of the name
        assert_eq!(Doi::create("info:").unwrap().name(), "info:");
    }

    #[test]
    fn as_uri_concatenates() {
        let doi = Doi::create("10.1371/foo").unwrap();
        assert_eq!(doi.as_uri(UriStyle::InfoDoi), "info:doi/10.1371/foo");
        assert_eq!(doi.as_uri(UriStyle::HttpsDoiResolver), "https://doi.org/10.1371/foo");
    }

    #[test]
    fn equality_ignores_style() {
        let a = Doi::create("doi:10.1371/foo").unwrap();
        let b = Doi::create("http://dx.doi.org/10.1371/foo").unwrap();
        assert_eq!(a, b);

        let set: HashSet<Doi> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn case_insensitive_comparison_is_opt_in() {
        let lower = Doi::create("10.1371/foo/bar").unwrap();
        let upper = Doi::create("10.1371/FOO/bar").unwrap();
        assert_ne!(lower, upper);
        assert!(lower.eq_ignore_ascii_case(&upper));
    }

    #[test]
    fn serde_as_bare_name() {
        let doi = Doi::create("info:doi/10.1371/foo").unwrap();
        assert_eq!(serde_json::to_string(&doi).unwrap(), "\"10.1371/foo\"");

        let parsed: Doi = serde_json::from_str("\"doi:10.1371/foo\"").unwrap();
        assert_eq!(parsed, doi);
        assert!(serde_json::from_str::<Doi>("\"info:doi/\"").is_err());
    }

    #[test]
    fn escaped_with_and_without_style() {
        let doi = Doi::create("10.1371/journal.pone.0000000").unwrap();
        assert_eq!(doi.escaped(None), "10.1371++journal.pone.0000000");
        assert_eq!(
            doi.escaped(Some(UriStyle::InfoDoi)),
            "info:doi++10.1371++journal.pone.0000000"
        );
    }
}
