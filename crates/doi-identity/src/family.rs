//! Journal families: publisher-specific DOI shapes
//!
//! A family knows its registrant, the pattern of its journal codes and how
//! many digits an article number has. The default family is PLOS
//! (`10.1371`, codes like `pone`, seven-digit article numbers).

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::{ConfigError, JournalFamilyConfig};
use crate::error::ShortIdentifierFault;
use crate::short_id::ShortIdentifier;

lazy_static! {
    static ref DEFAULT_FAMILY: JournalFamily = JournalFamily::from_config(&JournalFamilyConfig::default())
        .expect("default journal family patterns are valid");
}

/// A compiled journal family
#[derive(Debug, Clone)]
pub struct JournalFamily {
    name: String,
    registrant: String,
    digit_count: usize,
    // ^(code)\.([0-9]*)
    code_and_digits: Regex,
    // [info:doi/]registrant/journal.code.NNNNNNN[.x123]
    article_doi: Regex,
    // [info:doi/]registrant/volume.code.vNN
    volume_doi: Regex,
}

impl JournalFamily {
    /// Compile a family from its configuration
    pub fn from_config(config: &JournalFamilyConfig) -> Result<Self, ConfigError> {
        if config.digit_count == 0 {
            return Err(ConfigError::OutOfRange(
                "digit_count must be positive".to_string(),
            ));
        }
        if config.registrant.is_empty() {
            return Err(ConfigError::MissingField("registrant".to_string()));
        }

        let code = &config.code_pattern;
        let registrant = regex::escape(&config.registrant);
        let digits = config.digit_count;

        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: config.code_pattern.clone(),
                message: e.to_string(),
            })
        };

        Ok(Self {
            name: config.name.clone(),
            registrant: config.registrant.clone(),
            digit_count: digits,
            code_and_digits: compile(format!(r"^(?P<code>(?:{code}))\.(?P<digits>[0-9]*)"))?,
            article_doi: compile(format!(
                r"^(?:info:doi/)?{registrant}/journal\.(?:{code})\.[0-9]{{{digits}}}(?:\.[a-z][0-9]+)?$"
            ))?,
            volume_doi: compile(format!(
                r"^(?:info:doi/)?{registrant}/volume\.(?:{code})\.v[0-9]+$"
            ))?,
        })
    }

    /// The built-in PLOS family
    pub fn plos() -> &'static JournalFamily {
        &DEFAULT_FAMILY
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registrant(&self) -> &str {
        &self.registrant
    }

    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    /// Whether `doi` is a well-formed article or volume DOI of this family
    pub fn is_valid_doi(&self, doi: &str) -> bool {
        self.article_doi.is_match(doi) || self.volume_doi.is_match(doi)
    }

    /// Match `<code>.<digits>` at the start of `text`.
    ///
    /// Anything after the article number is ignored.
    pub fn match_code_and_digits(&self, text: &str) -> Result<ShortIdentifier, ShortIdentifierFault> {
        let caps = self
            .code_and_digits
            .captures(text)
            .ok_or(ShortIdentifierFault::PatternNotFound)?;
        let code = &caps["code"];
        let digits = &caps["digits"];

        if digits.len() != self.digit_count {
            return Err(ShortIdentifierFault::WrongDigitCount {
                found: digits.len(),
                expected: self.digit_count,
            });
        }

        Ok(ShortIdentifier::new(code, digits))
    }
}

impl Default for JournalFamily {
    fn default() -> Self {
        JournalFamily::plos().clone()
    }
}

/// Validate a DOI against the default family
pub fn is_valid_family_doi(doi: &str) -> bool {
    JournalFamily::plos().is_valid_doi(doi)
}
