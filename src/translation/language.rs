//! Language tags and the candidate set offered to the user and the detector.

use anyhow::{Result, bail};

/// Reserved tag meaning "detect automatically". Never a valid target.
pub const AUTO: &str = "auto";

/// Ordered, de-duplicated set of selectable language tags (`auto` excluded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateLanguages {
    tags: Vec<String>,
}

impl CandidateLanguages {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !tag.is_empty() && tag != AUTO && !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        Self { tags: unique }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Maps free-form detector output onto a member of the set, or [`AUTO`].
    ///
    /// Surrounding whitespace is ignored; anything else must match exactly.
    pub fn normalize(&self, detected: &str) -> String {
        let detected = detected.trim();
        if self.contains(detected) {
            detected.to_string()
        } else {
            AUTO.to_string()
        }
    }

    /// Validates a target language (`auto` is rejected).
    ///
    /// # Errors
    ///
    /// Returns an error if the language is not in the set.
    pub fn validate_target(&self, lang: &str) -> Result<()> {
        if lang == AUTO {
            bail!("'{AUTO}' cannot be used as a target language");
        }
        self.validate(lang)
    }

    /// Validates a source language (`auto` is accepted).
    pub fn validate_source(&self, lang: &str) -> Result<()> {
        if lang == AUTO {
            return Ok(());
        }
        self.validate(lang)
    }

    fn validate(&self, lang: &str) -> Result<()> {
        if self.contains(lang) {
            Ok(())
        } else {
            bail!(
                "Invalid language: '{lang}'\n\n\
                 Configured languages: {}\n\
                 Run 'llm-translate languages' to see all of them.",
                self.tags.join(", ")
            )
        }
    }
}
