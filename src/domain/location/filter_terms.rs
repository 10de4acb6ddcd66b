//! User-supplied location filter terms.

use super::matcher;
use std::collections::HashSet;

/// Ordered, deduplicated filter terms. A location passes when any term
/// matches it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilterSpec {
    terms: Vec<String>,
}

impl LocationFilterSpec {
    /// Trims terms, drops blanks and removes case-insensitive duplicates,
    /// keeping the first spelling.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.to_lowercase()))
            .collect();
        Self { terms }
    }

    /// Terms separated by newlines or `|`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(['\n', '|']))
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn matches_any(&self, candidate_location: &str) -> bool {
        self.terms
            .iter()
            .any(|term| matcher::matches(term, candidate_location))
    }
}
