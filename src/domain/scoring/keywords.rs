//! Sensational keyword matching.

/// Default sensational terms.
pub const SENSATIONAL_TERMS: &[&str] = &[
    "breaking",
    "shocking",
    "secret",
    "exposed",
    "banned",
    "miracle",
    "guaranteed",
    "you won't believe",
    "truth",
    "debunked",
    "cover-up",
    "leaked",
];

/// Immutable list of terms scanned for in every input.
///
/// Terms are stored lower-cased, trimmed and de-duplicated. Matching is a
/// case-insensitive substring test, evaluated independently per term, so
/// overlapping terms are all reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    /// Builds a keyword set from arbitrary terms.
    ///
    /// Empty terms are dropped; duplicates (after lower-casing) keep their
    /// first position.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();

        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !normalized.contains(&term) {
                normalized.push(term);
            }
        }

        Self { terms: normalized }
    }

    /// The default sensational term list.
    pub fn sensational() -> Self {
        Self::new(SENSATIONAL_TERMS.iter().copied())
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms found in `text`.
    pub fn matches<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a str> + 'a {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .filter(move |term| haystack.contains(term.as_str()))
            .map(String::as_str)
    }

    /// Flag records for every term found in `text`.
    ///
    /// Each flag reads `Contains keyword: "<term>"`.
    pub fn flags(&self, text: &str) -> Vec<String> {
        self.matches(text)
            .map(|term| format!("Contains keyword: \"{term}\""))
            .collect()
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::sensational()
    }
}
