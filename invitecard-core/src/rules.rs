//! Decision Tables - ordered keyword rules
//!
//! A table is a list of `(keywords, outcome)` pairs evaluated in
//! declaration order. The first rule whose keywords occur in the input
//! decides; callers supply the terminal default.

use regex::Regex;

/// A named alternation of literal keywords.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    name: &'static str,
    pattern: Regex,
}

impl KeywordSet {
    /// Build a set matching any of `keywords` as a plain substring.
    ///
    /// # Panics
    ///
    /// Only if the escaped alternation exceeds the regex size limit, which
    /// no keyword list in this crate comes near.
    pub fn new(name: &'static str, keywords: &[&str]) -> Self {
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation).expect("escaped keyword alternation is a valid pattern");
        Self { name, pattern }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `text` is expected to be lower-cased already.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Ordered rule table. Precedence is the order rules were pushed.
#[derive(Debug, Clone)]
pub struct DecisionTable<T> {
    rules: Vec<(KeywordSet, T)>,
}

impl<T: Copy> DecisionTable<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, keywords: KeywordSet, outcome: T) -> Self {
        self.rules.push((keywords, outcome));
        self
    }

    /// Outcome of the first matching rule, if any.
    pub fn decide(&self, text: &str) -> Option<T> {
        self.rules
            .iter()
            .find(|(keywords, _)| keywords.matches(text))
            .map(|(keywords, outcome)| {
                log::debug!("rule '{}' matched", keywords.name());
                *outcome
            })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: Copy> Default for DecisionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
