//! Boundary-safe phrase detection
//!
//! A phrase matches only as a whole-word sequence: the characters directly
//! before and after the match must not be word characters. Spaces inside a
//! phrase match any run of whitespace, and matching ignores case.

use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// A phrase compiled once for repeated lookups.
#[derive(Debug, Clone)]
pub struct Phrase {
    text: String,
    pattern: Option<Regex>,
}

impl Phrase {
    pub fn new(phrase: &str) -> Result<Self> {
        let text = phrase.trim().to_string();
        if text.is_empty() {
            return Ok(Self { text, pattern: None });
        }

        let source = text
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");

        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            text,
            pattern: Some(pattern),
        })
    }

    /// The trimmed phrase as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the phrase occurs in `text` as a whole-word sequence.
    pub fn is_found_in(&self, text: &str) -> bool {
        let Some(pattern) = &self.pattern else {
            return false;
        };

        let mut start = 0;
        while start <= text.len() {
            let Some(found) = pattern.find_at(text, start) else {
                return false;
            };

            let before = text[..found.start()].chars().next_back();
            let after = text[found.end()..].chars().next();
            if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
                return true;
            }

            // A rejected candidate may hide an overlapping one, so resume one
            // character past its start rather than at its end.
            match text[found.start()..].chars().next() {
                Some(c) => start = found.start() + c.len_utf8(),
                None => return false,
            }
        }

        false
    }
}

/// Whether `phrase` occurs in `text` as a whole-word, case-insensitive
/// sequence. An empty phrase never matches.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    match Phrase::new(phrase) {
        Ok(compiled) => compiled.is_found_in(text),
        Err(e) => {
            log::warn!("Could not compile phrase '{}': {}", phrase, e);
            false
        }
    }
}

/// Whether any of the compiled phrases occurs in `text`.
pub fn any_found_in(phrases: &[Phrase], text: &str) -> bool {
    phrases.iter().any(|p| p.is_found_in(text))
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter_boundaries() {
        assert!(contains_phrase("I use R for stats", "r"));
        assert!(!contains_phrase("correlation analysis", "r"));
        assert!(!contains_phrase("this or that", "r"));
    }

    #[test]
    fn test_short_token_inside_word_rejected() {
        assert!(!contains_phrase("she said hello", "ai"));
        assert!(contains_phrase("work on AI products", "ai"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(contains_phrase("Senior PYTHON developer", "python"));
        assert!(contains_phrase("senior python developer", "Python"));
    }

    #[test]
    fn test_flexible_internal_whitespace() {
        assert!(contains_phrase("applied machine\n   learning daily", "machine learning"));
        assert!(contains_phrase("machine\tlearning", "machine   learning"));
        assert!(!contains_phrase("machinelearning", "machine learning"));
    }

    #[test]
    fn test_punctuation_in_phrase() {
        assert!(contains_phrase("Skilled in C++ and Go", "c++"));
        assert!(contains_phrase("built with node.js, react", "node.js"));
        assert!(contains_phrase("ci/cd pipelines", "ci/cd"));
        assert!(!contains_phrase("c#sharp", "c#"));
    }

    #[test]
    fn test_empty_phrase_never_matches() {
        assert!(!contains_phrase("anything at all", ""));
        assert!(!contains_phrase("anything at all", "   "));
        assert!(!contains_phrase("", ""));
    }

    #[test]
    fn test_overlapping_candidate_found() {
        // The first candidate "a a" starts inside "aa" and is rejected; the
        // real match begins one character later.
        assert!(contains_phrase("aa a a", "a a"));
    }

    #[test]
    fn test_apostrophe_is_a_boundary() {
        assert!(contains_phrase("master's degree", "master"));
        assert!(!contains_phrase("masters degree", "master"));
    }

    #[test]
    fn test_compiled_phrase_reuse() {
        let phrase = Phrase::new("  docker ").unwrap();
        assert_eq!(phrase.as_str(), "docker");
        assert!(phrase.is_found_in("Docker, Kubernetes"));
        assert!(!phrase.is_found_in("dockerized"));
    }
}
