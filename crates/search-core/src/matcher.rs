//! Line matching.
//!
//! A query is a regular expression matched case-insensitively and unanchored:
//! a line counts when the pattern matches anywhere in it. Each line counts at
//! most once, however many times the pattern occurs on it. Patterns that match
//! the empty string are rejected, since they would count every line.

use crate::corpus::Document;
use crate::error::QueryError;
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct MatchQuery {
    regex: Regex,
}

impl MatchQuery {
    pub fn new(query: &str) -> Result<Self, QueryError> {
        if query.is_empty() {
            return Err(QueryError::Empty);
        }

        let regex = RegexBuilder::new(query).case_insensitive(true).build()?;
        if regex.is_match("") {
            return Err(QueryError::MatchesEmpty {
                pattern: query.to_string(),
            });
        }
        Ok(Self { regex })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    pub fn count_lines(&self, text: &str) -> u64 {
        text.lines().filter(|line| self.is_match(line)).count() as u64
    }

    /// Matching lines summed over every document.
    pub fn count_corpus(&self, documents: &[Document]) -> u64 {
        documents.iter().map(|doc| self.count_lines(&doc.text)).sum()
    }
}
