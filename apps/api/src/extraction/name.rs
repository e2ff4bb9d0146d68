//! Name strategy — deterministic pattern matching over the resume header.
//!
//! Names live in the first few lines, so matching is restricted to a
//! ten-line window. Patterns are tried in priority order and the first
//! candidate in document order that survives validation wins; candidates
//! that look like section headers ("Curriculum Vitae", "Professional
//! Summary") are rejected by keyword.

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::{FieldKind, FieldResult, FieldStrategy, FieldValue};

/// Lines from the top of the document considered for name matching.
const SEARCH_LINES: usize = 10;

/// Substrings that disqualify a candidate — section headers, not names.
const INVALID_KEYWORDS: &[&str] = &[
    "resume",
    "curriculum",
    "vitae",
    "profile",
    "summary",
    "objective",
    "experience",
    "education",
    "skills",
    "contact",
];

pub struct NameStrategy {
    patterns: Vec<Regex>,
}

impl NameStrategy {
    pub fn new() -> Self {
        // Horizontal whitespace only between words — a candidate never
        // spans lines.
        let patterns = [
            // Name followed by contact info
            r"(?m)^([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)+)[ \t]*(?:\n|Email|Phone|Tel|\d)",
            // Name on its own line (2-4 capitalized words)
            r"(?m)^([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,3})[ \t]*\n",
            // Capitalized 2-3 word sequence at line start
            r"(?m)^([A-Z][a-z]+[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?)\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("name pattern is valid"))
        .collect();

        Self { patterns }
    }

    fn is_valid_name(name: &str) -> bool {
        if name.len() < 3 {
            return false;
        }

        let lower = name.to_lowercase();
        if INVALID_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return false;
        }

        let words: Vec<&str> = name.split_whitespace().collect();
        if !(2..=4).contains(&words.len()) {
            return false;
        }

        words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
    }

    /// Last resort: take the first two capitalized alphabetic words from the
    /// top of the document and treat them as a two-word name.
    fn fallback_candidate(search_text: &str) -> Option<String> {
        let mut capitalized = Vec::new();
        for word in search_text.split_whitespace().take(5) {
            let alphabetic = !word.is_empty() && word.chars().all(char::is_alphabetic);
            let starts_upper = word.chars().next().is_some_and(|c| c.is_uppercase());
            if alphabetic && starts_upper {
                capitalized.push(word);
                if capitalized.len() == 2 {
                    return Some(capitalized.join(" "));
                }
            }
        }
        None
    }
}

impl Default for NameStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FieldStrategy for NameStrategy {
    fn field(&self) -> FieldKind {
        FieldKind::Name
    }

    async fn extract(&self, text: &str) -> FieldResult {
        if text.trim().is_empty() {
            return FieldResult::NotFound;
        }

        let search_text: String = text
            .trim()
            .lines()
            .take(SEARCH_LINES)
            .collect::<Vec<_>>()
            .join("\n");

        for pattern in &self.patterns {
            for captures in pattern.captures_iter(&search_text) {
                let candidate = captures[1].trim();
                if Self::is_valid_name(candidate) {
                    debug!("Name extracted: {candidate}");
                    return FieldResult::Found(FieldValue::Name(candidate.to_string()));
                }
            }
        }

        if let Some(candidate) = Self::fallback_candidate(&search_text) {
            if Self::is_valid_name(&candidate) {
                debug!("Name extracted via fallback: {candidate}");
                return FieldResult::Found(FieldValue::Name(candidate));
            }
        }

        FieldResult::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(text: &str) -> FieldResult {
        NameStrategy::new().extract(text).await
    }

    fn found(name: &str) -> FieldResult {
        FieldResult::Found(FieldValue::Name(name.to_string()))
    }

    #[tokio::test]
    async fn test_name_before_contact_info() {
        let text = "Jane Doe\nEmail: jane.doe@corp.com\nPhone: 555-0100";
        assert_eq!(extract(text).await, found("Jane Doe"));
    }

    #[tokio::test]
    async fn test_name_after_document_header() {
        let text = "Curriculum Vitae\nJohn Smith\nSenior Software Engineer";
        assert_eq!(extract(text).await, found("John Smith"));
    }

    #[tokio::test]
    async fn test_three_word_name() {
        let text = "Mary Jane Watson\nmary@example.com";
        assert_eq!(extract(text).await, found("Mary Jane Watson"));
    }

    #[tokio::test]
    async fn test_section_headers_are_rejected() {
        let text = "Professional Summary\nexperienced developer with many skills";
        assert_eq!(extract(text).await, FieldResult::NotFound);
    }

    #[tokio::test]
    async fn test_lowercase_text_has_no_name() {
        assert_eq!(extract("just some lowercase text\nnothing here").await, FieldResult::NotFound);
    }

    #[tokio::test]
    async fn test_empty_text_returns_not_found() {
        assert_eq!(extract("").await, FieldResult::NotFound);
    }

    #[tokio::test]
    async fn test_is_valid_name_word_count_bounds() {
        assert!(NameStrategy::is_valid_name("Jane Doe"));
        assert!(!NameStrategy::is_valid_name("Jane"));
        assert!(!NameStrategy::is_valid_name("One Two Three Four Five"));
    }
}
