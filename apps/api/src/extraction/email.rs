//! Email strategy — deterministic pattern matching.
//!
//! Ambiguity contract: when the text contains several addresses, the first
//! occurrence in document order wins. No "best match" heuristics.

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::{FieldKind, FieldResult, FieldStrategy, FieldValue};

/// RFC 5322-ish address shape, simplified. The regex engine is linear-time,
/// so the pattern cannot backtrack catastrophically.
const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

pub struct EmailStrategy {
    pattern: Regex,
}

impl EmailStrategy {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
        }
    }

    /// Length bounds and a single `@` — cheap checks the pattern alone
    /// cannot express.
    fn is_valid_email(email: &str) -> bool {
        (6..=254).contains(&email.len()) && email.matches('@').count() == 1
    }
}

impl Default for EmailStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FieldStrategy for EmailStrategy {
    fn field(&self) -> FieldKind {
        FieldKind::Email
    }

    async fn extract(&self, text: &str) -> FieldResult {
        if text.trim().is_empty() {
            return FieldResult::NotFound;
        }

        for m in self.pattern.find_iter(text) {
            let candidate = m.as_str();
            if Self::is_valid_email(candidate) {
                debug!("Email extracted: {candidate}");
                return FieldResult::Found(FieldValue::Email(candidate.to_lowercase()));
            }
        }

        FieldResult::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(text: &str) -> FieldResult {
        EmailStrategy::new().extract(text).await
    }

    #[tokio::test]
    async fn test_no_email_returns_not_found() {
        assert_eq!(extract("no contact details here").await, FieldResult::NotFound);
    }

    #[tokio::test]
    async fn test_empty_text_returns_not_found() {
        assert_eq!(extract("").await, FieldResult::NotFound);
        assert_eq!(extract("   \n\t ").await, FieldResult::NotFound);
    }

    #[tokio::test]
    async fn test_single_email_is_found_lowercased() {
        let result = extract("Contact: Jane.Doe@Corp.COM").await;
        assert_eq!(
            result,
            FieldResult::Found(FieldValue::Email("jane.doe@corp.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_first_email_in_document_order_wins() {
        let result = extract("a@x.com is primary, b@y.com is secondary").await;
        assert_eq!(result, FieldResult::Found(FieldValue::Email("a@x.com".to_string())));
    }

    #[tokio::test]
    async fn test_deterministic_on_identical_input() {
        let text = "reach me at jane.doe@corp.com or at work";
        let first = extract(text).await;
        let second = extract(text).await;
        assert_eq!(first, second);
    }
}
