//! Resume data model — the single structured output of the extraction pipeline.
//!
//! Constructed once by the extraction coordinator from the per-field results
//! and immutable afterwards. List-valued fields are always present: absence
//! is an empty list, never `null` in the serialized output.

use serde::{Deserialize, Serialize};

/// One education entry. All fields optional — partial entries are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_date: Option<String>,
}

/// One work experience entry. `company` and `title` are expected to be set
/// when an entry exists at all; the rest may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

/// Structured resume data assembled from all field strategies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<WorkExperience>,
}

/// Strips separators from a phone number, keeping digits and a leading `+`.
/// Returns `None` when fewer than 10 digits remain — too short to be a
/// dialable number.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
    let digit_count = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
    if digit_count < 10 {
        return None;
    }
    Some(cleaned)
}

/// Trims, drops empties, and deduplicates skills case-insensitively while
/// preserving first-seen order and original casing.
pub fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();
    for skill in skills {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            unique.push(trimmed.to_string());
        }
    }
    unique
}
