//! Field Extraction Strategies — one pluggable unit per resume field.
//!
//! Two strategy families share the `FieldStrategy` trait: pattern-based
//! (name, email — deterministic, pure, never suspend) and delegated
//! (phone, skills, education, experience — forward an instruction plus the
//! document text to the LLM client and validate the response shape).
//!
//! The registry is built once at startup and read-only afterwards; the only
//! per-strategy state is a compiled pattern.

pub mod coordinator;
pub mod delegated;
pub mod email;
pub mod handlers;
pub mod name;
pub mod prompts;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::llm_client::LlmClient;
use crate::models::resume::{Education, WorkExperience};

/// The fields the pipeline extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Email,
    Phone,
    Skills,
    Education,
    Experience,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Skills => "skills",
            FieldKind::Education => "education",
            FieldKind::Experience => "experience",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed extracted value, tagged by field shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Name(String),
    Email(String),
    Phone(String),
    Skills(Vec<String>),
    Education(Vec<Education>),
    Experience(Vec<WorkExperience>),
}

/// Tagged outcome of one strategy's attempt. `Failed` is distinguishable
/// from `NotFound` so observability can tell "the model found nothing"
/// apart from "the call broke".
#[derive(Debug, Clone, PartialEq)]
pub enum FieldResult {
    Found(FieldValue),
    NotFound,
    Failed(String),
}

/// One field's extraction strategy. Implementations must never panic on
/// missing data — no match is `NotFound`, a broken call is `Failed`.
#[async_trait]
pub trait FieldStrategy: Send + Sync {
    fn field(&self) -> FieldKind;

    async fn extract(&self, text: &str) -> FieldResult;
}

/// Static table of strategies, built once at process start from
/// configuration and never mutated during request handling.
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn FieldStrategy>>,
}

impl StrategyRegistry {
    /// The standard lineup: pattern-based name and email, delegated
    /// phone, skills, education, and experience.
    pub fn standard(llm: LlmClient) -> Self {
        use delegated::{DelegatedField, DelegatedStrategy};

        Self::new(vec![
            Arc::new(name::NameStrategy::new()),
            Arc::new(email::EmailStrategy::new()),
            Arc::new(DelegatedStrategy::new(DelegatedField::Phone, llm.clone())),
            Arc::new(DelegatedStrategy::new(DelegatedField::Skills, llm.clone())),
            Arc::new(DelegatedStrategy::new(DelegatedField::Education, llm.clone())),
            Arc::new(DelegatedStrategy::new(DelegatedField::Experience, llm)),
        ])
    }

    pub fn new(strategies: Vec<Arc<dyn FieldStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[Arc<dyn FieldStrategy>] {
        &self.strategies
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
