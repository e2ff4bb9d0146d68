//! Delegated strategies — fields extracted by the LLM.
//!
//! One struct covers the four delegated fields; `DelegatedField` supplies
//! the instruction and the expected response shape. The flow per call:
//! build instruction → `LlmClient::call_json` (which retries transient
//! failures only, with exponential backoff, and validates the response
//! against the typed shape) → map the typed value into a `FieldResult`.
//!
//! A response that cannot be parsed into the expected shape is
//! `Failed(reason)` — never retried, never replaced with a fabricated value.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::prompts;
use super::{FieldKind, FieldResult, FieldStrategy, FieldValue};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::resume::{Education, WorkExperience};

/// The fields whose extraction is delegated to the external model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegatedField {
    Phone,
    Skills,
    Education,
    Experience,
}

#[derive(Debug, Deserialize)]
pub struct PhoneResponse {
    phone: Option<String>,
}

impl DelegatedField {
    pub fn kind(&self) -> FieldKind {
        match self {
            DelegatedField::Phone => FieldKind::Phone,
            DelegatedField::Skills => FieldKind::Skills,
            DelegatedField::Education => FieldKind::Education,
            DelegatedField::Experience => FieldKind::Experience,
        }
    }

    fn prompt(&self, text: &str) -> String {
        match self {
            DelegatedField::Phone => prompts::phone_prompt(text),
            DelegatedField::Skills => prompts::skills_prompt(text),
            DelegatedField::Education => prompts::education_prompt(text),
            DelegatedField::Experience => prompts::experience_prompt(text),
        }
    }
}

pub struct DelegatedStrategy {
    field: DelegatedField,
    llm: LlmClient,
}

impl DelegatedStrategy {
    pub fn new(field: DelegatedField, llm: LlmClient) -> Self {
        Self { field, llm }
    }
}

#[async_trait]
impl FieldStrategy for DelegatedStrategy {
    fn field(&self) -> FieldKind {
        self.field.kind()
    }

    async fn extract(&self, text: &str) -> FieldResult {
        if text.trim().is_empty() {
            return FieldResult::Failed("empty input".to_string());
        }

        let prompt = self.field.prompt(text);
        debug!(
            "Delegated extraction for '{}', prompt {} chars",
            self.field.kind(),
            prompt.len()
        );

        match self.field {
            DelegatedField::Phone => {
                phone_result(self.llm.call_json::<PhoneResponse>(&prompt, JSON_ONLY_SYSTEM).await)
            }
            DelegatedField::Skills => list_result(
                self.llm.call_json::<Vec<String>>(&prompt, JSON_ONLY_SYSTEM).await,
                FieldValue::Skills,
            ),
            DelegatedField::Education => list_result(
                self.llm.call_json::<Vec<Education>>(&prompt, JSON_ONLY_SYSTEM).await,
                FieldValue::Education,
            ),
            DelegatedField::Experience => list_result(
                self.llm.call_json::<Vec<WorkExperience>>(&prompt, JSON_ONLY_SYSTEM).await,
                FieldValue::Experience,
            ),
        }
    }
}

/// A well-formed "nothing here" (`null` or blank phone) is `NotFound`.
fn phone_result(response: Result<PhoneResponse, LlmError>) -> FieldResult {
    match response {
        Ok(PhoneResponse { phone: Some(p) }) if !p.trim().is_empty() => {
            FieldResult::Found(FieldValue::Phone(p))
        }
        Ok(_) => FieldResult::NotFound,
        Err(e) => failure(e),
    }
}

/// A well-formed empty array is `NotFound` — the model affirmatively
/// reported absence.
fn list_result<T>(
    response: Result<Vec<T>, LlmError>,
    wrap: impl FnOnce(Vec<T>) -> FieldValue,
) -> FieldResult {
    match response {
        Ok(items) if items.is_empty() => FieldResult::NotFound,
        Ok(items) => FieldResult::Found(wrap(items)),
        Err(e) => failure(e),
    }
}

/// Transient retries are already exhausted inside the client by the time an
/// error reaches here; the classification only shapes the recorded reason.
fn failure(e: LlmError) -> FieldResult {
    if e.is_transient() {
        FieldResult::Failed(format!("LLM call failed after retries: {e}"))
    } else {
        FieldResult::Failed(format!("unusable LLM response: {e}"))
    }
}
