//! Extraction Coordinator — fans all strategies out over one document's
//! text and assembles the final `ResumeData`.
//!
//! Failure isolation is the load-bearing property here: every strategy runs
//! in its own task, so a failed, panicked, or timed-out strategy only costs
//! its own field. Two clocks bound the fan-out — a per-strategy timeout and
//! an aggregate budget; when the budget expires, still-pending strategies
//! are aborted and reported as failed, and the partial result is returned.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{info, warn};

use super::{FieldKind, FieldResult, FieldValue, StrategyRegistry};
use crate::models::resume::{dedup_skills, normalize_phone, ResumeData};

/// A field whose strategy failed, kept separate from the returned data
/// shape — callers see absence, logs see the reason.
#[derive(Debug, Clone)]
pub struct FieldFailure {
    pub field: FieldKind,
    pub reason: String,
}

/// The coordinator's output: the assembled data plus which fields failed.
#[derive(Debug)]
pub struct ExtractionReport {
    pub data: ResumeData,
    pub failures: Vec<FieldFailure>,
}

/// Runs every registered strategy against the same text.
///
/// Strategies only share the immutable text; none observes another's
/// output, and completion order never affects the assembled result.
pub async fn extract_fields(
    registry: &StrategyRegistry,
    text: Arc<str>,
    per_strategy_timeout: Duration,
    aggregate_budget: Duration,
) -> ExtractionReport {
    if text.trim().is_empty() {
        warn!("Empty text provided for extraction");
        return ExtractionReport {
            data: ResumeData::default(),
            failures: Vec::new(),
        };
    }

    if registry.is_empty() {
        warn!("No strategies registered");
        return ExtractionReport {
            data: ResumeData::default(),
            failures: Vec::new(),
        };
    }

    info!(
        "Starting field extraction: {} strategies, text length {}",
        registry.len(),
        text.len()
    );

    let mut tasks: JoinSet<(FieldKind, FieldResult)> = JoinSet::new();
    let mut pending: HashMap<tokio::task::Id, FieldKind> = HashMap::new();

    for strategy in registry.strategies() {
        let strategy = Arc::clone(strategy);
        let text = Arc::clone(&text);
        let field = strategy.field();
        let handle = tasks.spawn(async move {
            let result = match timeout(per_strategy_timeout, strategy.extract(&text)).await {
                Ok(result) => result,
                Err(_) => FieldResult::Failed("strategy timeout".to_string()),
            };
            (field, result)
        });
        pending.insert(handle.id(), field);
    }

    let deadline = Instant::now() + aggregate_budget;
    let mut outcomes: Vec<(FieldKind, FieldResult)> = Vec::with_capacity(pending.len());

    while !tasks.is_empty() {
        match timeout_at(deadline, tasks.join_next_with_id()).await {
            Ok(Some(Ok((id, outcome)))) => {
                pending.remove(&id);
                outcomes.push(outcome);
            }
            Ok(Some(Err(join_err))) => {
                // A panicked strategy task; its siblings keep running.
                if let Some(field) = pending.remove(&join_err.id()) {
                    warn!("Strategy task for '{field}' faulted: {join_err}");
                    outcomes.push((field, FieldResult::Failed(format!("strategy fault: {join_err}"))));
                }
            }
            Ok(None) => break,
            Err(_) => {
                tasks.abort_all();
                for field in pending.drain().map(|(_, field)| field) {
                    outcomes.push((field, FieldResult::Failed("coordinator timeout".to_string())));
                }
                break;
            }
        }
    }

    let report = assemble(outcomes);

    info!(
        "Field extraction completed: {} of {} fields failed",
        report.failures.len(),
        registry.len()
    );

    report
}

/// Maps the collected outcomes into `ResumeData`: `Found` fills the field,
/// `NotFound` and `Failed` leave its empty representation.
fn assemble(outcomes: Vec<(FieldKind, FieldResult)>) -> ExtractionReport {
    let mut data = ResumeData::default();
    let mut failures = Vec::new();

    for (field, result) in outcomes {
        match result {
            FieldResult::Found(value) => apply_value(&mut data, value),
            FieldResult::NotFound => {}
            FieldResult::Failed(reason) => failures.push(FieldFailure { field, reason }),
        }
    }

    ExtractionReport { data, failures }
}

fn apply_value(data: &mut ResumeData, value: FieldValue) {
    match value {
        FieldValue::Name(name) => data.name = Some(name),
        FieldValue::Email(email) => data.email = Some(email),
        FieldValue::Phone(phone) => data.phone = normalize_phone(&phone),
        FieldValue::Skills(skills) => data.skills = dedup_skills(skills),
        FieldValue::Education(entries) => data.education = entries,
        FieldValue::Experience(entries) => data.experience = entries,
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::extraction::email::EmailStrategy;
    use crate::extraction::name::NameStrategy;
    use crate::extraction::FieldStrategy;

    /// Scriptable strategy for exercising the coordinator's isolation.
    struct StubStrategy {
        field: FieldKind,
        behavior: StubBehavior,
    }

    enum StubBehavior {
        Return(FieldResult),
        Panic,
        SleepThenReturn(Duration, FieldResult),
    }

    #[async_trait]
    impl FieldStrategy for StubStrategy {
        fn field(&self) -> FieldKind {
            self.field
        }

        async fn extract(&self, _text: &str) -> FieldResult {
            match &self.behavior {
                StubBehavior::Return(result) => result.clone(),
                StubBehavior::Panic => panic!("stub strategy blew up"),
                StubBehavior::SleepThenReturn(delay, result) => {
                    tokio::time::sleep(*delay).await;
                    result.clone()
                }
            }
        }
    }

    fn stub(field: FieldKind, behavior: StubBehavior) -> Arc<dyn FieldStrategy> {
        Arc::new(StubStrategy { field, behavior })
    }

    fn found_skills(skills: &[&str]) -> FieldResult {
        FieldResult::Found(FieldValue::Skills(
            skills.iter().map(|s| s.to_string()).collect(),
        ))
    }

    const SCENARIO_TEXT: &str = "Jane Doe\nEmail: jane.doe@corp.com\nPhone: 555-0100\nSkills: Python, SQL";

    #[tokio::test]
    async fn test_end_to_end_scenario_with_pattern_and_stubbed_strategies() {
        let registry = StrategyRegistry::new(vec![
            Arc::new(NameStrategy::new()),
            Arc::new(EmailStrategy::new()),
            stub(FieldKind::Skills, StubBehavior::Return(found_skills(&["Python", "SQL"]))),
        ]);

        let report = extract_fields(
            &registry,
            Arc::from(SCENARIO_TEXT),
            Duration::from_secs(5),
            Duration::from_secs(10),
        )
        .await;

        assert_eq!(report.data.name.as_deref(), Some("Jane Doe"));
        assert_eq!(report.data.email.as_deref(), Some("jane.doe@corp.com"));
        assert_eq!(report.data.skills, vec!["Python", "SQL"]);
        assert!(report.data.education.is_empty());
        assert!(report.data.experience.is_empty());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_one_faulted_strategy_does_not_abort_the_others() {
        let registry = StrategyRegistry::new(vec![
            Arc::new(NameStrategy::new()),
            Arc::new(EmailStrategy::new()),
            stub(FieldKind::Skills, StubBehavior::Panic),
        ]);

        let report = extract_fields(
            &registry,
            Arc::from(SCENARIO_TEXT),
            Duration::from_secs(5),
            Duration::from_secs(10),
        )
        .await;

        // The two healthy fields survive; only the faulted one is reported.
        assert_eq!(report.data.name.as_deref(), Some("Jane Doe"));
        assert_eq!(report.data.email.as_deref(), Some("jane.doe@corp.com"));
        assert!(report.data.skills.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].field, FieldKind::Skills);
    }

    #[tokio::test]
    async fn test_failed_result_is_recorded_not_raised() {
        let registry = StrategyRegistry::new(vec![
            Arc::new(EmailStrategy::new()),
            stub(
                FieldKind::Phone,
                StubBehavior::Return(FieldResult::Failed("LLM call failed: 503".to_string())),
            ),
        ]);

        let report = extract_fields(
            &registry,
            Arc::from(SCENARIO_TEXT),
            Duration::from_secs(5),
            Duration::from_secs(10),
        )
        .await;

        assert_eq!(report.data.email.as_deref(), Some("jane.doe@corp.com"));
        assert_eq!(report.data.phone, None);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].field, FieldKind::Phone);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_strategy_hits_its_own_timeout() {
        let registry = StrategyRegistry::new(vec![
            stub(FieldKind::Email, StubBehavior::Return(FieldResult::NotFound)),
            stub(
                FieldKind::Skills,
                StubBehavior::SleepThenReturn(Duration::from_secs(60), found_skills(&["late"])),
            ),
        ]);

        let report = extract_fields(
            &registry,
            Arc::from("some resume text"),
            Duration::from_secs(10),
            Duration::from_secs(20),
        )
        .await;

        assert!(report.data.skills.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reason, "strategy timeout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_aggregate_budget_converts_pending_strategies_to_failed() {
        let registry = StrategyRegistry::new(vec![
            stub(FieldKind::Email, StubBehavior::Return(FieldResult::NotFound)),
            stub(
                FieldKind::Experience,
                StubBehavior::SleepThenReturn(Duration::from_secs(30), FieldResult::NotFound),
            ),
        ]);

        // Per-strategy limit is generous; only the aggregate budget fires.
        let report = extract_fields(
            &registry,
            Arc::from("some resume text"),
            Duration::from_secs(60),
            Duration::from_secs(20),
        )
        .await;

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].field, FieldKind::Experience);
        assert_eq!(report.failures[0].reason, "coordinator timeout");
    }

    #[tokio::test]
    async fn test_empty_registry_yields_default() {
        let registry = StrategyRegistry::new(Vec::new());
        let report = extract_fields(
            &registry,
            Arc::from("some resume text"),
            Duration::from_secs(5),
            Duration::from_secs(10),
        )
        .await;
        assert_eq!(report.data, ResumeData::default());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_short_circuits_to_default() {
        let registry = StrategyRegistry::new(vec![stub(
            FieldKind::Skills,
            StubBehavior::Return(found_skills(&["never ran"])),
        )]);

        let report = extract_fields(
            &registry,
            Arc::from("   \n  "),
            Duration::from_secs(5),
            Duration::from_secs(10),
        )
        .await;

        assert_eq!(report.data, ResumeData::default());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_deterministic_strategies_are_idempotent() {
        let registry = StrategyRegistry::new(vec![
            Arc::new(NameStrategy::new()),
            Arc::new(EmailStrategy::new()),
        ]);

        let first = extract_fields(
            &registry,
            Arc::from(SCENARIO_TEXT),
            Duration::from_secs(5),
            Duration::from_secs(10),
        )
        .await;
        let second = extract_fields(
            &registry,
            Arc::from(SCENARIO_TEXT),
            Duration::from_secs(5),
            Duration::from_secs(10),
        )
        .await;

        assert_eq!(first.data, second.data);
    }

    #[tokio::test]
    async fn test_phone_and_skills_are_normalized_on_assembly() {
        let registry = StrategyRegistry::new(vec![
            stub(
                FieldKind::Phone,
                StubBehavior::Return(FieldResult::Found(FieldValue::Phone(
                    "+1 (555) 123-4567".to_string(),
                ))),
            ),
            stub(
                FieldKind::Skills,
                StubBehavior::Return(found_skills(&["Python", "python", "SQL"])),
            ),
        ]);

        let report = extract_fields(
            &registry,
            Arc::from("some resume text"),
            Duration::from_secs(5),
            Duration::from_secs(10),
        )
        .await;

        assert_eq!(report.data.phone.as_deref(), Some("+15551234567"));
        assert_eq!(report.data.skills, vec!["Python", "SQL"]);
    }
}
