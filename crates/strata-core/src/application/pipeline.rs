//! Ordered, fail-fast step runner.
//!
//! ```text
//! Idle ──run──▶ Running(0) ──ok──▶ Running(1) ── … ──▶ Completed
//!                   │                  │
//!                   └──err──▶ Failed { index, label }
//! ```
//!
//! Steps run strictly in declaration order on the calling thread. The first
//! aborting failure stops the run; files already written by earlier steps
//! stay on disk.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, instrument, trace};

use crate::application::ApplicationError;
use crate::application::ports::ProgressSink;
use crate::error::{ErrorCategory, StrataError, StrataResult};

pub type StepAction<'a> = Box<dyn FnOnce() -> StrataResult<()> + 'a>;

/// What a failing step does to the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the pipeline.
    #[default]
    Abort,
    /// Record template errors and continue. Any other error still aborts.
    Tolerate,
}

/// One labelled unit of work.
pub struct Step<'a> {
    label: String,
    policy: FailurePolicy,
    action: StepAction<'a>,
}

impl<'a> Step<'a> {
    pub fn new(label: impl Into<String>, action: impl FnOnce() -> StrataResult<()> + 'a) -> Self {
        Self {
            label: label.into(),
            policy: FailurePolicy::Abort,
            action: Box::new(action),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl fmt::Debug for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("label", &self.label)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running(usize),
    Completed,
    Failed { index: usize, label: String },
}

impl PipelineState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed { .. })
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum StepOutcome {
    Succeeded,
    Tolerated(StrataError),
    Failed(StrataError),
}

/// Emitted exactly once per executed step.
#[derive(Debug, Clone)]
pub struct StepEvent {
    /// Zero-based position in the pipeline.
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub outcome: StepOutcome,
    pub elapsed: Duration,
}

impl StepEvent {
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, StepOutcome::Failed(_))
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Summary of a run that reached `Completed`.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    completed: Vec<String>,
    tolerated: Vec<(String, StrataError)>,
    elapsed: Duration,
}

impl PipelineReport {
    /// Labels of every executed step, in order.
    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    /// Steps whose template errors were tolerated.
    pub fn tolerated(&self) -> &[(String, StrataError)] {
        &self.tolerated
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// A run that reached `Failed`.
#[derive(Debug, Clone)]
pub struct PipelineFailure {
    pub index: usize,
    pub label: String,
    pub error: StrataError,
    /// Labels of steps that finished before the failure.
    pub completed: Vec<String>,
}

impl PipelineFailure {
    pub fn state(&self) -> PipelineState {
        PipelineState::Failed {
            index: self.index,
            label: self.label.clone(),
        }
    }
}

impl From<PipelineFailure> for StrataError {
    fn from(failure: PipelineFailure) -> Self {
        ApplicationError::StepFailed {
            step: failure.label,
            source: Box::new(failure.error),
        }
        .into()
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Pipeline<'a> {
    steps: Vec<Step<'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn step(mut self, step: Step<'a>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn push(&mut self, step: Step<'a>) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, reporting each to `sink`.
    #[instrument(skip_all, fields(steps = self.steps.len()))]
    pub fn run(self, sink: &dyn ProgressSink) -> Result<PipelineReport, PipelineFailure> {
        let total = self.steps.len();
        let started = Instant::now();
        let mut state = PipelineState::Idle;
        let mut completed = Vec::with_capacity(total);
        let mut tolerated = Vec::new();

        sink.pipeline_started(total);

        for (index, step) in self.steps.into_iter().enumerate() {
            state = transition(state, PipelineState::Running(index));

            let Step {
                label,
                policy,
                action,
            } = step;
            let step_started = Instant::now();
            let result = action();
            let elapsed = step_started.elapsed();

            let outcome = match result {
                Ok(()) => StepOutcome::Succeeded,
                Err(error) if tolerates(policy, &error) => {
                    debug!(step = %label, %error, "tolerated step error");
                    tolerated.push((label.clone(), error.clone()));
                    StepOutcome::Tolerated(error)
                }
                Err(error) => StepOutcome::Failed(error),
            };

            sink.step_finished(&StepEvent {
                index,
                total,
                label: label.clone(),
                outcome: outcome.clone(),
                elapsed,
            });

            if let StepOutcome::Failed(error) = outcome {
                transition(
                    state,
                    PipelineState::Failed {
                        index,
                        label: label.clone(),
                    },
                );
                return Err(PipelineFailure {
                    index,
                    label,
                    error,
                    completed,
                });
            }

            completed.push(label);
        }

        transition(state, PipelineState::Completed);

        Ok(PipelineReport {
            completed,
            tolerated,
            elapsed: started.elapsed(),
        })
    }
}

fn tolerates(policy: FailurePolicy, error: &StrataError) -> bool {
    policy == FailurePolicy::Tolerate && error.root_cause().category() == ErrorCategory::Template
}

fn transition(from: PipelineState, to: PipelineState) -> PipelineState {
    debug_assert!(
        matches!(
            (&from, &to),
            (PipelineState::Idle, PipelineState::Running(0))
                | (PipelineState::Idle, PipelineState::Completed)
                | (PipelineState::Running(_), PipelineState::Completed)
                | (PipelineState::Running(_), PipelineState::Failed { .. })
        ) || matches!((&from, &to), (PipelineState::Running(i), PipelineState::Running(j)) if j == &(i + 1)),
        "illegal pipeline transition {from:?} -> {to:?}"
    );
    trace!(?from, ?to, "pipeline state");
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockProgressSink;
    use crate::domain::DomainError;
    use mockall::Sequence;
    use std::cell::RefCell;
    use std::path::PathBuf;

    fn io_error() -> StrataError {
        ApplicationError::FilesystemError {
            path: PathBuf::from("/x"),
            reason: "denied".into(),
        }
        .into()
    }

    fn template_error() -> StrataError {
        DomainError::UnboundVariable { name: "x".into() }.into()
    }

    fn quiet_sink() -> MockProgressSink {
        let mut sink = MockProgressSink::new();
        sink.expect_pipeline_started().return_const(());
        sink.expect_step_finished().return_const(());
        sink
    }

    #[test]
    fn runs_steps_in_declaration_order() {
        let log = RefCell::new(Vec::new());
        let pipeline = Pipeline::new()
            .step(Step::new("one", || {
                log.borrow_mut().push(1);
                Ok(())
            }))
            .step(Step::new("two", || {
                log.borrow_mut().push(2);
                Ok(())
            }))
            .step(Step::new("three", || {
                log.borrow_mut().push(3);
                Ok(())
            }));

        let report = pipeline.run(&quiet_sink()).unwrap();

        assert_eq!(*log.borrow(), vec![1, 2, 3]);
        assert_eq!(report.completed(), ["one", "two", "three"]);
        assert!(report.tolerated().is_empty());
    }

    #[test]
    fn first_failure_stops_the_run() {
        let ran_after = RefCell::new(false);
        let pipeline = Pipeline::new()
            .step(Step::new("ok", || Ok(())))
            .step(Step::new("boom", || Err(io_error())))
            .step(Step::new("never", || {
                *ran_after.borrow_mut() = true;
                Ok(())
            }));

        let failure = pipeline.run(&quiet_sink()).unwrap_err();

        assert!(!*ran_after.borrow());
        assert_eq!(failure.index, 1);
        assert_eq!(failure.label, "boom");
        assert_eq!(failure.completed, vec!["ok".to_string()]);
        assert_eq!(
            failure.state(),
            PipelineState::Failed {
                index: 1,
                label: "boom".into()
            }
        );
    }

    #[test]
    fn failure_converts_to_step_failed_error() {
        let failure = Pipeline::new()
            .step(Step::new("Create Makefile", || Err(template_error())))
            .run(&quiet_sink())
            .unwrap_err();

        let err: StrataError = failure.into();
        assert_eq!(err.failed_step(), Some("Create Makefile"));
        assert_eq!(err.category(), ErrorCategory::Template);
        assert!(err.to_string().starts_with("Create Makefile failed:"));
    }

    #[test]
    fn tolerant_step_skips_template_errors_only() {
        let report = Pipeline::new()
            .step(Step::new("optional", || Err(template_error())).with_policy(FailurePolicy::Tolerate))
            .step(Step::new("after", || Ok(())))
            .run(&quiet_sink())
            .unwrap();
        assert_eq!(report.completed(), ["optional", "after"]);
        assert_eq!(report.tolerated().len(), 1);

        let failure = Pipeline::new()
            .step(Step::new("disk", || Err(io_error())).with_policy(FailurePolicy::Tolerate))
            .run(&quiet_sink())
            .unwrap_err();
        assert_eq!(failure.label, "disk");
    }

    #[test]
    fn emits_one_event_per_executed_step_in_order() {
        let mut sink = MockProgressSink::new();
        let mut seq = Sequence::new();

        sink.expect_pipeline_started()
            .withf(|total| *total == 3)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_step_finished()
            .withf(|e| e.index == 0 && e.label == "a" && e.is_success())
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_step_finished()
            .withf(|e| e.index == 1 && e.label == "b" && matches!(e.outcome, StepOutcome::Failed(_)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let result = Pipeline::new()
            .step(Step::new("a", || Ok(())))
            .step(Step::new("b", || Err(io_error())))
            .step(Step::new("c", || Ok(())))
            .run(&sink);

        assert!(result.is_err());
    }

    #[test]
    fn empty_pipeline_completes() {
        let report = Pipeline::new().run(&quiet_sink()).unwrap();
        assert!(report.completed().is_empty());
    }
}
