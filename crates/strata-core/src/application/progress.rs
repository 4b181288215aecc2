use tracing::{error, info, warn};

use crate::application::pipeline::{StepEvent, StepOutcome};
use crate::application::ports::ProgressSink;

/// Progress sink that logs each step through `tracing`.
///
/// Used when no terminal is attached (library callers, `--quiet`, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn pipeline_started(&self, total_steps: usize) {
        info!(total_steps, "generation started");
    }

    fn step_finished(&self, event: &StepEvent) {
        let step = event.index + 1;
        let elapsed_ms = event.elapsed.as_millis() as u64;
        match &event.outcome {
            StepOutcome::Succeeded => {
                info!(step, total = event.total, label = %event.label, elapsed_ms, "step done");
            }
            StepOutcome::Tolerated(err) => {
                warn!(step, total = event.total, label = %event.label, error = %err, "step skipped");
            }
            StepOutcome::Failed(err) => {
                error!(step, total = event.total, label = %event.label, error = %err, "step failed");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn step_finished(&self, _event: &StepEvent) {}
}
