use std::time::Instant;

use crate::pipeline::Criticality;

/// Milliseconds since `start`, saturating at `u64::MAX`.
pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// How a task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    /// Best-effort task failed; execution continued.
    Warned(String),
    /// Fatal task failed; execution stopped.
    Failed(String),
    /// Task was not run.
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct TaskMetrics {
    pub name: String,
    pub criticality: Criticality,
    pub outcome: TaskOutcome,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct StageMetrics {
    pub index: usize,
    pub name: &'static str,
    /// All tasks ran without a fatal failure.
    pub completed: bool,
    pub duration_ms: u64,
    pub tasks: Vec<TaskMetrics>,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    pub total_duration_ms: u64,
    pub stages: Vec<StageMetrics>,
}

impl PipelineMetrics {
    pub fn tasks(&self) -> impl Iterator<Item = &TaskMetrics> {
        self.stages.iter().flat_map(|stage| stage.tasks.iter())
    }

    /// Names of stages that ran to completion, in order.
    pub fn completed_stages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages
            .iter()
            .filter(|stage| stage.completed)
            .map(|stage| stage.name)
    }

    pub fn warning_count(&self) -> usize {
        self.tasks()
            .filter(|task| matches!(task.outcome, TaskOutcome::Warned(_)))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.tasks()
            .filter(|task| matches!(task.outcome, TaskOutcome::Skipped(_)))
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.tasks()
            .filter(|task| matches!(task.outcome, TaskOutcome::Failed(_)))
            .count()
    }

    /// Log per-stage timing.
    pub fn log_summary(&self) {
        for stage in &self.stages {
            tracing::info!(
                stage = stage.name,
                completed = stage.completed,
                tasks = stage.tasks.len(),
                duration_ms = stage.duration_ms,
                "Stage finished"
            );
        }
        tracing::info!(
            total_duration_ms = self.total_duration_ms,
            warnings = self.warning_count(),
            skipped = self.skipped_count(),
            failures = self.failure_count(),
            "Boot stages finished"
        );
    }
}
