//! Sequential pipeline executor.
//!
//! Runs the stages of a plan in order, tasks within a stage in order, one
//! at a time.

use super::metrics::{PipelineMetrics, StageMetrics, TaskMetrics, TaskOutcome, elapsed_ms};
use super::stage::Stage;
use super::task::{BoxedTask, Criticality};
use crate::errors::BootError;
use std::time::Instant;

pub struct ExecutionPlan<Ctx> {
    stages: Vec<Stage<BoxedTask<Ctx>>>,
}

impl<Ctx> ExecutionPlan<Ctx> {
    pub fn new(stages: Vec<Stage<BoxedTask<Ctx>>>) -> Self {
        Self { stages }
    }

    pub fn stages(self) -> Vec<Stage<BoxedTask<Ctx>>> {
        self.stages
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name).collect()
    }
}

/// The fatal failure that stopped a pipeline.
#[derive(Debug)]
pub struct PipelineFailure {
    pub stage: &'static str,
    pub task: String,
    pub error: BootError,
}

/// Result of executing a plan.
#[derive(Debug)]
pub struct PipelineRun {
    pub metrics: PipelineMetrics,
    /// `None` when every stage completed.
    pub failure: Option<PipelineFailure>,
}

impl PipelineRun {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Pipeline executor framework.
///
/// This provides the generic infrastructure for executing a table-driven pipeline.
/// The actual task execution logic is provided by task implementations.
pub struct PipelineExecutor;

impl PipelineExecutor {
    /// Execute a plan against a shared context.
    ///
    /// Stops at the first failing `Fatal` task. Failing `BestEffort` tasks
    /// are logged as warnings and never stop execution.
    pub fn execute<Ctx>(plan: ExecutionPlan<Ctx>, ctx: &mut Ctx) -> PipelineRun {
        let total_start = Instant::now();
        let mut stage_metrics = Vec::new();
        let mut failure = None;

        for (index, stage) in plan.stages().into_iter().enumerate() {
            let stage_start = Instant::now();
            let mut task_metrics = Vec::with_capacity(stage.tasks.len());

            tracing::info!(stage = stage.name, "Stage started");

            for task in stage.tasks {
                let name = task.name().to_string();
                let criticality = task.criticality();
                if let Some(reason) = task.skip_reason() {
                    tracing::warn!(stage = stage.name, task = %name, "Skipped: {}", reason);
                    task_metrics.push(TaskMetrics {
                        name,
                        criticality,
                        outcome: TaskOutcome::Skipped(reason),
                        duration_ms: 0,
                    });
                    continue;
                }

                let task_start = Instant::now();
                let outcome = match task.run(ctx) {
                    Ok(()) => TaskOutcome::Completed,
                    Err(e) if criticality == Criticality::BestEffort => {
                        tracing::warn!(stage = stage.name, task = %name, "Warning: {}", e);
                        TaskOutcome::Warned(e.to_string())
                    }
                    Err(e) => {
                        tracing::error!(stage = stage.name, task = %name, "Error: {}", e);
                        let outcome = TaskOutcome::Failed(e.to_string());
                        failure = Some(PipelineFailure {
                            stage: stage.name,
                            task: name.clone(),
                            error: e,
                        });
                        outcome
                    }
                };

                task_metrics.push(TaskMetrics {
                    name,
                    criticality,
                    outcome,
                    duration_ms: elapsed_ms(task_start),
                });

                if failure.is_some() {
                    break;
                }
            }

            stage_metrics.push(StageMetrics {
                index,
                name: stage.name,
                completed: failure.is_none(),
                duration_ms: elapsed_ms(stage_start),
                tasks: task_metrics,
            });

            if failure.is_some() {
                break;
            }
        }

        PipelineRun {
            metrics: PipelineMetrics {
                total_duration_ms: elapsed_ms(total_start),
                stages: stage_metrics,
            },
            failure,
        }
    }
}
