//! Task trait for pipeline execution.

use crate::errors::BootResult;

/// Whether a task's failure stops the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Failure stops the pipeline; nothing after this task runs.
    Fatal,
    /// Failure is logged and recorded, then execution continues.
    BestEffort,
}

/// Trait for tasks that can be executed in a pipeline.
///
/// A task is consumed by running it. Tasks get exclusive access to the
/// shared context for the duration of `run`.
pub trait PipelineTask<Ctx> {
    /// Execute the task with the shared pipeline context.
    fn run(self: Box<Self>, ctx: &mut Ctx) -> BootResult<()>;

    /// Get human-readable task name for logging.
    fn name(&self) -> &str;

    /// Every task states whether its failure stops the pipeline.
    fn criticality(&self) -> Criticality;

    /// Reason to record this task as skipped instead of running it.
    fn skip_reason(&self) -> Option<String> {
        None
    }
}

pub type BoxedTask<Ctx> = Box<dyn PipelineTask<Ctx>>;
