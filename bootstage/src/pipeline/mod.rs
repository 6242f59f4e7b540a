//! Table-driven sequential pipeline execution.
//!
//! ## Architecture
//!
//! ```text
//! ExecutionPlan → Stages → Tasks
//!
//! - ExecutionPlan: ordered list of stages, run exactly once
//! - Stage: named group of tasks, run one after another
//! - Task: atomic unit of work with a criticality
//! ```
//!
//! A failing `Fatal` task stops the plan: no later task or stage runs.
//! A failing `BestEffort` task is logged and recorded, and execution
//! continues with the next task. A task that reports a skip reason is
//! recorded as skipped without running.
//!
//! ## Example
//!
//! ```ignore
//! use pipeline::{ExecutionPlan, PipelineExecutor, Stage};
//!
//! let plan = ExecutionPlan::new(vec![
//!     Stage::sequential("first", vec![Box::new(TaskA)]),
//!     Stage::sequential("second", vec![Box::new(TaskB), Box::new(TaskC)]),
//! ]);
//!
//! let run = PipelineExecutor::execute(plan, &mut ctx);
//! println!("pipeline took {}ms", run.metrics.total_duration_ms);
//! ```

mod metrics;
#[allow(clippy::module_inception)]
mod pipeline;
mod stage;
mod task;

pub use metrics::{PipelineMetrics, StageMetrics, TaskMetrics, TaskOutcome};
pub use pipeline::{ExecutionPlan, PipelineExecutor, PipelineFailure, PipelineRun};
pub use stage::Stage;
pub use task::{BoxedTask, Criticality, PipelineTask};
