//! Boot-stage sequencing.
//!
//! ## Architecture
//!
//! The boot runs one fixed, table-driven plan:
//!
//! ```text
//!   1. pseudo_filesystems   mount /proc, mount /sys          (fatal)
//!   2. drivers              load each module                 (best-effort)
//!                           resident module snapshot         (best-effort)
//!   3. device_nodes         mount /dev, scan devices         (fatal)
//!                           /dev listing                     (best-effort)
//!   4. hand-off             exec the next-stage controller
//! ```
//!
//! A fatal failure in stage 1 or 3 replaces the process with the fallback
//! shell instead. If the controller cannot be executed, the shell is tried
//! as a last resort. If the shell cannot be executed either, the boot is
//! halted and the caller must park the process.

pub mod drivers;
mod tasks;
mod types;

pub use types::{
    BootContext, BootReport, BootState, STAGE_DEVICES, STAGE_DRIVERS, STAGE_FILESYSTEMS,
};

use crate::config::BootConfig;
use crate::environment::ProcessEnvironment;
use crate::errors::BootError;
use crate::pipeline::{BoxedTask, ExecutionPlan, PipelineExecutor, PipelineFailure, Stage};
use crate::platform::{MountRequest, Platform, ProcessImage};

use tasks::{
    DeviceListingTask, DeviceScanTask, InitCtx, ModuleLoadTask, MountTask, ResidentModulesTask,
};

// ============================================================================
// EXECUTION PLAN
// ============================================================================

/// Build the boot plan. Every listed module gets exactly one task: a load
/// attempt, or a recorded skip when it repeats an earlier name.
pub fn execution_plan<'a>(config: &BootConfig) -> ExecutionPlan<BootContext<'a>> {
    let mut driver_tasks: Vec<BoxedTask<InitCtx<'a>>> = drivers::plan_modules(&config.modules)
        .into_iter()
        .map(|request| Box::new(ModuleLoadTask::from_request(request)) as BoxedTask<InitCtx<'a>>)
        .collect();
    driver_tasks.push(Box::new(ResidentModulesTask));

    let stages: Vec<Stage<BoxedTask<InitCtx<'a>>>> = vec![
        Stage::sequential(
            STAGE_FILESYSTEMS,
            vec![
                Box::new(MountTask::new(MountRequest::PROC)),
                Box::new(MountTask::new(MountRequest::SYSFS)),
            ],
        ),
        Stage::sequential(STAGE_DRIVERS, driver_tasks),
        Stage::sequential(
            STAGE_DEVICES,
            vec![
                Box::new(MountTask::new(MountRequest::DEVTMPFS)),
                Box::new(DeviceScanTask),
                Box::new(DeviceListingTask),
            ],
        ),
    ];

    ExecutionPlan::new(stages)
}

// ============================================================================
// SEQUENCER
// ============================================================================

/// Drives the boot from `Init` to a terminal state.
///
/// # Example
///
/// ```ignore
/// let mut platform = LinuxPlatform::new();
/// let report = Sequencer::new(&mut platform, &env, &config).run();
/// // Only reached if no process replacement happened.
/// util::process::halt();
/// ```
pub struct Sequencer<'a> {
    platform: &'a mut dyn Platform,
    env: &'a ProcessEnvironment,
    config: &'a BootConfig,
    state: BootState,
}

impl<'a> Sequencer<'a> {
    pub fn new(
        platform: &'a mut dyn Platform,
        env: &'a ProcessEnvironment,
        config: &'a BootConfig,
    ) -> Self {
        Self {
            platform,
            env,
            config,
            state: BootState::Init,
        }
    }

    pub fn state(&self) -> BootState {
        self.state
    }

    /// Run the boot sequence once.
    ///
    /// With a real platform this returns only if every process replacement
    /// failed.
    pub fn run(mut self) -> BootReport {
        let plan = execution_plan(self.config);
        let run = {
            let mut ctx = BootContext::new(&mut *self.platform, self.env, self.config);
            PipelineExecutor::execute(plan, &mut ctx)
        };

        for stage in run.metrics.completed_stages() {
            if let Some(next) = BootState::after_stage(stage) {
                self.transition(next);
            }
        }
        let reached = self.state;

        run.metrics.log_summary();

        let mut report = BootReport {
            state: reached,
            reached,
            metrics: run.metrics,
            failure: None,
            handoff_error: None,
            fallback_error: None,
        };

        match run.failure {
            None => {
                if let Err(e) = self.hand_off() {
                    tracing::error!("{}", e);
                    tracing::error!(
                        "No next-stage controller was executed. Dropping to emergency shell."
                    );
                    report.handoff_error = Some(e);
                    report.fallback_error = self.fall_back().err();
                }
            }
            Some(failure) => {
                log_fatal_failure(&failure);
                report.failure = Some(failure);
                report.fallback_error = self.fall_back().err();
            }
        }

        report.state = self.state;
        report
    }

    /// `DevicesPopulated → HandedOff`.
    fn hand_off(&mut self) -> Result<(), BootError> {
        let image = ProcessImage::controller(&self.config.controller);
        tracing::info!(
            controller = %image.path.display(),
            "--- Boot stages complete. Handing over control. ---"
        );

        self.platform
            .exec(&image, self.env)
            .map_err(|e| BootError::HandoffFailed {
                program: image.path.clone(),
                reason: e.to_string(),
            })?;

        self.transition(BootState::HandedOff);
        Ok(())
    }

    /// `* → FallbackShell`, then `Halted` when the shell cannot start.
    fn fall_back(&mut self) -> Result<(), BootError> {
        debug_assert!(self.state.can_fall_back());

        let image = ProcessImage::shell(&self.config.fallback_shell);
        tracing::warn!(shell = %image.path.display(), "Starting emergency shell");
        self.transition(BootState::FallbackShell);

        match self.platform.exec(&image, self.env) {
            Ok(()) => Ok(()),
            Err(e) => {
                let err = BootError::FallbackUnavailable {
                    shell: image.path.clone(),
                    reason: e.to_string(),
                };
                tracing::error!("{}", err);
                self.transition(BootState::Halted);
                Err(err)
            }
        }
    }

    fn transition(&mut self, next: BootState) {
        tracing::debug!(from = %self.state, to = %next, "Boot state transition");
        self.state = next;
    }
}

fn log_fatal_failure(failure: &PipelineFailure) {
    let what = match failure.stage {
        STAGE_FILESYSTEMS => "Initial filesystem setup failed",
        STAGE_DEVICES => "Device node setup failed",
        _ => "Boot stage failed",
    };
    tracing::error!(
        stage = failure.stage,
        task = %failure.task,
        "Critical Error: {}: {}. Dropping to emergency shell.",
        what,
        failure.error
    );
}
