//! Type definitions for the boot sequence.

use crate::config::BootConfig;
use crate::environment::ProcessEnvironment;
use crate::errors::BootError;
use crate::pipeline::{PipelineFailure, PipelineMetrics};
use crate::platform::Platform;

/// Stage names, in execution order.
pub const STAGE_FILESYSTEMS: &str = "pseudo_filesystems";
pub const STAGE_DRIVERS: &str = "drivers";
pub const STAGE_DEVICES: &str = "device_nodes";

/// Position of the boot sequence.
///
/// ```text
/// Init ─→ FilesystemsMounted ─→ DriversLoaded ─→ DevicesPopulated ─→ HandedOff
///  │                                  │                 │
///  └──────────────→ FallbackShell ←───┘←────────────────┘
///                        │
///                        └─→ Halted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    Init,
    FilesystemsMounted,
    DriversLoaded,
    DevicesPopulated,
    HandedOff,
    FallbackShell,
    Halted,
}

impl BootState {
    /// State reached when the named stage completes.
    pub fn after_stage(stage: &str) -> Option<BootState> {
        match stage {
            STAGE_FILESYSTEMS => Some(BootState::FilesystemsMounted),
            STAGE_DRIVERS => Some(BootState::DriversLoaded),
            STAGE_DEVICES => Some(BootState::DevicesPopulated),
            _ => None,
        }
    }

    /// Whether the fallback shell may be entered from this state.
    pub fn can_fall_back(self) -> bool {
        matches!(
            self,
            BootState::Init
                | BootState::FilesystemsMounted
                | BootState::DriversLoaded
                | BootState::DevicesPopulated
        )
    }
}

impl std::fmt::Display for BootState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BootState::Init => "init",
            BootState::FilesystemsMounted => "filesystems-mounted",
            BootState::DriversLoaded => "drivers-loaded",
            BootState::DevicesPopulated => "devices-populated",
            BootState::HandedOff => "handed-off",
            BootState::FallbackShell => "fallback-shell",
            BootState::Halted => "halted",
        };
        f.write_str(name)
    }
}

/// Shared context for all boot tasks.
pub struct BootContext<'a> {
    pub platform: &'a mut dyn Platform,
    pub env: &'a ProcessEnvironment,
    pub config: &'a BootConfig,
}

impl<'a> BootContext<'a> {
    pub fn new(
        platform: &'a mut dyn Platform,
        env: &'a ProcessEnvironment,
        config: &'a BootConfig,
    ) -> Self {
        Self {
            platform,
            env,
            config,
        }
    }
}

/// What the sequencer did.
///
/// Only observable when a process replacement did not happen for real:
/// under a recording platform, or after every replacement failed.
#[derive(Debug)]
pub struct BootReport {
    /// Terminal state.
    pub state: BootState,
    /// Last state reached by the stage pipeline.
    pub reached: BootState,
    pub metrics: PipelineMetrics,
    /// Fatal stage failure that triggered the fallback shell.
    pub failure: Option<PipelineFailure>,
    pub handoff_error: Option<BootError>,
    pub fallback_error: Option<BootError>,
}

impl BootReport {
    /// One-line reason for a halted boot.
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("state {}", self.state)];
        if let Some(failure) = &self.failure {
            parts.push(format!("stage {} failed: {}", failure.stage, failure.error));
        }
        if let Some(e) = &self.handoff_error {
            parts.push(e.to_string());
        }
        if let Some(e) = &self.fallback_error {
            parts.push(e.to_string());
        }
        parts.join("; ")
    }
}
