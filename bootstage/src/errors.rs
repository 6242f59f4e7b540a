//! Error types used across the boot sequencer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for boot operations.
pub type BootResult<T> = Result<T, BootError>;

#[derive(Debug, Error)]
pub enum BootError {
    /// A pseudo-filesystem or the device-node filesystem could not be mounted.
    #[error("failed to mount {fstype} at {}: {reason}", .target.display())]
    MountFailed {
        target: PathBuf,
        fstype: String,
        reason: String,
    },

    /// The device-node filesystem is mounted but enumeration failed.
    #[error("device node setup failed: {0}")]
    DeviceSetupFailed(String),

    /// A driver module could not be loaded. Never fatal.
    #[error("module {module} not found or failed to load: {reason}")]
    DriverLoadFailed { module: String, reason: String },

    /// A diagnostic listing could not be produced. Never fatal.
    #[error("diagnostic listing failed: {0}")]
    DiagnosticListingFailed(String),

    /// Replacing the process image with the next-stage controller failed.
    #[error("hand-off to {} failed: {reason}", .program.display())]
    HandoffFailed { program: PathBuf, reason: String },

    /// The interactive fallback shell could not be started.
    #[error("fallback shell {} unavailable: {reason}", .shell.display())]
    FallbackUnavailable { shell: PathBuf, reason: String },

    /// An external program could not be started or exited unsuccessfully.
    #[error("command {program} failed: {reason}")]
    Command { program: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}
