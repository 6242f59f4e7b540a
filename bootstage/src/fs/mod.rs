//! Mounting of kernel-provided filesystems using the mount(2) syscall.
//!
//! Requires CAP_SYS_ADMIN, which PID 1 holds.

use crate::errors::{BootError, BootResult};
use crate::platform::MountRequest;
use nix::mount::{MsFlags, mount};
use std::path::Path;
use tracing::debug;

/// Mount a pseudo-filesystem at its fixed target.
///
/// The target directory is created first when missing. Nothing is undone
/// on failure.
pub fn mount_filesystem(request: &MountRequest) -> BootResult<()> {
    let target = request.target_path();

    ensure_target_dir_exists(request, target)?;

    mount(
        Some(request.source),
        target,
        Some(request.fstype),
        MsFlags::empty(),
        None::<&str>,
    )
    .map_err(|e| mount_failed(request, e))?;

    debug!(
        fstype = request.fstype,
        target = %target.display(),
        "Filesystem mounted"
    );
    Ok(())
}

fn ensure_target_dir_exists(request: &MountRequest, target: &Path) -> BootResult<()> {
    if target.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(target).map_err(|e| mount_failed(request, e))
}

pub(crate) fn mount_failed(request: &MountRequest, reason: impl std::fmt::Display) -> BootError {
    BootError::MountFailed {
        target: request.target_path().to_path_buf(),
        fstype: request.fstype.to_string(),
        reason: reason.to_string(),
    }
}
