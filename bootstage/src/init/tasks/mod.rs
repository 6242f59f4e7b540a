//! Boot tasks.
//!
//! Each task wraps one operating-system operation and runs against the
//! shared [`BootContext`].

mod devices;
mod modules;
mod mount;

pub use devices::{DeviceListingTask, DeviceScanTask};
pub use modules::{ModuleLoadTask, ResidentModulesTask};
pub use mount::MountTask;

use super::types::BootContext;
use crate::errors::BootError;

pub type InitCtx<'a> = BootContext<'a>;

/// Report any failure of an observational step as a listing failure.
fn listing_failed(err: BootError) -> BootError {
    match err {
        BootError::DiagnosticListingFailed(_) => err,
        other => BootError::DiagnosticListingFailed(other.to_string()),
    }
}
