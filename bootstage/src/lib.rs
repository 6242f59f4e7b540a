//! bootstage: the first user-space process of an initramfs boot.
//!
//! Mounts the kernel pseudo-filesystems, loads driver modules, populates
//! `/dev` and hands the process over to a next-stage controller. Fatal
//! failures replace the process with an interactive shell instead.

pub mod config;
pub mod environment;
pub mod errors;
#[cfg(target_os = "linux")]
pub mod fs;
pub mod init;
pub mod pipeline;
pub mod platform;
pub mod util;

pub use config::{BootConfig, load_config};
pub use environment::ProcessEnvironment;
pub use errors::{BootError, BootResult};
pub use init::{BootReport, BootState, Sequencer};
#[cfg(target_os = "linux")]
pub use platform::LinuxPlatform;
pub use platform::Platform;
