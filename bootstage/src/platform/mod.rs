//! Operating-system seam for the boot sequence.
//!
//! Every side effect the sequencer performs goes through [`Platform`]:
//! mounts, running helper programs, reading diagnostics and replacing the
//! process image. [`LinuxPlatform`] issues the real system calls.

use std::path::{Path, PathBuf};

use crate::environment::ProcessEnvironment;
use crate::errors::BootResult;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxPlatform;

/// A filesystem to mount at a fixed, well-known target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountRequest {
    /// Source string handed to mount(2); pseudo-filesystems ignore it.
    pub source: &'static str,
    pub fstype: &'static str,
    pub target: &'static str,
}

impl MountRequest {
    /// Process information at `/proc`.
    pub const PROC: MountRequest = MountRequest {
        source: "none",
        fstype: "proc",
        target: "/proc",
    };

    /// Device information at `/sys`.
    pub const SYSFS: MountRequest = MountRequest {
        source: "none",
        fstype: "sysfs",
        target: "/sys",
    };

    /// Device nodes at `/dev`.
    pub const DEVTMPFS: MountRequest = MountRequest {
        source: "devtmpfs",
        fstype: "devtmpfs",
        target: "/dev",
    };

    pub fn target_path(&self) -> &Path {
        Path::new(self.target)
    }
}

/// An external helper program run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// A program that replaces the current process image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessImage {
    pub path: PathBuf,
    /// Full argument vector, `argv[0]` included.
    pub argv: Vec<String>,
}

impl ProcessImage {
    /// Next-stage controller: `argv[0]` is its own path, no further arguments.
    pub fn controller(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            argv: vec![path.display().to_string()],
        }
    }

    /// Interactive shell: `argv[0]` is the program's file name (`bash`).
    pub fn shell(path: &Path) -> Self {
        let argv0 = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path: path.to_path_buf(),
            argv: vec![argv0],
        }
    }

    /// Arguments after `argv[0]`.
    pub fn arguments(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }
}

/// Operating-system operations used by the boot stages.
///
/// Each call is synchronous and blocks until the operation completes.
pub trait Platform {
    /// Mount `request.fstype` at `request.target`.
    ///
    /// Fails with `BootError::MountFailed`.
    fn mount(&mut self, request: &MountRequest) -> BootResult<()>;

    /// Run a helper program to completion with the given environment.
    ///
    /// A non-zero exit status is an error.
    fn run(&mut self, invocation: &Invocation, env: &ProcessEnvironment) -> BootResult<()>;

    fn read_to_string(&mut self, path: &Path) -> BootResult<String>;

    /// Names of the entries in a directory, sorted.
    fn list_dir(&mut self, path: &Path) -> BootResult<Vec<String>>;

    /// Replace the current process image.
    ///
    /// On success this call does not return. Real implementations therefore
    /// only ever return `Err`; `Ok(())` is reserved for doubles that record
    /// the replacement instead of performing it.
    fn exec(&mut self, image: &ProcessImage, env: &ProcessEnvironment) -> BootResult<()>;
}
