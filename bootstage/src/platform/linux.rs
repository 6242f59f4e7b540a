//! Real system calls for the boot sequence.

use std::path::Path;

use crate::environment::ProcessEnvironment;
use crate::errors::{BootError, BootResult};
use crate::fs::mount_filesystem;
use crate::util::process::{replace_image, run_to_completion};

use super::{Invocation, MountRequest, Platform, ProcessImage};

#[derive(Debug, Default)]
pub struct LinuxPlatform;

impl LinuxPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for LinuxPlatform {
    fn mount(&mut self, request: &MountRequest) -> BootResult<()> {
        mount_filesystem(request)
    }

    fn run(&mut self, invocation: &Invocation, env: &ProcessEnvironment) -> BootResult<()> {
        run_to_completion(invocation, env)
    }

    fn read_to_string(&mut self, path: &Path) -> BootResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            BootError::DiagnosticListingFailed(format!("{}: {}", path.display(), e))
        })
    }

    fn list_dir(&mut self, path: &Path) -> BootResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| {
            BootError::DiagnosticListingFailed(format!("{}: {}", path.display(), e))
        })?;

        let mut names = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        Ok(names)
    }

    fn exec(&mut self, image: &ProcessImage, env: &ProcessEnvironment) -> BootResult<()> {
        Err(replace_image(image, env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_dir_sorted() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["tty0", "console", "null"] {
            std::fs::write(temp_dir.path().join(name), b"").unwrap();
        }

        let names = LinuxPlatform::new().list_dir(temp_dir.path()).unwrap();
        assert_eq!(names, vec!["console", "null", "tty0"]);
    }

    #[test]
    fn test_list_missing_dir_is_diagnostic_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = LinuxPlatform::new()
            .list_dir(&temp_dir.path().join("dev"))
            .unwrap_err();
        assert!(matches!(err, BootError::DiagnosticListingFailed(_)));
    }
}
