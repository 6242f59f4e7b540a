//! Recording platform shared by the integration tests.
//!
//! Nothing touches the host: mounts, helper programs and process
//! replacements are recorded and succeed unless told to fail.

#![allow(dead_code)]

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use bootstage::config::BootConfig;
use bootstage::environment::ProcessEnvironment;
use bootstage::errors::{BootError, BootResult};
use bootstage::platform::{Invocation, MountRequest, Platform, ProcessImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Mount(&'static str),
    Run(Invocation),
    Read(PathBuf),
    ListDir(PathBuf),
    Exec(ProcessImage),
}

#[derive(Default)]
pub struct FakePlatform {
    pub calls: Vec<Call>,
    /// Search path seen by each spawned or executed program.
    pub search_paths: Vec<String>,
    fail_mounts: HashSet<&'static str>,
    fail_programs: HashSet<String>,
    fail_modules: HashSet<String>,
    fail_exec: HashSet<PathBuf>,
    fail_reads: bool,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_mount(mut self, target: &'static str) -> Self {
        self.fail_mounts.insert(target);
        self
    }

    /// Fail every invocation of `program`.
    pub fn fail_program(mut self, program: &str) -> Self {
        self.fail_programs.insert(program.to_string());
        self
    }

    /// Fail module loads for these names only.
    pub fn fail_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fail_modules.extend(modules.into_iter().map(Into::into));
        self
    }

    pub fn fail_exec(mut self, path: &str) -> Self {
        self.fail_exec.insert(PathBuf::from(path));
        self
    }

    pub fn fail_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn mounts(&self) -> Vec<&'static str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Mount(target) => Some(*target),
                _ => None,
            })
            .collect()
    }

    pub fn runs_of(&self, program: &str) -> Vec<&Invocation> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Run(invocation) if invocation.program == program => Some(invocation),
                _ => None,
            })
            .collect()
    }

    pub fn execs(&self) -> Vec<&ProcessImage> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Exec(image) => Some(image),
                _ => None,
            })
            .collect()
    }

    fn record_env(&mut self, env: &ProcessEnvironment) {
        self.search_paths
            .push(env.search_path().to_string_lossy().into_owned());
    }
}

impl Platform for FakePlatform {
    fn mount(&mut self, request: &MountRequest) -> BootResult<()> {
        self.calls.push(Call::Mount(request.target));
        if self.fail_mounts.contains(request.target) {
            return Err(BootError::MountFailed {
                target: request.target_path().to_path_buf(),
                fstype: request.fstype.to_string(),
                reason: "EPERM: Operation not permitted".into(),
            });
        }
        Ok(())
    }

    fn run(&mut self, invocation: &Invocation, env: &ProcessEnvironment) -> BootResult<()> {
        self.calls.push(Call::Run(invocation.clone()));
        self.record_env(env);

        let module_failed = invocation
            .args
            .first()
            .is_some_and(|arg| self.fail_modules.contains(arg));
        if self.fail_programs.contains(&invocation.program) || module_failed {
            return Err(BootError::Command {
                program: invocation.program.clone(),
                reason: "exited with exit status: 1".into(),
            });
        }
        Ok(())
    }

    fn read_to_string(&mut self, path: &Path) -> BootResult<String> {
        self.calls.push(Call::Read(path.to_path_buf()));
        if self.fail_reads {
            return Err(BootError::DiagnosticListingFailed(path.display().to_string()));
        }
        Ok("virtio_blk 28672 0 - Live 0x0000000000000000\n".to_string())
    }

    fn list_dir(&mut self, path: &Path) -> BootResult<Vec<String>> {
        self.calls.push(Call::ListDir(path.to_path_buf()));
        if self.fail_reads {
            return Err(BootError::DiagnosticListingFailed(path.display().to_string()));
        }
        Ok(vec!["console".into(), "null".into(), "vda".into()])
    }

    fn exec(&mut self, image: &ProcessImage, env: &ProcessEnvironment) -> BootResult<()> {
        self.calls.push(Call::Exec(image.clone()));
        self.record_env(env);
        if self.fail_exec.contains(&image.path) {
            return Err(BootError::Internal("ENOENT: No such file or directory".into()));
        }
        Ok(())
    }
}

pub fn test_env() -> ProcessEnvironment {
    ProcessEnvironment::from_vars([(OsString::from("PATH"), OsString::from("/sbin"))])
}

pub fn test_config() -> BootConfig {
    BootConfig::default()
}
