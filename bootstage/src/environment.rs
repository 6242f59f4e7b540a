//! Process environment handed to every program the sequencer starts.
//!
//! The executable search path is computed once at start-up and passed
//! explicitly to each spawn or exec. The sequencer's own environment
//! is never mutated.

use std::ffi::{CString, OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::process::Command;

use crate::errors::{BootError, BootResult};

/// Directories appended to the inherited search path.
pub const EXTRA_SEARCH_DIRS: [&str; 4] = ["/usr/bin", "/usr/sbin", "/bin", "/usr/local/bin"];

const PATH_VAR: &str = "PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEnvironment {
    search_path: OsString,
    vars: Vec<(OsString, OsString)>,
}

impl ProcessEnvironment {
    /// Snapshot the current environment and extend its search path.
    pub fn from_current() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Build from an explicit variable list. `PATH`, if present, is extended.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut inherited = None;
        let mut rest = Vec::new();
        for (key, value) in vars {
            if key == PATH_VAR {
                inherited = Some(value);
            } else {
                rest.push((key, value));
            }
        }

        Self {
            search_path: extend_search_path(inherited.as_deref()),
            vars: rest,
        }
    }

    pub fn search_path(&self) -> &OsStr {
        &self.search_path
    }

    /// Search path split into its directories.
    pub fn search_dirs(&self) -> Vec<&str> {
        self.search_path
            .to_str()
            .map(|p| p.split(':').filter(|d| !d.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Apply to a child command: inherited variables plus the extended path.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env_clear();
        cmd.envs(self.vars.iter().map(|(k, v)| (k, v)));
        cmd.env(PATH_VAR, &self.search_path);
    }

    /// `KEY=value` strings for execve(2).
    pub fn envp(&self) -> BootResult<Vec<CString>> {
        let path = (OsStr::new(PATH_VAR), self.search_path.as_os_str());
        self.vars
            .iter()
            .map(|(k, v)| (k.as_os_str(), v.as_os_str()))
            .chain(std::iter::once(path))
            .map(|(key, value)| {
                let mut entry = key.as_bytes().to_vec();
                entry.push(b'=');
                entry.extend_from_slice(value.as_bytes());
                CString::new(entry).map_err(|e| {
                    BootError::Internal(format!(
                        "environment variable {} contains a NUL byte: {}",
                        key.to_string_lossy(),
                        e
                    ))
                })
            })
            .collect()
    }
}

/// Append the extra directories to an inherited search path.
fn extend_search_path(inherited: Option<&OsStr>) -> OsString {
    let mut path = inherited.map(OsStr::to_os_string).unwrap_or_default();
    for dir in EXTRA_SEARCH_DIRS {
        if !path.is_empty() {
            path.push(":");
        }
        path.push(dir);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }

    #[test]
    fn test_extends_inherited_path() {
        let env = ProcessEnvironment::from_vars(vars(&[("PATH", "/sbin"), ("TERM", "linux")]));
        assert_eq!(
            env.search_path(),
            "/sbin:/usr/bin:/usr/sbin:/bin:/usr/local/bin"
        );
        assert_eq!(env.search_dirs()[0], "/sbin");
    }

    #[test]
    fn test_missing_path_gets_extra_dirs_only() {
        let env = ProcessEnvironment::from_vars(vars(&[("HOME", "/")]));
        assert_eq!(env.search_dirs(), EXTRA_SEARCH_DIRS.to_vec());
    }

    #[test]
    fn test_envp_carries_variables_and_path() {
        let env = ProcessEnvironment::from_vars(vars(&[("TERM", "linux")]));
        let envp = env.envp().unwrap();
        assert_eq!(envp.len(), 2);
        assert_eq!(envp[0].to_str().unwrap(), "TERM=linux");
        assert_eq!(
            envp[1].to_str().unwrap(),
            "PATH=/usr/bin:/usr/sbin:/bin:/usr/local/bin"
        );
    }

    #[test]
    fn test_apply_sets_path_on_command() {
        let env = ProcessEnvironment::from_vars(vars(&[("PATH", "/sbin")]));
        let mut cmd = Command::new("true");
        env.apply(&mut cmd);
        let path = cmd
            .get_envs()
            .find(|(k, _)| *k == "PATH")
            .and_then(|(_, v)| v)
            .unwrap();
        assert_eq!(path, env.search_path());
    }
}
