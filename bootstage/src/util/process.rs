//! Process helpers for running as PID 1.

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::process::{Command, Stdio};

use nix::unistd::{execve, pause};

use crate::environment::ProcessEnvironment;
use crate::errors::{BootError, BootResult};
use crate::platform::{Invocation, ProcessImage};

/// Check if we are running as PID 1.
pub fn is_pid1() -> bool {
    std::process::id() == 1
}

/// Run a helper program and wait for it.
///
/// Output goes straight to the console. stdin is closed so a helper can
/// never block waiting for input.
pub fn run_to_completion(invocation: &Invocation, env: &ProcessEnvironment) -> BootResult<()> {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    env.apply(&mut cmd);
    cmd.stdin(Stdio::null());

    let status = cmd.status().map_err(|e| BootError::Command {
        program: invocation.program.clone(),
        reason: e.to_string(),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(BootError::Command {
            program: invocation.program.clone(),
            reason: format!("exited with {}", status),
        })
    }
}

/// Replace the current process image with `image`.
///
/// Does not return on success. The returned error describes why execve(2)
/// was refused.
pub fn replace_image(image: &ProcessImage, env: &ProcessEnvironment) -> BootError {
    match try_replace_image(image, env) {
        Ok(never) => match never {},
        Err(e) => e,
    }
}

fn try_replace_image(
    image: &ProcessImage,
    env: &ProcessEnvironment,
) -> BootResult<std::convert::Infallible> {
    let path = CString::new(image.path.as_os_str().as_bytes())
        .map_err(|e| BootError::Internal(format!("invalid program path: {}", e)))?;
    let argv = image
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BootError::Internal(format!("invalid argument: {}", e)))?;
    let envp = env.envp()?;

    execve(&path, &argv, &envp).map_err(|errno| BootError::Internal(errno.to_string()))
}

/// Park the process forever.
///
/// PID 1 exiting panics the kernel, so an unrecoverable boot parks here and
/// leaves the console messages in place.
pub fn halt() -> ! {
    loop {
        pause();
    }
}
