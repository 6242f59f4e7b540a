//! PID 1 entry point for the initramfs.
//!
//! Runs the boot stages and replaces itself with the next-stage controller,
//! or with an emergency shell when an essential stage fails. This binary
//! never exits: when no process replacement succeeds it parks forever,
//! because PID 1 exiting panics the kernel.

use std::path::PathBuf;

use bootstage::config::{DEFAULT_CONFIG_PATH, load_config};
use bootstage::environment::ProcessEnvironment;
use bootstage::platform::LinuxPlatform;
use bootstage::util::{self, process};
use bootstage::{BootState, Sequencer};
use clap::Parser;

/// Initramfs boot-stage sequencer
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Initramfs PID 1 - mounts pseudo-filesystems, loads drivers, populates /dev and hands off"
)]
struct InitArgs {
    /// Boot configuration file (JSON)
    #[arg(long, env = "BOOTSTAGE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "BOOTSTAGE_LOG")]
    log_level: Option<String>,

    /// Arguments the kernel passes to init; ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    kernel_args: Vec<String>,
}

impl Default for InitArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            log_level: None,
            kernel_args: Vec::new(),
        }
    }
}

fn main() {
    // Never let clap exit the process on a parse error or --help.
    let (args, parse_error) = match InitArgs::try_parse() {
        Ok(args) => (args, None),
        Err(e) => (InitArgs::default(), Some(e)),
    };

    util::init_logging(args.log_level.as_deref());

    tracing::info!("--- Starting boot-stage sequencer ---");
    if let Some(e) = parse_error {
        tracing::warn!("Ignoring unparsable arguments: {:?}", e.kind());
    }
    if !args.kernel_args.is_empty() {
        tracing::debug!(args = ?args.kernel_args, "Ignoring kernel arguments");
    }
    if !process::is_pid1() {
        tracing::warn!(pid = std::process::id(), "Not running as PID 1, continuing anyway");
    }

    let config = load_config(&args.config);
    let env = ProcessEnvironment::from_current();
    tracing::info!(dirs = ?env.search_dirs(), "Executable search path");

    let mut platform = LinuxPlatform::new();
    let report = Sequencer::new(&mut platform, &env, &config).run();

    // Only reached when no process replacement happened.
    if report.state == BootState::Halted {
        tracing::error!("Boot halted: {}", report.describe());
    } else {
        tracing::error!(state = %report.state, "Process replacement returned unexpectedly");
    }
    process::halt()
}
