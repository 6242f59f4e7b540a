//! Boot configuration.
//!
//! Loaded from an optional JSON file in the initramfs. Every field has a
//! default, and a missing or broken file falls back to defaults: PID 1 must
//! keep booting whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::init::drivers;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/bootstage/config.json";

/// Next-stage controller that receives control after device setup.
pub const DEFAULT_CONTROLLER: &str = "/sbin/boot-controller";

pub const DEFAULT_FALLBACK_SHELL: &str = "/bin/bash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Driver modules to attempt, in order.
    pub modules: Vec<String>,

    /// Program used to load a module by name (resolved through the search path).
    pub module_loader: String,

    /// Device-node enumeration tool and its "scan now" arguments.
    pub device_scanner: PathBuf,
    pub device_scanner_args: Vec<String>,

    pub controller: PathBuf,
    pub fallback_shell: PathBuf,

    /// Sources for the diagnostic snapshots.
    pub modules_file: PathBuf,
    pub device_dir: PathBuf,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            modules: drivers::default_modules(),
            module_loader: "modprobe".to_string(),
            device_scanner: PathBuf::from("/bin/mdev"),
            device_scanner_args: vec!["-s".to_string()],
            controller: PathBuf::from(DEFAULT_CONTROLLER),
            fallback_shell: PathBuf::from(DEFAULT_FALLBACK_SHELL),
            modules_file: PathBuf::from("/proc/modules"),
            device_dir: PathBuf::from("/dev"),
        }
    }
}

/// Load the boot configuration from `path`.
///
/// Returns defaults if the file does not exist or cannot be parsed.
pub fn load_config(path: &Path) -> BootConfig {
    match try_load_json(path) {
        Some(config) => {
            debug!(path = %path.display(), "Loaded boot configuration");
            config
        }
        None => BootConfig::default(),
    }
}

fn try_load_json(path: &Path) -> Option<BootConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "No boot configuration file, using defaults");
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<BootConfig>(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
