//! Driver module list.
//!
//! Grouping by subsystem is documentation only: modules are attempted in
//! list order, each independently.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

pub struct DriverGroup {
    pub subsystem: &'static str,
    pub modules: &'static [&'static str],
}

pub const DEFAULT_DRIVERS: &[DriverGroup] = &[
    DriverGroup {
        subsystem: "human interface devices",
        modules: &["usbhid"],
    },
    DriverGroup {
        subsystem: "usb host controllers",
        modules: &["ehci-hcd", "xhci-hcd"],
    },
    DriverGroup {
        subsystem: "virtio",
        modules: &[
            "virtio",
            "virtio_pci",
            "virtio_blk",
            "virtio_net",
            "virtio_scsi",
            "virtio_ring",
        ],
    },
    DriverGroup {
        subsystem: "mellanox connectx",
        modules: &["mlx5_core", "mlx5_en", "mlx5_ib", "mlx5_eswitch"],
    },
    DriverGroup {
        subsystem: "nvme",
        modules: &["nvme", "nvme_core", "nvme_pci"],
    },
];

pub fn default_modules() -> Vec<String> {
    DEFAULT_DRIVERS
        .iter()
        .flat_map(|group| group.modules.iter())
        .map(|module| module.to_string())
        .collect()
}

/// One listed module name and, for a repeat, the earlier spelling it repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRequest {
    pub module: String,
    pub duplicate_of: Option<String>,
}

/// Trim names and drop blanks. Every remaining name yields one request, in
/// list order; repeats are marked so they are recorded but not loaded twice.
///
/// `-` and `_` are interchangeable in module names, so `ehci-hcd` and
/// `ehci_hcd` count as the same module.
pub fn plan_modules(modules: &[String]) -> Vec<ModuleRequest> {
    let mut first_seen: HashMap<String, String> = HashMap::new();
    let mut requests = Vec::with_capacity(modules.len());

    for module in modules {
        let module = module.trim();
        if module.is_empty() {
            tracing::warn!("Ignoring blank module name in module list");
            continue;
        }
        let duplicate_of = match first_seen.entry(module.replace('-', "_")) {
            Entry::Occupied(entry) => Some(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(module.to_string());
                None
            }
        };
        requests.push(ModuleRequest {
            module: module.to_string(),
            duplicate_of,
        });
    }

    requests
}

/// Module names from `/proc/modules`, one per line, first column.
pub fn parse_proc_modules(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
