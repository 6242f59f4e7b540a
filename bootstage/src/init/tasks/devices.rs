//! Tasks: device-node enumeration and the `/dev` listing.

use super::{InitCtx, listing_failed};
use crate::errors::{BootError, BootResult};
use crate::pipeline::{Criticality, PipelineTask};
use crate::platform::Invocation;

/// Run the device-node tool in scan mode to create nodes for present devices.
pub struct DeviceScanTask;

impl<'a> PipelineTask<InitCtx<'a>> for DeviceScanTask {
    fn run(self: Box<Self>, ctx: &mut InitCtx<'a>) -> BootResult<()> {
        let invocation = Invocation::new(
            ctx.config.device_scanner.display().to_string(),
            &ctx.config.device_scanner_args,
        );
        tracing::info!(command = %invocation, "Creating device nodes");

        ctx.platform
            .run(&invocation, ctx.env)
            .map_err(|e| BootError::DeviceSetupFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "device_scan"
    }

    fn criticality(&self) -> Criticality {
        Criticality::Fatal
    }
}

/// Log the populated device directory. Observational only.
pub struct DeviceListingTask;

impl<'a> PipelineTask<InitCtx<'a>> for DeviceListingTask {
    fn run(self: Box<Self>, ctx: &mut InitCtx<'a>) -> BootResult<()> {
        let dir = ctx.config.device_dir.as_path();
        let entries = ctx.platform.list_dir(dir).map_err(listing_failed)?;

        tracing::info!(
            dir = %dir.display(),
            count = entries.len(),
            entries = %entries.join(" "),
            "Device nodes"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "device_listing"
    }

    fn criticality(&self) -> Criticality {
        Criticality::BestEffort
    }
}
