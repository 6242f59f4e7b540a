//! Task: mount a kernel filesystem.

use super::InitCtx;
use crate::errors::BootResult;
use crate::pipeline::{Criticality, PipelineTask};
use crate::platform::MountRequest;

pub struct MountTask {
    request: MountRequest,
    name: String,
}

impl MountTask {
    pub fn new(request: MountRequest) -> Self {
        Self {
            name: format!("mount_{}", request.fstype),
            request,
        }
    }
}

impl<'a> PipelineTask<InitCtx<'a>> for MountTask {
    fn run(self: Box<Self>, ctx: &mut InitCtx<'a>) -> BootResult<()> {
        tracing::info!(
            fstype = self.request.fstype,
            target = self.request.target,
            "Mounting filesystem"
        );
        ctx.platform.mount(&self.request)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn criticality(&self) -> Criticality {
        Criticality::Fatal
    }
}
