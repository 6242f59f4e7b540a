//! Tasks: driver module loading and the resident-module snapshot.
//!
//! Both are best-effort. A module that cannot be loaded is expected on
//! hardware that does not need it.

use super::{InitCtx, listing_failed};
use crate::errors::{BootError, BootResult};
use crate::init::drivers::{ModuleRequest, parse_proc_modules};
use crate::pipeline::{Criticality, PipelineTask};
use crate::platform::Invocation;

/// Attempt to load one module by name.
///
/// A repeated name is recorded as skipped, naming the earlier spelling.
pub struct ModuleLoadTask {
    module: String,
    duplicate_of: Option<String>,
    name: String,
}

impl ModuleLoadTask {
    pub fn new(module: impl Into<String>) -> Self {
        let module = module.into();
        Self {
            name: format!("load_module:{}", module),
            module,
            duplicate_of: None,
        }
    }

    pub fn from_request(request: ModuleRequest) -> Self {
        Self {
            duplicate_of: request.duplicate_of,
            ..Self::new(request.module)
        }
    }
}

impl<'a> PipelineTask<InitCtx<'a>> for ModuleLoadTask {
    fn run(self: Box<Self>, ctx: &mut InitCtx<'a>) -> BootResult<()> {
        let invocation = Invocation::new(ctx.config.module_loader.as_str(), [&self.module]);

        ctx.platform
            .run(&invocation, ctx.env)
            .map_err(|e| BootError::DriverLoadFailed {
                module: self.module.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(module = %self.module, "Module loaded");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn criticality(&self) -> Criticality {
        Criticality::BestEffort
    }

    fn skip_reason(&self) -> Option<String> {
        self.duplicate_of
            .as_ref()
            .map(|first| format!("duplicate of {}, already attempted", first))
    }
}

/// Log which modules are resident after the load attempts.
pub struct ResidentModulesTask;

impl<'a> PipelineTask<InitCtx<'a>> for ResidentModulesTask {
    fn run(self: Box<Self>, ctx: &mut InitCtx<'a>) -> BootResult<()> {
        let path = ctx.config.modules_file.as_path();
        let content = ctx.platform.read_to_string(path).map_err(listing_failed)?;

        let modules = parse_proc_modules(&content);
        tracing::info!(
            count = modules.len(),
            modules = %modules.join(" "),
            "Resident modules"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "resident_modules"
    }

    fn criticality(&self) -> Criticality {
        Criticality::BestEffort
    }
}
