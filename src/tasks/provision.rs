use tracing::{info, warn};

use crate::{
    models::config::ProvisionConfig,
    tasks::iface::{Task, TaskContext},
    utils::{
        downloader_def::{downloader::Downloader, providers::http::HttpSourceProvider},
        errors::EmptyResult,
    },
};

/// Built-in task that provisions the declared artifacts.
///
/// It has no dependencies of its own; tasks that need the artifacts point at it.
pub struct TaskProvision {
    config: ProvisionConfig,
}

impl TaskProvision {
    pub fn new(config: ProvisionConfig) -> Self {
        Self { config }
    }
}

impl Task for TaskProvision {
    fn name(&self) -> &str {
        &self.config.task_name
    }

    fn description(&self) -> Option<&str> {
        Some(
            self.config
                .description
                .as_deref()
                .unwrap_or("Downloads missing build artifacts"),
        )
    }

    fn group(&self) -> Option<&str> {
        self.config.group.as_deref()
    }

    fn run(&self, ctx: &TaskContext) -> EmptyResult {
        let target = ctx.config.target()?;
        info!(
            "Provisioning {} artifact(s) into {}",
            self.config.artifacts.len(),
            target.path().display()
        );

        let provider = HttpSourceProvider::new(self.config.timeout())?;
        let downloader = Downloader::new(provider).with_progress(self.config.progress);
        if let Err(err) = downloader.provision(&target, &self.config.specs()) {
            if let Some(file_name) = err.file_name() {
                warn!("Provisioning stopped at {file_name}; rerun the build to retry it");
            }
            return Err(err.into());
        }
        Ok(())
    }
}
