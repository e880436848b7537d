use tracing::{error, info};

use crate::{
    models::config::TaskConfig,
    tasks::iface::{Task, TaskContext},
    utils::{command::CommandUtils, errors::EmptyResult},
};

/// Task declared in the build file that runs an external command.
pub struct TaskCommand {
    config: TaskConfig,
}

impl TaskCommand {
    pub fn new(config: TaskConfig) -> Self {
        Self { config }
    }
}

impl Task for TaskCommand {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    fn group(&self) -> Option<&str> {
        self.config.group.as_deref()
    }

    fn depends_on(&self) -> &[String] {
        &self.config.depends_on
    }

    fn run(&self, ctx: &TaskContext) -> EmptyResult {
        info!("[{}] {}", self.config.name, self.config.command);
        let status = CommandUtils::run_command_str(
            &self.config.command,
            &ctx.config.base_dir,
            self.config.env.as_ref(),
        )?;

        if !status.success() {
            error!("[{}] exited with {}", self.config.name, status);
            return Err(format!("Task '{}' failed with {}", self.config.name, status).into());
        }
        Ok(())
    }
}
