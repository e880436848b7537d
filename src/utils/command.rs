use std::{
    collections::HashMap,
    path::Path,
    process::{ExitStatus, Stdio},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::utils::{
    errors::{ResultTrait as _, ResultWithError},
    shlex::ShlexUtils,
};

pub struct CommandUtils {}

impl CommandUtils {
    /// Runs `cmd` in `cwd`, streaming its output straight to the terminal.
    pub fn run_command_str(
        cmd: &str,
        cwd: &Path,
        env: Option<&HashMap<String, String>>,
    ) -> ResultWithError<ExitStatus> {
        let mut command = ShlexUtils::parse_command(cmd)?;
        command
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(env) = env {
            command.envs(env);
        }

        debug!("Spawning `{}` in {}", cmd, cwd.display());
        command
            .status()
            .auto_err(&format!("Failed to start command `{cmd}`"))
    }

    pub fn display_loader(msg: String) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} {bytes}") {
            spinner.set_style(style.tick_strings(&["⠋", "⠙", "⠸", "⠴", "⠦", "⠇", "✔"]));
        }
        spinner.set_message(msg);
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}
