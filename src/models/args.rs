use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download every declared artifact that is missing from the target directory
    Provision,
    /// Run tasks after their dependencies, provisioning included
    Run {
        /// Tasks to run. Every task runs when none is given
        tasks: Vec<String>,
    },
    /// List the tasks of the build file
    Tasks,
    /// Write the JSON schema of the build file
    Schema {
        /// Output file
        #[arg(short, long, default_value = "provisioner.schema.json")]
        output: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "provisioner",
    version,
    about = "Provisions external build artifacts and runs build tasks in dependency order.",
    long_about = r#"
Provisioner makes sure the external binaries a build needs (plugin jars and
similar) are present in a local directory before compilation starts.

Artifacts are declared in provisioner.yaml as file names with a download URL.
A file that already exists is never downloaded again; a missing one is
streamed from its URL and only moved into place once complete.

The provisioning step is a task like any other. Declare your compile command
as a task that depends on it, then use 'provisioner run' to execute tasks in
dependency order.
"#
)]
pub struct AppArgs {
    /// Build file to use instead of ./provisioner.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        AppArgs::command().debug_assert();
    }

    #[test]
    fn parses_run_with_tasks_and_globals() {
        let args =
            AppArgs::try_parse_from(["provisioner", "run", "compileJava", "-c", "b.yaml", "-vv"])
                .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("b.yaml")));
        assert_eq!(args.verbose, 2);
        let Command::Run { tasks } = args.command else {
            panic!("expected run command");
        };
        assert_eq!(tasks, vec!["compileJava"]);
    }

    #[test]
    fn schema_output_has_default() {
        let args = AppArgs::try_parse_from(["provisioner", "schema"]).unwrap();
        let Command::Schema { output } = args.command else {
            panic!("expected schema command");
        };
        assert_eq!(output, PathBuf::from("provisioner.schema.json"));
    }
}
