use std::process::ExitCode;

use clap::Parser as _;
use tracing::{debug, error};

use crate::{
    models::{
        args::{AppArgs, Command},
        config::Config,
    },
    run::Run,
    schemas::schema_gen::SchemaGen,
    utils::{
        errors::{EmptyResult, ResultWithError},
        logger::LoggerUtils,
    },
};

#[cfg(target_os = "linux")]
mod linux;
mod models;
mod run;
mod schemas;
mod tasks;
mod utils;

fn main() -> ExitCode {
    let args = AppArgs::parse();
    LoggerUtils::init(args.verbose);

    let version = env!("CARGO_PKG_VERSION");
    debug!("🔧 Provisioner, Version: {version}");

    #[cfg(target_os = "linux")]
    {
        use crate::utils::command::CommandUtils;
        CommandUtils::set_death_signal();
    }

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &AppArgs) -> EmptyResult {
    let load_run = || -> ResultWithError<Run> {
        let config = Config::load(args.config.as_deref())?;
        Run::new(config)
    };

    match &args.command {
        Command::Provision => load_run()?.provision(),
        Command::Run { tasks } => load_run()?.run_tasks(tasks),
        Command::Tasks => {
            println!("{}", load_run()?.describe_tasks());
            Ok(())
        }
        Command::Schema { output } => SchemaGen::new().execute(output),
    }
}
