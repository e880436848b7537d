use std::collections::BTreeMap;

use tracing::info;

use crate::{
    models::config::Config,
    tasks::{
        command::TaskCommand,
        graph::TaskGraph,
        iface::{Task, TaskContext},
        provision::TaskProvision,
    },
    utils::errors::{EmptyResult, ResultWithError},
};

/// Main controller: composes the task graph from the build file and runs it.
pub struct Run {
    config: Config,
    graph: TaskGraph,
}

impl Run {
    pub fn new(config: Config) -> ResultWithError<Self> {
        let graph = Self::load_graph(&config)?;
        Ok(Self { config, graph })
    }

    fn load_graph(config: &Config) -> ResultWithError<TaskGraph> {
        let mut tasks: Vec<Box<dyn Task>> =
            vec![Box::new(TaskProvision::new(config.provision.clone()))];
        tasks.extend(
            config
                .tasks
                .iter()
                .map(|task| Box::new(TaskCommand::new(task.clone())) as Box<dyn Task>),
        );

        let mut graph = TaskGraph::new(tasks)?;
        for dependent in &config.provision.required_by {
            graph.add_dependency(dependent, &config.provision.task_name)?;
        }
        Ok(graph)
    }

    /// Runs only the provisioning task.
    pub fn provision(&self) -> EmptyResult {
        self.run_tasks(&[self.config.provision.task_name.clone()])
    }

    /// Runs `targets` after their dependencies; every task when `targets` is empty.
    pub fn run_tasks(&self, targets: &[String]) -> EmptyResult {
        if targets.is_empty() {
            let all: Vec<String> = self.graph.tasks().map(|t| t.name().to_string()).collect();
            return self.run_tasks(&all);
        }

        let ctx = TaskContext::new(&self.config);
        self.graph.execute(targets, &ctx)?;
        info!("Build finished");
        Ok(())
    }

    /// Tasks grouped by their group, like a build tool's task listing.
    pub fn describe_tasks(&self) -> String {
        let mut groups: BTreeMap<&str, Vec<&dyn Task>> = BTreeMap::new();
        for task in self.graph.tasks() {
            groups
                .entry(task.group().unwrap_or("other"))
                .or_default()
                .push(task);
        }

        let mut out = String::new();
        for (group, tasks) in groups {
            out.push_str(&format!("{group} tasks\n"));
            out.push_str(&"-".repeat(group.len() + 6));
            out.push('\n');
            for task in tasks {
                out.push_str(task.name());
                if let Some(desc) = task.description() {
                    out.push_str(&format!(" - {desc}"));
                }
                let deps = self.graph.dependencies_of(task.name());
                if !deps.is_empty() {
                    out.push_str(&format!(" (after {})", deps.join(", ")));
                }
                out.push('\n');
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }
}
