use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::info;

use crate::{
    tasks::iface::{Task, TaskContext},
    utils::errors::EmptyResult,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskGraphError {
    #[error("task '{0}' is declared more than once")]
    DuplicateTask(String),

    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error("task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("dependency cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Tasks plus the ordering edges between them.
///
/// Edges come from each task's own `depends_on` and from
/// [`TaskGraph::add_dependency`], which lets the composer of the graph wire a
/// task in front of another without either task knowing.
pub struct TaskGraph {
    tasks: Vec<Box<dyn Task>>,
    extra_edges: HashMap<String, Vec<String>>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

impl TaskGraph {
    pub fn new(tasks: Vec<Box<dyn Task>>) -> Result<Self, TaskGraphError> {
        let mut seen = HashSet::new();
        for task in &tasks {
            if !seen.insert(task.name()) {
                return Err(TaskGraphError::DuplicateTask(task.name().to_string()));
            }
        }

        Ok(Self {
            tasks,
            extra_edges: HashMap::new(),
        })
    }

    /// Declares that `task` must run after `on`.
    pub fn add_dependency(&mut self, task: &str, on: &str) -> Result<(), TaskGraphError> {
        for name in [task, on] {
            if self.get(name).is_none() {
                return Err(TaskGraphError::UnknownTask(name.to_string()));
            }
        }

        let edges = self.extra_edges.entry(task.to_string()).or_default();
        if !edges.iter().any(|e| e == on) {
            edges.push(on.to_string());
        }
        Ok(())
    }

    pub fn tasks(&self) -> impl Iterator<Item = &dyn Task> {
        self.tasks.iter().map(|t| t.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Task> {
        self.tasks().find(|t| t.name() == name)
    }

    /// All dependencies of `name`, declared and added, in declaration order.
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        let mut deps: Vec<&str> = self
            .get(name)
            .map(|t| t.depends_on().iter().map(String::as_str).collect())
            .unwrap_or_default();
        if let Some(extra) = self.extra_edges.get(name) {
            for dep in extra {
                if !deps.contains(&dep.as_str()) {
                    deps.push(dep);
                }
            }
        }
        deps
    }

    /// Orders `targets` and everything they depend on so that every task
    /// comes after its dependencies. Each task appears once.
    pub fn execution_plan(&self, targets: &[String]) -> Result<Vec<&dyn Task>, TaskGraphError> {
        let mut marks = HashMap::new();
        let mut order = Vec::new();
        let mut path = Vec::new();

        for target in targets {
            let Some(task) = self.get(target) else {
                return Err(TaskGraphError::UnknownTask(target.clone()));
            };
            self.visit(task.name(), &mut marks, &mut path, &mut order)?;
        }

        Ok(order
            .into_iter()
            .filter_map(|name| self.get(name))
            .collect())
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
        order: &mut Vec<&'a str>,
    ) -> Result<(), TaskGraphError> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|p| *p == name).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|p| p.to_string()).collect();
                cycle.push(name.to_string());
                return Err(TaskGraphError::Cycle(cycle));
            }
            None => {}
        }

        marks.insert(name, Mark::Visiting);
        path.push(name);

        for dep in self.dependencies_of(name) {
            let Some(dep_task) = self.get(dep) else {
                return Err(TaskGraphError::UnknownDependency {
                    task: name.to_string(),
                    dependency: dep.to_string(),
                });
            };
            self.visit(dep_task.name(), marks, path, order)?;
        }

        path.pop();
        marks.insert(name, Mark::Done);
        order.push(name);
        Ok(())
    }

    /// Runs the plan for `targets`, stopping at the first failing task.
    pub fn execute(&self, targets: &[String], ctx: &TaskContext) -> EmptyResult {
        let plan = self.execution_plan(targets)?;
        let names: Vec<_> = plan.iter().map(|t| t.name()).collect();
        info!("Task plan: {}", names.join(" -> "));

        for task in plan {
            info!("> Task :{}", task.name());
            task.run(ctx)?;
        }
        Ok(())
    }
}
