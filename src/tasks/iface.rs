use crate::{models::config::Config, utils::errors::EmptyResult};

/// Context passed to every task during execution.
pub struct TaskContext<'a> {
    pub config: &'a Config,
}

impl<'a> TaskContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

/// A named node of the build graph.
pub trait Task {
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str> {
        None
    }
    fn group(&self) -> Option<&str> {
        None
    }
    /// Tasks this one declares it must run after.
    fn depends_on(&self) -> &[String] {
        &[]
    }
    fn run(&self, ctx: &TaskContext) -> EmptyResult;
}
