use std::collections::BTreeMap;

use cpmdag::config::{ConfigFile, ProjectSection, TaskConfig};

/// Builder for `ConfigFile` to simplify test setup.
pub struct PlanBuilder {
    config: ConfigFile,
}

impl PlanBuilder {
    pub fn new(start_date: &str) -> Self {
        Self {
            config: ConfigFile {
                project: ProjectSection {
                    start_date: start_date.to_string(),
                },
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    /// Shorthand for a task with no dependencies.
    pub fn task(self, name: &str, duration: i64) -> Self {
        self.with_task(name, TaskSpecBuilder::new(duration).build())
    }

    pub fn build(self) -> ConfigFile {
        self.config
    }
}

/// Builder for `TaskConfig`.
pub struct TaskSpecBuilder {
    task: TaskConfig,
}

impl TaskSpecBuilder {
    pub fn new(duration: i64) -> Self {
        Self {
            task: TaskConfig {
                duration,
                after: vec![],
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
