// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level plan as read from a TOML file.
///
/// ```toml
/// [project]
/// start_date = "2026-03-02"
///
/// [task.A]
/// duration = 2
///
/// [task.D]
/// duration = 3
/// after = ["A", "B"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Project-wide settings from `[project]`.
    pub project: ProjectSection,

    /// All tasks from `[task.<name>]`.
    ///
    /// Keys are the *task names* (e.g. `"A"`, `"design"`, `"B2"`).
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Calendar date the project starts on, ISO format `YYYY-MM-DD`.
    pub start_date: String,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Duration of the task in whole days.
    ///
    /// Kept signed so that a negative plan value surfaces as a validation
    /// error instead of a deserialization failure.
    pub duration: i64,

    /// Finish-to-start predecessors: this task may only start once every
    /// task listed here has finished.
    ///
    /// This is the TOML `after = ["A", "B"]` field.
    #[serde(default)]
    pub after: Vec<String>,
}
