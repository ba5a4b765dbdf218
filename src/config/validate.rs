// src/config/validate.rs

use chrono::NaiveDate;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::ConfigFile;
use crate::errors::{CpmError, Result};

/// Run semantic validation against a loaded plan.
///
/// This checks:
/// - there is at least one task
/// - `[project].start_date` parses as a calendar date
/// - every duration is non-negative
/// - all `after` dependencies refer to existing, different tasks
/// - the task graph has no cycles
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_project(cfg)?;
    validate_durations(cfg)?;
    validate_task_dependencies(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

/// Parse an ISO `YYYY-MM-DD` start date from the plan.
pub fn parse_start_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
        CpmError::ConfigError(format!(
            "invalid [project].start_date '{s}': {e} (expected YYYY-MM-DD)"
        ))
    })
}

fn ensure_has_tasks(cfg: &ConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(CpmError::ConfigError(
            "plan must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_project(cfg: &ConfigFile) -> Result<()> {
    parse_start_date(&cfg.project.start_date)?;
    Ok(())
}

fn validate_durations(cfg: &ConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if task.duration < 0 {
            return Err(CpmError::InvalidDuration {
                name: name.clone(),
                days: task.duration,
            });
        }
    }
    Ok(())
}

fn validate_task_dependencies(cfg: &ConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            if !cfg.task.contains_key(dep) {
                return Err(CpmError::ConfigError(format!(
                    "task '{name}' has unknown dependency '{dep}' in `after`"
                )));
            }
            if dep == name {
                return Err(CpmError::SelfDependency(name.clone()));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &ConfigFile) -> Result<()> {
    // Edge direction is dep -> task: `[task.B] after = ["A"]` adds A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(CpmError::CyclicGraph(cycle.node_id().to_string())),
    }
}
