// src/dag/graph.rs

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::errors::{CpmError, Result};

/// One schedulable activity plus its computed schedule fields.
///
/// Adjacency is stored as name lists rather than node references; the owning
/// [`TaskGraph`] map is the sole owner of nodes, so removing a task never
/// leaves a dangling pointer, only names to scrub from neighbour lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNode {
    name: String,
    duration_days: u64,

    /// Direct predecessors, in edge-creation order.
    predecessors: Vec<String>,
    /// Direct successors, in edge-creation order.
    successors: Vec<String>,

    /// Computed dates; `None` until the owning scheduler recomputes, and
    /// again after any structural mutation.
    early_start: Option<NaiveDate>,
    early_finish: Option<NaiveDate>,
    late_start: Option<NaiveDate>,
    late_finish: Option<NaiveDate>,
}

impl TaskNode {
    fn new(name: &str, duration_days: u64) -> Self {
        Self {
            name: name.to_string(),
            duration_days,
            predecessors: Vec::new(),
            successors: Vec::new(),
            early_start: None,
            early_finish: None,
            late_start: None,
            late_finish: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_days(&self) -> u64 {
        self.duration_days
    }

    /// Names of tasks that must finish before this one starts.
    pub fn predecessors(&self) -> &[String] {
        &self.predecessors
    }

    /// Names of tasks that wait for this one to finish.
    pub fn successors(&self) -> &[String] {
        &self.successors
    }

    pub fn early_start(&self) -> Option<NaiveDate> {
        self.early_start
    }

    pub fn early_finish(&self) -> Option<NaiveDate> {
        self.early_finish
    }

    pub fn late_start(&self) -> Option<NaiveDate> {
        self.late_start
    }

    pub fn late_finish(&self) -> Option<NaiveDate> {
        self.late_finish
    }

    /// Days between early and late start; `Some(0)` exactly on the critical
    /// path.
    pub fn slack_days(&self) -> Option<i64> {
        match (self.early_start, self.late_start) {
            (Some(es), Some(ls)) => Some(ls.signed_duration_since(es).num_days()),
            _ => None,
        }
    }

    /// Assign the early start and derive the early finish from the duration.
    pub(crate) fn set_early_start(&mut self, date: NaiveDate) {
        self.early_start = Some(date);
        self.early_finish = Some(date + Days::new(self.duration_days));
    }

    /// Assign the late finish and derive the late start from the duration.
    pub(crate) fn set_late_finish(&mut self, date: NaiveDate) {
        self.late_finish = Some(date);
        self.late_start = Some(date - Days::new(self.duration_days));
    }

    fn clear_schedule(&mut self) {
        self.early_start = None;
        self.early_finish = None;
        self.late_start = None;
        self.late_finish = None;
    }
}

/// Name-keyed task arena with insertion-ordered listing.
///
/// The graph holds structure only; all date computation lives in the
/// scheduler that owns it. Edge mutation is crate-internal so that every
/// committed edge has passed through the validity guard first.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    nodes: HashMap<String, TaskNode>,
    /// Task names in insertion order, for stable listing.
    order: Vec<String>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TaskNode> {
        self.nodes.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut TaskNode> {
        self.nodes.get_mut(name)
    }

    /// Add a task with no edges. Names are unique within a graph.
    pub fn add_task(&mut self, name: &str, duration_days: u64) -> Result<()> {
        if self.nodes.contains_key(name) {
            return Err(CpmError::DuplicateName(name.to_string()));
        }
        self.order.push(name.to_string());
        self.nodes.insert(name.to_string(), TaskNode::new(name, duration_days));
        Ok(())
    }

    /// Remove a task, detaching it from every neighbour's adjacency list on
    /// both sides first so that no remaining node references it.
    pub fn remove_task(&mut self, name: &str) -> Result<()> {
        let node = self
            .nodes
            .remove(name)
            .ok_or_else(|| CpmError::TaskNotFound(name.to_string()))?;

        for pred in &node.predecessors {
            if let Some(p) = self.nodes.get_mut(pred) {
                p.successors.retain(|s| s != name);
            }
        }
        for succ in &node.successors {
            if let Some(s) = self.nodes.get_mut(succ) {
                s.predecessors.retain(|p| p != name);
            }
        }

        self.order.retain(|n| n != name);
        Ok(())
    }

    /// Append the edge on both sides. Callers must have run
    /// [`validate_new_edge`](crate::dag::validate::validate_new_edge) first.
    pub(crate) fn add_edge(&mut self, pred: &str, succ: &str) {
        if let Some(p) = self.nodes.get_mut(pred) {
            p.successors.push(succ.to_string());
        }
        if let Some(s) = self.nodes.get_mut(succ) {
            s.predecessors.push(pred.to_string());
        }
    }

    /// Remove the edge on both sides; a missing edge is a no-op.
    pub(crate) fn remove_edge(&mut self, pred: &str, succ: &str) {
        if let Some(p) = self.nodes.get_mut(pred) {
            p.successors.retain(|s| s != succ);
        }
        if let Some(s) = self.nodes.get_mut(succ) {
            s.predecessors.retain(|p| p != pred);
        }
    }

    pub fn has_edge(&self, pred: &str, succ: &str) -> bool {
        self.get(pred)
            .map(|n| n.successors.iter().any(|s| s == succ))
            .unwrap_or(false)
    }

    /// True iff the task exists and has no predecessors.
    pub fn is_source(&self, name: &str) -> bool {
        self.get(name)
            .map(|n| n.predecessors.is_empty())
            .unwrap_or(false)
    }

    /// True iff the task exists and has no successors.
    pub fn is_sink(&self, name: &str) -> bool {
        self.get(name)
            .map(|n| n.successors.is_empty())
            .unwrap_or(false)
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskNode> {
        self.order.iter().filter_map(|name| self.nodes.get(name))
    }

    /// All task names, in insertion order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Drop every computed date; structure is untouched.
    pub(crate) fn clear_schedule(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_schedule();
        }
    }
}
