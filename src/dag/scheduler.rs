// src/dag/scheduler.rs

use chrono::NaiveDate;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, info};

use crate::config::model::ConfigFile;
use crate::config::validate::parse_start_date;
use crate::dag::graph::{TaskGraph, TaskNode};
use crate::dag::validate::validate_new_edge;
use crate::errors::{CpmError, Result};

/// CPM scheduling engine.
///
/// Owns the task graph and the project start date exclusively. Mutations go
/// through the guarded entry points below and leave the graph unchanged on
/// rejection; every successful mutation drops the computed dates, and
/// [`recompute`](Scheduler::recompute) rebuilds all of them from a clean
/// slate.
pub struct Scheduler {
    graph: TaskGraph,
    start_date: NaiveDate,

    /// Max early finish over sink tasks; `None` for an empty graph or while
    /// the schedule is stale.
    end_date: Option<NaiveDate>,
}

impl Scheduler {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            graph: TaskGraph::new(),
            start_date,
            end_date: None,
        }
    }

    /// Build a scheduler from a validated plan file.
    ///
    /// Tasks are inserted first, then dependencies, through the same guarded
    /// entry points the rest of the crate uses. Does not recompute; callers
    /// decide when.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let start = parse_start_date(&cfg.project.start_date)?;
        let mut scheduler = Scheduler::new(start);

        for (name, task) in cfg.task.iter() {
            scheduler.add_task(name, task.duration)?;
        }
        for (name, task) in cfg.task.iter() {
            for dep in task.after.iter() {
                scheduler.add_dependency(dep, name)?;
            }
        }

        Ok(scheduler)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Project end date; valid only immediately after a successful
    /// [`recompute`](Scheduler::recompute).
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn find_task(&self, name: &str) -> Option<&TaskNode> {
        self.graph.get(name)
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskNode> {
        self.graph.tasks()
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Add a task. The duration is taken as a signed day count so that a
    /// negative plan value surfaces as `InvalidDuration` rather than being
    /// silently reinterpreted.
    pub fn add_task(&mut self, name: &str, duration_days: i64) -> Result<()> {
        let days = u64::try_from(duration_days).map_err(|_| CpmError::InvalidDuration {
            name: name.to_string(),
            days: duration_days,
        })?;
        self.graph.add_task(name, days)?;
        debug!(task = %name, days, "task added");
        self.invalidate();
        Ok(())
    }

    /// Remove a task and every edge touching it, both directions.
    pub fn remove_task(&mut self, name: &str) -> Result<()> {
        self.graph.remove_task(name)?;
        debug!(task = %name, "task removed and detached from neighbours");
        self.invalidate();
        Ok(())
    }

    /// Add a finish-to-start dependency: `succ` may only start once `pred`
    /// has finished. Both names must resolve and the edge must pass the
    /// validity guard.
    pub fn add_dependency(&mut self, pred: &str, succ: &str) -> Result<()> {
        self.resolve(pred)?;
        self.resolve(succ)?;
        validate_new_edge(&self.graph, pred, succ)?;
        self.graph.add_edge(pred, succ);
        debug!(pred = %pred, succ = %succ, "dependency added");
        self.invalidate();
        Ok(())
    }

    /// Remove a dependency edge. Both names must resolve; a missing edge is
    /// a no-op.
    pub fn remove_dependency(&mut self, pred: &str, succ: &str) -> Result<()> {
        self.resolve(pred)?;
        self.resolve(succ)?;
        self.graph.remove_edge(pred, succ);
        debug!(pred = %pred, succ = %succ, "dependency removed");
        self.invalidate();
        Ok(())
    }

    /// Recompute every task's four dates and the project end date from a
    /// clean slate.
    ///
    /// Forward pass in topological order: source tasks start at the project
    /// start date; every other task starts at the max of its predecessors'
    /// early finishes. The project end date is the latest early finish among
    /// sink tasks. Backward pass in reverse order: sink tasks finish at the
    /// project end date; every other task's late finish is the min of its
    /// successors' late starts.
    pub fn recompute(&mut self) -> Result<()> {
        self.invalidate();

        if self.graph.is_empty() {
            debug!("recompute on empty graph; nothing to do");
            return Ok(());
        }

        let order = self.topo_order()?;

        // Forward pass. Topological order guarantees every predecessor's
        // early finish is final before its successors are visited.
        for name in &order {
            let preds: Vec<String> = match self.graph.get(name) {
                Some(node) => node.predecessors().to_vec(),
                None => continue,
            };

            let earliest = preds
                .iter()
                .filter_map(|p| self.graph.get(p).and_then(|n| n.early_finish()))
                .max();

            let start = earliest.unwrap_or(self.start_date);
            if let Some(node) = self.graph.get_mut(name) {
                node.set_early_start(start);
            }
        }

        // Project end date: the latest early finish among sink tasks.
        self.end_date = self
            .graph
            .tasks()
            .filter(|node| node.successors().is_empty())
            .filter_map(|node| node.early_finish())
            .max();

        // A non-empty acyclic graph always has a sink with a computed finish.
        let Some(end) = self.end_date else {
            return Ok(());
        };

        // Backward pass, traversing the same order in reverse.
        for name in order.iter().rev() {
            let succs: Vec<String> = match self.graph.get(name) {
                Some(node) => node.successors().to_vec(),
                None => continue,
            };

            let latest = succs
                .iter()
                .filter_map(|s| self.graph.get(s).and_then(|n| n.late_start()))
                .min();

            let finish = latest.unwrap_or(end);
            if let Some(node) = self.graph.get_mut(name) {
                node.set_late_finish(finish);
            }
        }

        info!(tasks = order.len(), end = %end, "schedule recomputed");
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<()> {
        if self.graph.contains(name) {
            Ok(())
        } else {
            Err(CpmError::TaskNotFound(name.to_string()))
        }
    }

    /// Structural mutations leave computed dates stale; drop them until the
    /// next `recompute`.
    fn invalidate(&mut self) {
        self.graph.clear_schedule();
        self.end_date = None;
    }

    /// Topological order over the current graph.
    ///
    /// Edge insertion enforces acyclicity, so a toposort failure means the
    /// invariant was broken; it is surfaced as `CyclicGraph` instead of
    /// looping forever.
    fn topo_order(&self) -> Result<Vec<String>> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for name in self.graph.task_names() {
            graph.add_node(name);
        }
        for node in self.graph.tasks() {
            for succ in node.successors() {
                graph.add_edge(node.name(), succ.as_str(), ());
            }
        }

        match toposort(&graph, None) {
            Ok(order) => Ok(order.into_iter().map(|n| n.to_string()).collect()),
            Err(cycle) => Err(CpmError::CyclicGraph(cycle.node_id().to_string())),
        }
    }
}
