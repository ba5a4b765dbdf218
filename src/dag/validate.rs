// src/dag/validate.rs

use std::collections::HashSet;

use crate::dag::graph::TaskGraph;
use crate::errors::{CpmError, Result};

/// Check a proposed dependency edge before it is committed.
///
/// Rejects, in order:
/// - self-loops (`pred == succ`),
/// - edges that already exist,
/// - edges that would close a cycle, i.e. `pred` is already reachable from
///   `succ` along existing successor edges.
///
/// Both names must already resolve in the graph; the graph is left untouched
/// either way.
pub fn validate_new_edge(graph: &TaskGraph, pred: &str, succ: &str) -> Result<()> {
    if pred == succ {
        return Err(CpmError::SelfDependency(pred.to_string()));
    }
    if graph.has_edge(pred, succ) {
        return Err(CpmError::DuplicateEdge {
            pred: pred.to_string(),
            succ: succ.to_string(),
        });
    }
    if reaches(graph, succ, pred) {
        return Err(CpmError::CyclicDependency {
            pred: pred.to_string(),
            succ: succ.to_string(),
        });
    }
    Ok(())
}

/// Depth-first reachability from `from` to `to` along successor edges.
///
/// The visited set bounds the walk at O(V+E) and guarantees termination even
/// on a graph whose acyclicity invariant has already been broken.
fn reaches<'a>(graph: &'a TaskGraph, from: &'a str, to: &str) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![from];

    while let Some(name) = stack.pop() {
        if name == to {
            return true;
        }
        if !visited.insert(name) {
            continue;
        }
        if let Some(node) = graph.get(name) {
            stack.extend(node.successors().iter().map(|s| s.as_str()));
        }
    }

    false
}
