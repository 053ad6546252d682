//! Parent/child lookups over the flat task collection.
//!
//! Nothing here stores state: the forest structure is recomputed from the
//! supplied snapshot on every query. Traversals run on an explicit stack with
//! a visited set and a depth bound, so an inconsistent collection (say, an
//! accidental parent cycle) truncates the result instead of recursing
//! forever.

use crate::task::types::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::warn;

/// A task paired with its indentation level for linear rendering of the
/// forest.
#[derive(Debug, Clone, Serialize)]
pub struct FlatTask<'a> {
    pub task: &'a Task,
    pub indent: u32,
}

/// Sibling ordering: `sort_order` ascending where both sides define it,
/// records without one after records with one, ties broken by `created_at`.
fn sibling_order(a: &Task, b: &Task) -> Ordering {
    match (a.sort_order, b.sort_order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.created_at.cmp(&b.created_at)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.created_at.cmp(&b.created_at),
    }
}

/// Direct children of `parent_id`, in sibling order.
pub fn children(parent_id: TaskId, tasks: &[Task]) -> Vec<&Task> {
    let mut kids: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.parent_task_id == Some(parent_id))
        .collect();
    kids.sort_by(|a, b| sibling_order(a, b));
    kids
}

/// Root tasks of the forest, in sibling order.
pub fn roots(tasks: &[Task]) -> Vec<&Task> {
    let mut tops: Vec<&Task> = tasks.iter().filter(|t| t.parent_task_id.is_none()).collect();
    tops.sort_by(|a, b| sibling_order(a, b));
    tops
}

/// All descendants of `root_id` up to `max_depth` levels below it, in
/// pre-order (each task before its own subtree, siblings in sibling order).
///
/// The root itself is not included. A task reached twice through an
/// inconsistent collection is emitted once and its repeat skipped.
pub fn descendants(root_id: TaskId, tasks: &[Task], max_depth: u32) -> Vec<&Task> {
    let mut out = Vec::new();
    if max_depth == 0 {
        return out;
    }

    let mut visited: HashSet<TaskId> = HashSet::new();
    visited.insert(root_id);

    // (task, levels still allowed below it)
    let mut stack: Vec<(&Task, u32)> = Vec::new();
    for child in children(root_id, tasks).into_iter().rev() {
        stack.push((child, max_depth - 1));
    }

    while let Some((task, remaining)) = stack.pop() {
        if !visited.insert(task.id) {
            warn!("task {} reached twice during traversal, skipping repeat", task.id);
            continue;
        }
        out.push(task);
        if remaining > 0 {
            for child in children(task.id, tasks).into_iter().rev() {
                stack.push((child, remaining - 1));
            }
        }
    }

    out
}

/// Display-ordered view of the whole forest: every root followed depth-first
/// by its descendants, each entry annotated with its indent level (0 for
/// roots).
pub fn flatten(tasks: &[Task]) -> Vec<FlatTask<'_>> {
    let mut out = Vec::new();
    let mut visited: HashSet<TaskId> = HashSet::new();

    let mut stack: Vec<(&Task, u32)> = Vec::new();
    for root in roots(tasks).into_iter().rev() {
        stack.push((root, 0));
    }

    while let Some((task, indent)) = stack.pop() {
        if !visited.insert(task.id) {
            continue;
        }
        out.push(FlatTask { task, indent });
        for child in children(task.id, tasks).into_iter().rev() {
            stack.push((child, indent + 1));
        }
    }

    out
}
