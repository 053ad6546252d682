//! Progress and time statistics over a task's subtree.

use crate::task::hierarchy;
use crate::task::types::*;
use serde::Serialize;

/// Aggregate progress and time accounting for a task's subtree, bounded by
/// [`DEFAULT_MAX_DEPTH`].
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskStats {
    pub total_subtasks: u32,
    pub completed_subtasks: u32,
    /// 0.0 when there are no subtasks at all.
    pub progress_percentage: f64,
    /// Sum of `time_estimate` over incomplete descendants, in minutes.
    /// Missing estimates count as 0.
    pub estimated_time_remaining: u32,
    /// Sum of `time_spent` over all descendants, in minutes.
    pub total_time_spent: u32,
}

/// Compute subtree statistics for `parent_id`.
pub fn subtask_stats(parent_id: TaskId, tasks: &[Task]) -> SubtaskStats {
    let subtree = hierarchy::descendants(parent_id, tasks, DEFAULT_MAX_DEPTH);

    let total_subtasks = subtree.len() as u32;
    let completed_subtasks = subtree.iter().filter(|t| t.completed).count() as u32;
    let progress_percentage = if total_subtasks == 0 {
        0.0
    } else {
        completed_subtasks as f64 / total_subtasks as f64 * 100.0
    };
    let estimated_time_remaining = subtree
        .iter()
        .filter(|t| !t.completed)
        .map(|t| t.time_estimate.unwrap_or(0))
        .sum();
    let total_time_spent = subtree.iter().map(|t| t.time_spent).sum();

    SubtaskStats {
        total_subtasks,
        completed_subtasks,
        progress_percentage,
        estimated_time_remaining,
        total_time_spent,
    }
}

/// Reconcile a task's own estimate with its subtree's, in minutes.
///
/// A manually entered parent estimate acts as a floor: when the task defines
/// `time_estimate > 0` the result is the greater of that value and the sum of
/// descendant estimates, so small subtask estimates never silently shrink it.
/// Without an own estimate the result is simply the descendant sum.
pub fn aggregate_estimate(parent_id: TaskId, tasks: &[Task]) -> u32 {
    let subtree_sum: u32 = hierarchy::descendants(parent_id, tasks, DEFAULT_MAX_DEPTH)
        .iter()
        .map(|t| t.time_estimate.unwrap_or(0))
        .sum();

    let own = tasks
        .iter()
        .find(|t| t.id == parent_id)
        .and_then(|t| t.time_estimate)
        .unwrap_or(0);

    if own > 0 { own.max(subtree_sum) } else { subtree_sum }
}
