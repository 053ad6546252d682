//! Bottom-up completion propagation.
//!
//! A parent's derived status is a pure function of its direct children.
//! Propagation is one level at a time: after a leaf-level completion toggle
//! the caller walks from the mutated task's parent up to the forest root,
//! invoking [`derive_parent_update`] at each level and committing the result
//! before moving up.

use crate::task::hierarchy;
use crate::task::types::*;
use chrono::Utc;
use tracing::debug;

/// Derive a status update for `parent` from its direct children's completion
/// state. Returns `None` when no transition applies; leaf tasks are never
/// auto-transitioned.
pub fn derive_parent_update(parent: &Task, tasks: &[Task]) -> Option<Task> {
    let kids = hierarchy::children(parent.id, tasks);
    if kids.is_empty() {
        return None;
    }

    let completed = kids.iter().filter(|t| t.completed).count();
    let all_completed = completed == kids.len();
    let now = Utc::now();

    if all_completed && !parent.completed {
        debug!("all {} children of {} completed, completing parent", kids.len(), parent.id);
        let mut update = parent.clone();
        update.status = TaskStatus::Completed;
        update.completed = true;
        update.completed_at = Some(now);
        update.updated_at = now;
        return Some(update);
    }

    if !all_completed && completed > 0 && parent.status == TaskStatus::Todo {
        debug!("{}/{} children of {} completed, marking parent in-progress", completed, kids.len(), parent.id);
        let mut update = parent.clone();
        update.status = TaskStatus::InProgress;
        update.updated_at = now;
        return Some(update);
    }

    // The sole completed child was reopened: fall back from in-progress.
    if completed == 0 && parent.status == TaskStatus::InProgress {
        debug!("no children of {} completed, reverting parent to todo", parent.id);
        let mut update = parent.clone();
        update.status = TaskStatus::Todo;
        update.updated_at = now;
        return Some(update);
    }

    None
}
