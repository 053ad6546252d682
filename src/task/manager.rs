//! Structural mutations on the task forest.
//!
//! Every operation here is stateless: it reads a snapshot of the flat
//! collection and returns new or updated records (or a set of ids to
//! remove). The caller is responsible for merging the result back into its
//! collection atomically before invoking the next operation.

use crate::task::hierarchy;
use crate::task::types::*;
use chrono::Utc;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

fn find(id: TaskId, tasks: &[Task]) -> Result<&Task, TaskError> {
    tasks
        .iter()
        .find(|t| t.id == id)
        .ok_or(TaskError::TaskNotFound(id))
}

/// One past the highest `sort_order` among `parent_id`'s current children.
fn next_sort_order(parent_id: TaskId, tasks: &[Task]) -> u32 {
    hierarchy::children(parent_id, tasks)
        .iter()
        .filter_map(|t| t.sort_order)
        .max()
        .unwrap_or(0)
        + 1
}

/// Build a new subtask under `parent_id`.
///
/// The record inherits the parent's classification and scheduling attributes
/// (`type`, `period`, `priority`, tags, `energy`, `focus`, `scheduled_for`,
/// `due_date`) unless `partial` overrides them; time accounting starts at
/// zero and `status` at todo. Fails with [`TaskError::TaskNotFound`] when the
/// parent is not part of the supplied collection.
pub fn create_subtask(
    parent_id: TaskId,
    partial: NewSubtask,
    tasks: &[Task],
) -> Result<Task, TaskError> {
    let parent = find(parent_id, tasks)?;
    let now = Utc::now();

    let task = Task {
        id: Uuid::new_v4(),
        title: partial.title,
        description: partial.description,
        parent_task_id: Some(parent.id),
        depth: parent.depth + 1,
        sort_order: Some(next_sort_order(parent.id, tasks)),
        status: TaskStatus::Todo,
        completed: false,
        kind: partial.kind.or_else(|| parent.kind.clone()),
        period: partial.period.or_else(|| parent.period.clone()),
        priority: partial.priority.or_else(|| parent.priority.clone()),
        tags: partial.tags.unwrap_or_else(|| parent.tags.clone()),
        context_tags: partial
            .context_tags
            .unwrap_or_else(|| parent.context_tags.clone()),
        energy: partial.energy.or_else(|| parent.energy.clone()),
        focus: partial.focus.or_else(|| parent.focus.clone()),
        time_estimate: partial.time_estimate,
        time_spent: 0,
        pomodoro_count: 0,
        created_at: now,
        updated_at: now,
        completed_at: None,
        scheduled_for: partial.scheduled_for.or(parent.scheduled_for),
        due_date: partial.due_date.or(parent.due_date),
        due_time: partial.due_time,
        is_subtask: true,
    };

    debug!("created subtask {} under {}", task.id, parent.id);
    Ok(task)
}

/// Re-assign dense 1..N `sort_order` values to `parent_id`'s children
/// following the order of `ordered_ids`.
///
/// Ids that are not currently children of `parent_id` are ignored. Returns
/// only the updated sibling records for the caller to merge.
pub fn reorder(parent_id: TaskId, ordered_ids: &[TaskId], tasks: &[Task]) -> Vec<Task> {
    let siblings = hierarchy::children(parent_id, tasks);
    let now = Utc::now();

    let mut updated = Vec::new();
    let mut position: u32 = 0;
    for &id in ordered_ids {
        let Some(sibling) = siblings.iter().find(|t| t.id == id) else {
            debug!("ignoring {} in reorder, not a child of {}", id, parent_id);
            continue;
        };
        position += 1;
        let mut record = (*sibling).clone();
        record.sort_order = Some(position);
        record.updated_at = now;
        updated.push(record);
    }
    updated
}

/// Re-parent `subtask_id` under `new_parent_id`.
///
/// The updated record gets `depth = new_parent.depth + 1`, a `sort_order` one
/// past the new siblings' maximum, and re-inherits `type` and `period` from
/// the new parent. Fails with [`TaskError::TaskNotFound`] when either id is
/// absent and with [`TaskError::InvalidOperation`] when the new parent lies
/// inside the subtask's own subtree (which would create a cycle).
pub fn move_subtask(
    subtask_id: TaskId,
    new_parent_id: TaskId,
    tasks: &[Task],
) -> Result<Task, TaskError> {
    let subtask = find(subtask_id, tasks)?;
    let new_parent = find(new_parent_id, tasks)?;

    if cascade_delete_ids(subtask_id, tasks).contains(&new_parent_id) {
        return Err(TaskError::InvalidOperation(format!(
            "cannot move task {subtask_id} under {new_parent_id}: target is within its own subtree"
        )));
    }

    let mut update = subtask.clone();
    update.parent_task_id = Some(new_parent.id);
    update.depth = new_parent.depth + 1;
    update.sort_order = Some(next_sort_order(new_parent.id, tasks));
    update.kind = new_parent.kind.clone();
    update.period = new_parent.period.clone();
    update.is_subtask = true;
    update.updated_at = Utc::now();

    debug!("moved {} under {}", subtask_id, new_parent_id);
    Ok(update)
}

/// The full set of ids to remove when deleting `subtask_id`: the task itself
/// plus every descendant found by repeated child lookups.
///
/// The visited set doubles as the result, so a cyclic (invalid) collection
/// yields each reachable id exactly once instead of looping.
pub fn cascade_delete_ids(subtask_id: TaskId, tasks: &[Task]) -> HashSet<TaskId> {
    let mut ids: HashSet<TaskId> = HashSet::new();
    let mut stack = vec![subtask_id];

    while let Some(id) = stack.pop() {
        if !ids.insert(id) {
            continue;
        }
        for child in tasks.iter().filter(|t| t.parent_task_id == Some(id)) {
            stack.push(child.id);
        }
    }

    ids
}
