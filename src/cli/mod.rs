//! CLI command dispatch.
//!
//! The CLI is the caller the engine is written for: it owns the flat
//! collection, hands the engine a snapshot per operation, merges the returned
//! records back, and persists the whole collection before the next command
//! runs. Completion toggles live here too, followed by a bottom-up
//! propagation walk from the toggled task's parent to the forest root.

pub mod args;

pub use args::{Args, Commands};

use crate::store::TaskStore;
use crate::task::{
    NewSubtask, Task, TaskError, TaskId, TaskStatus, hierarchy, manager, propagate, stats,
};
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::info;

pub fn run(args: Args) -> Result<()> {
    let store = TaskStore::new(&args.file);
    let mut tasks = store.load().context("loading task file")?;

    match args.command {
        Commands::Add {
            title,
            kind,
            period,
            priority,
            estimate,
            due,
            scheduled,
        } => {
            let mut task = Task::new_root(title);
            task.kind = kind;
            task.period = period;
            task.priority = priority;
            task.time_estimate = estimate;
            task.due_date = due;
            task.scheduled_for = scheduled;
            println!("{}  {}", task.id, task.title);
            tasks.push(task);
            store.save(&tasks).context("saving task file")?;
        }
        Commands::Sub {
            parent,
            title,
            kind,
            period,
            priority,
            estimate,
            due,
            scheduled,
        } => {
            let partial = NewSubtask {
                title,
                kind,
                period,
                priority,
                time_estimate: estimate,
                due_date: due,
                scheduled_for: scheduled,
                ..NewSubtask::default()
            };
            let subtask = manager::create_subtask(parent, partial, &tasks)?;
            println!("{}  {}", subtask.id, subtask.title);
            tasks.push(subtask);
            store.save(&tasks).context("saving task file")?;
        }
        Commands::Tree => render_tree(&tasks),
        Commands::Stats { task } => {
            require(task, &tasks)?;
            let subtree_stats = stats::subtask_stats(task, &tasks);
            println!("{}", serde_json::to_string_pretty(&subtree_stats)?);
            println!(
                "aggregate estimate: {} min",
                stats::aggregate_estimate(task, &tasks)
            );
        }
        Commands::Done { task } => {
            toggle_status(task, TaskStatus::Completed, &mut tasks)?;
            store.save(&tasks).context("saving task file")?;
        }
        Commands::Reopen { task } => {
            toggle_status(task, TaskStatus::Todo, &mut tasks)?;
            store.save(&tasks).context("saving task file")?;
        }
        Commands::Move { task, new_parent } => {
            let update = manager::move_subtask(task, new_parent, &tasks)?;
            info!("moved {} under {}", task, new_parent);
            upsert(&mut tasks, update);
            store.save(&tasks).context("saving task file")?;
        }
        Commands::Reorder { parent, ids } => {
            require(parent, &tasks)?;
            let updates = manager::reorder(parent, &ids, &tasks);
            info!("reordered {} children of {}", updates.len(), parent);
            for update in updates {
                upsert(&mut tasks, update);
            }
            store.save(&tasks).context("saving task file")?;
        }
        Commands::Rm { task } => {
            require(task, &tasks)?;
            let doomed = manager::cascade_delete_ids(task, &tasks);
            tasks.retain(|t| !doomed.contains(&t.id));
            println!("removed {} task(s)", doomed.len());
            store.save(&tasks).context("saving task file")?;
        }
    }

    Ok(())
}

fn require(id: TaskId, tasks: &[Task]) -> Result<(), TaskError> {
    if tasks.iter().any(|t| t.id == id) {
        Ok(())
    } else {
        Err(TaskError::TaskNotFound(id))
    }
}

/// Merge an engine-returned record into the collection by id.
fn upsert(tasks: &mut Vec<Task>, record: Task) {
    match tasks.iter_mut().find(|t| t.id == record.id) {
        Some(slot) => *slot = record,
        None => tasks.push(record),
    }
}

fn toggle_status(id: TaskId, status: TaskStatus, tasks: &mut Vec<Task>) -> Result<(), TaskError> {
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(TaskError::TaskNotFound(id))?;
    task.set_status(status);
    propagate_upward(id, tasks);
    Ok(())
}

/// Walk from the mutated task's parent up to the forest root, committing one
/// derived update per level before moving on. The visited set keeps an
/// inconsistent collection from turning the walk into a loop.
fn propagate_upward(start: TaskId, tasks: &mut Vec<Task>) {
    let mut seen: HashSet<TaskId> = HashSet::new();
    let mut next = tasks
        .iter()
        .find(|t| t.id == start)
        .and_then(|t| t.parent_task_id);

    while let Some(parent_id) = next {
        if !seen.insert(parent_id) {
            break;
        }
        let Some(parent) = tasks.iter().find(|t| t.id == parent_id).cloned() else {
            break;
        };
        next = parent.parent_task_id;
        if let Some(update) = propagate::derive_parent_update(&parent, tasks) {
            upsert(tasks, update);
        }
    }
}

fn render_tree(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks yet");
        return;
    }

    for entry in hierarchy::flatten(tasks) {
        let task = entry.task;
        let glyph = match task.status {
            TaskStatus::Todo => "[ ]",
            TaskStatus::InProgress => "[~]",
            TaskStatus::Completed => "[x]",
        };
        let mut extras = Vec::new();
        if let Some(estimate) = task.time_estimate {
            extras.push(format!("{estimate}m"));
        }
        if task.time_spent > 0 {
            extras.push(format!("spent {}m", task.time_spent));
        }
        if let Some(period) = &task.period {
            extras.push(period.clone());
        }
        let suffix = if extras.is_empty() {
            String::new()
        } else {
            format!("  ({})", extras.join(", "))
        };
        println!(
            "{}{} {}  {}{}",
            "  ".repeat(entry.indent as usize),
            glyph,
            task.id,
            task.title,
            suffix
        );
    }
}
