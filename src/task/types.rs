use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for tasks
pub type TaskId = Uuid;

/// Default bound on how many levels below a task the statistics and
/// traversal helpers descend.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Completion state of a task.
///
/// `status` has two independent writers: direct user action and the
/// completion propagator. The engine treats whatever it is handed as input
/// and never recomputes it implicitly on read.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

/// A single task record in the flat collection.
///
/// The collection forms a forest: `parent_task_id` links a subtask to its
/// parent, roots carry `None`. The caller owns the collection; engine
/// operations take it as an immutable snapshot and return new or updated
/// records for the caller to merge back.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub parent_task_id: Option<TaskId>,
    /// Number of parent hops to the forest root; 0 for root tasks.
    pub depth: u32,
    /// Sibling position, dense 1..N after a reorder. Records without one
    /// sort after records that have one.
    pub sort_order: Option<u32>,
    pub status: TaskStatus,
    /// Kept in sync with `status == Completed` for older consumers of the
    /// task file.
    pub completed: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub period: Option<String>,
    pub priority: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub context_tags: Vec<String>,
    pub energy: Option<String>,
    pub focus: Option<String>,
    /// Estimated minutes of work.
    pub time_estimate: Option<u32>,
    /// Minutes logged against the task, written back by the timer subsystem.
    #[serde(default)]
    pub time_spent: u32,
    #[serde(default)]
    pub pomodoro_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub scheduled_for: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub is_subtask: bool,
}

impl Task {
    /// Create a fresh root task with the given title.
    pub fn new_root(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            parent_task_id: None,
            depth: 0,
            sort_order: None,
            status: TaskStatus::Todo,
            completed: false,
            kind: None,
            period: None,
            priority: None,
            tags: Vec::new(),
            context_tags: Vec::new(),
            energy: None,
            focus: None,
            time_estimate: None,
            time_spent: 0,
            pomodoro_count: 0,
            created_at: now,
            updated_at: now,
            completed_at: None,
            scheduled_for: None,
            due_date: None,
            due_time: None,
            is_subtask: false,
        }
    }

    /// Apply a status write, keeping the `completed` mirror and the
    /// completion timestamp consistent.
    pub fn set_status(&mut self, status: TaskStatus) {
        let now = Utc::now();
        self.status = status;
        self.completed = status == TaskStatus::Completed;
        self.completed_at = if self.completed { Some(now) } else { None };
        self.updated_at = now;
    }
}

/// Caller-supplied fields for a new subtask. Anything left `None` falls back
/// to the parent's value where inheritance applies, or stays empty.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSubtask {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub period: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
    pub context_tags: Option<Vec<String>>,
    pub energy: Option<String>,
    pub focus: Option<String>,
    pub time_estimate: Option<u32>,
    pub scheduled_for: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
}

impl NewSubtask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Errors surfaced by engine operations.
///
/// Every operation is a pure computation over a snapshot, so a failure has no
/// partial state to clean up and is never retried internally.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A referenced parent, new-parent or subtask id is absent from the
    /// supplied collection.
    #[error("Task {0} not found in collection")]
    TaskNotFound(TaskId),

    /// A structural violation, such as moving a task underneath its own
    /// subtree.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
