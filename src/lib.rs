//! # Focusdeck
//!
//! Core of a personal productivity tracker: tasks form a forest through
//! optional parent links, and this crate is the engine that derives progress
//! and time statistics from that forest, propagates completion state
//! bottom-up, and performs structural mutations (create, reorder, move,
//! cascade delete) while preserving the tree invariants.
//!
//! Every engine operation is a pure, synchronous function over an immutable
//! snapshot of the caller-owned flat task collection. Operations return new
//! or updated records; the caller merges them back and persists the
//! collection before invoking the next operation.
//!
//! ## Quick Start
//!
//! ```rust
//! use focusdeck::task::{self, manager, stats, NewSubtask, Task};
//!
//! let parent = Task::new_root("Plan the week");
//! let mut tasks = vec![parent.clone()];
//!
//! let subtask = manager::create_subtask(
//!     parent.id,
//!     NewSubtask::titled("Review inbox"),
//!     &tasks,
//! )?;
//! tasks.push(subtask);
//!
//! let progress = stats::subtask_stats(parent.id, &tasks);
//! assert_eq!(progress.total_subtasks, 1);
//! # Ok::<(), task::TaskError>(())
//! ```

/// Hierarchical task engine.
///
/// Task records, parent/child lookups, subtree statistics, completion
/// propagation and the stateless mutation operations.
pub mod task;

/// JSON-file persistence of the flat task collection.
pub mod store;

/// Command line interface: argument parsing and command dispatch.
pub mod cli;
