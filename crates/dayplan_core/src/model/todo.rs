//! Todo record and view filter.
//!
//! # Responsibility
//! - Define the persisted record shape shared by store and storage adapter.
//! - Define the process-local view filter and its predicate.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `title` is non-empty trimmed text once a record exists; trimming
//!   happens in the store, not here.
//! - `Filter` is never serialized; only records reach the storage slot.

use crate::model::id::{new_id, TodoId};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One task item.
///
/// Field names are renamed to camelCase on the wire so the persisted
/// snapshot keeps the slot's historical JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Stable identifier, assigned at creation.
    pub id: TodoId,
    /// Task text. Non-empty and trimmed after any committed edit.
    pub title: String,
    /// Completion flag.
    pub done: bool,
    /// Creation time in epoch milliseconds. Recorded for display; the
    /// collection itself stays in insertion order.
    pub created_at: i64,
}

impl Todo {
    /// Creates a new incomplete record with a fresh identifier.
    ///
    /// The caller is responsible for supplying already-trimmed text.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            done: false,
            created_at: epoch_ms_now(),
        }
    }
}

/// View selector for the visible subset of the collection.
///
/// Process-local state: selecting a filter never touches the storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every record.
    #[default]
    All,
    /// Records with `done == false`.
    Active,
    /// Records with `done == true`.
    Completed,
}

impl Filter {
    /// Returns whether `todo` is visible under this filter.
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.done,
            Self::Completed => todo.done,
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// A clock before the epoch degrades to 0 rather than failing; timestamps
/// are informational only.
pub(crate) fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Filter, Todo};

    #[test]
    fn new_todo_starts_incomplete() {
        let todo = Todo::new("water plants");
        assert_eq!(todo.title, "water plants");
        assert!(!todo.done);
        assert!(todo.created_at > 0);
    }

    #[test]
    fn filter_predicates_split_on_done() {
        let mut todo = Todo::new("task");
        assert!(Filter::All.matches(&todo));
        assert!(Filter::Active.matches(&todo));
        assert!(!Filter::Completed.matches(&todo));

        todo.done = true;
        assert!(Filter::All.matches(&todo));
        assert!(!Filter::Active.matches(&todo));
        assert!(Filter::Completed.matches(&todo));
    }

    #[test]
    fn default_filter_is_all() {
        assert_eq!(Filter::default(), Filter::All);
    }
}
