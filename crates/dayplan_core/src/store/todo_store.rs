//! Todo store: mutations, derivations, and persistence orchestration.
//!
//! # Responsibility
//! - Apply collection mutations and persist the full snapshot after each.
//! - Serve pure derivation queries for the rendering layer.
//!
//! # Invariants
//! - `id` values are unique across the collection at all times.
//! - Collection order is insertion order, newest first.
//! - `set_filter` never writes to the storage slot.
//! - Mutations never fail: a persist error is logged and swallowed, and
//!   unknown-id targets are silent no-ops.

use crate::model::todo::{Filter, Todo};
use crate::repo::snapshot_repo::SnapshotRepository;
use log::error;

/// State container for the todo collection and the active filter.
///
/// Construction loads the persisted snapshot through the repository; every
/// mutation that changes the collection writes the full snapshot back.
pub struct TodoStore<R: SnapshotRepository> {
    repo: R,
    todos: Vec<Todo>,
    filter: Filter,
}

impl<R: SnapshotRepository> TodoStore<R> {
    /// Creates a store over the given repository, loading prior state.
    ///
    /// A load transport failure degrades to an empty collection; startup
    /// never fails on storage problems.
    pub fn new(repo: R) -> Self {
        let todos = repo.load().unwrap_or_else(|err| {
            error!("event=store_init module=store status=recovered error={err}");
            Vec::new()
        });
        Self {
            repo,
            todos,
            filter: Filter::default(),
        }
    }

    /// Current collection, newest first.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Active view filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Creates a new record from `raw_title`, prepended to the collection.
    ///
    /// # Contract
    /// - `raw_title` is trimmed first; empty input is a no-op with no write.
    /// - The new record starts with `done == false`.
    pub fn add(&mut self, raw_title: &str) {
        let title = raw_title.trim();
        if title.is_empty() {
            return;
        }
        self.todos.insert(0, Todo::new(title));
        self.persist();
    }

    /// Flips the completion flag on the record matching `id`.
    ///
    /// Unknown `id` is a no-op with no write.
    pub fn toggle(&mut self, id: &str) {
        if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
            todo.done = !todo.done;
            self.persist();
        }
    }

    /// Deletes the record matching `id`.
    ///
    /// Unknown `id` is a no-op with no write; repeating a remove is
    /// therefore idempotent.
    pub fn remove(&mut self, id: &str) {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        if self.todos.len() != before {
            self.persist();
        }
    }

    /// Sets the title on the record matching `id`.
    ///
    /// # Contract
    /// - The caller supplies non-empty trimmed text; `commit_edit` is the
    ///   entry point that enforces the trimming policy.
    /// - Unknown `id` is a no-op with no write.
    pub fn rename(&mut self, id: &str, new_title: impl Into<String>) {
        if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
            todo.title = new_title.into();
            self.persist();
        }
    }

    /// Removes every completed record in one update.
    ///
    /// Active records keep their relative order. Nothing completed is a
    /// no-op with no write.
    pub fn clear_completed(&mut self) {
        if !self.has_completed() {
            return;
        }
        self.todos.retain(|todo| !todo.done);
        self.persist();
    }

    /// Selects the active view filter. Purely in-memory, never persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Finalizes an in-progress title edit for the record matching `id`.
    ///
    /// # Contract
    /// - Non-empty trimmed text renames the record.
    /// - Text that trims to empty deletes the record instead. Deliberate
    ///   product policy: an edit that empties the title removes the item.
    pub fn commit_edit(&mut self, id: &str, raw_text: &str) {
        let text = raw_text.trim();
        if text.is_empty() {
            self.remove(id);
        } else {
            self.rename(id, text);
        }
    }

    /// Records visible under the active filter, order preserved.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .collect()
    }

    /// Count of records not yet completed.
    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.done).count()
    }

    /// Whether any record is completed. Drives the clear-completed
    /// affordance in the rendering layer.
    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|todo| todo.done)
    }

    fn persist(&self) {
        if let Err(err) = self.repo.save(&self.todos) {
            // Failure mode is "silently does not persist"; the in-memory
            // collection stays authoritative for this process.
            error!("event=snapshot_save module=store status=error error={err}");
        }
    }
}
