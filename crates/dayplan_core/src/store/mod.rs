//! Authoritative todo state container.
//!
//! # Responsibility
//! - Own the ordered collection and the active view filter.
//! - Orchestrate snapshot persistence around every collection mutation.
//!
//! # Invariants
//! - All collection access goes through `TodoStore`; there is no ambient
//!   shared state.

pub mod todo_store;
