//! Storage adapter layer.
//!
//! # Responsibility
//! - Define the snapshot persistence contract used by the store.
//! - Isolate slot SQL and payload encoding from store orchestration.
//!
//! # Invariants
//! - The snapshot repository is the only code touching the `slots` table.
//! - Load corruption degrades to an empty collection, never an error.

pub mod snapshot_repo;
