//! Domain model for the planning core.
//!
//! # Responsibility
//! - Define canonical data structures used by planning logic and storage.
//!
//! # Invariants
//! - Every todo item and project is identified by a stable UUID.
//! - Blocking relations live in one directed edge set, not on the records.

pub mod project;
pub mod repeat_state;
pub mod todo_item;
