//! Pure planning logic.
//!
//! # Responsibility
//! - Bucket items by date, advance recurring dates, resolve blocking
//!   dependencies and order items for display.
//!
//! # Invariants
//! - Nothing in this module touches storage or reads the system clock;
//!   "now" is always passed in.

pub mod actions;
pub mod archive;
pub mod blocking;
pub mod bucket;
pub mod clock;
pub mod ordering;
pub mod priority;
pub mod recurrence;
