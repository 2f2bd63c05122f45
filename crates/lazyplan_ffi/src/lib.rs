//! Flutter-facing bindings for the LazyPlan core.

pub mod api;
