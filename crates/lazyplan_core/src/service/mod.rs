//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and pure planning logic into one
//!   service per screen (plan, focus, archive, projects, item detail).
//! - Keep UI/FFI layers decoupled from storage details.

pub mod archive_service;
pub mod error;
pub mod focus_service;
pub mod holiday_service;
pub mod item_detail_service;
pub mod plan_service;
pub mod project_service;
