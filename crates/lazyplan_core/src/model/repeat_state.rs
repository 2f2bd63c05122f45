//! Recurrence rule attached to a todo item.
//!
//! # Responsibility
//! - Enumerate supported repeat rules and their stable persisted codes.
//! - Provide picker ordering and display labels for UI callers.
//!
//! # Invariants
//! - `RepeatState::None` is the only non-repeating rule.
//! - Persisted codes are stable and never reused for another rule.
//!
//! Date arithmetic lives in `plan::recurrence`.

use serde::{Deserialize, Serialize};

/// Recurrence rule for a todo item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatState {
    /// One-off item.
    #[default]
    None,
    Daily,
    Weekly,
    Biweekly,
    Triweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    Halfyear,
    Yearly,
}

const DISPLAY_ORDER: &[RepeatState] = &[
    RepeatState::None,
    RepeatState::Daily,
    RepeatState::Weekly,
    RepeatState::Biweekly,
    RepeatState::Triweekly,
    RepeatState::Monthly,
    RepeatState::Bimonthly,
    RepeatState::Quarterly,
    RepeatState::Halfyear,
    RepeatState::Yearly,
];

impl RepeatState {
    /// Returns all rules in picker order.
    pub fn display_order() -> &'static [RepeatState] {
        DISPLAY_ORDER
    }

    /// Returns whether completing the item advances its date instead of
    /// archiving it.
    pub fn is_repeating(self) -> bool {
        self != Self::None
    }

    /// User-facing label. `None` has no label because the picker shows it
    /// as an empty choice.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Daily => Some("daily"),
            Self::Weekly => Some("weekly"),
            Self::Biweekly => Some("bi-weekly"),
            Self::Triweekly => Some("tri-weekly"),
            Self::Monthly => Some("monthly"),
            Self::Bimonthly => Some("bi-monthly"),
            Self::Quarterly => Some("quarterly"),
            Self::Halfyear => Some("every 6 months"),
            Self::Yearly => Some("yearly"),
        }
    }

    /// Stable storage code written to `todo_items.repeat_state`.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Triweekly => "triweekly",
            Self::Monthly => "monthly",
            Self::Bimonthly => "bimonthly",
            Self::Quarterly => "quarterly",
            Self::Halfyear => "halfyear",
            Self::Yearly => "yearly",
        }
    }

    /// Parses a storage code. Returns `None` for unknown codes.
    pub fn from_code(value: &str) -> Option<Self> {
        DISPLAY_ORDER
            .iter()
            .copied()
            .find(|state| state.as_code() == value)
    }
}
