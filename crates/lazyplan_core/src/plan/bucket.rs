//! Date bucketing for the plan screen.
//!
//! # Responsibility
//! - Classify open items into missed / today / later relative to "now".
//! - Produce ordered sections plus the counts used by the badge.
//!
//! # Invariants
//! - Missed, today and later partition the open items: every open item
//!   lands in exactly one section.
//! - Done items never appear in a plan section.

use crate::model::todo_item::TodoItem;
use crate::plan::ordering::PlanOrder;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const LAST_SECOND_OF_DAY: i64 = 24 * 60 * 60 - 1;

/// Plan screen section, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSection {
    Missed,
    Today,
    Later,
}

/// 00:00:00 on the calendar day of `now`.
pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN)
}

/// 23:59:59 on the calendar day of `now`.
pub fn end_of_day(now: NaiveDateTime) -> NaiveDateTime {
    start_of_day(now) + Duration::seconds(LAST_SECOND_OF_DAY)
}

/// Section for an optional scheduled date.
pub fn section_for(date: Option<NaiveDateTime>, now: NaiveDateTime) -> PlanSection {
    match date {
        None => PlanSection::Later,
        Some(date) if date < start_of_day(now) => PlanSection::Missed,
        Some(date) if date <= end_of_day(now) => PlanSection::Today,
        Some(_) => PlanSection::Later,
    }
}

/// Ordered plan sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSections {
    pub missed: Vec<TodoItem>,
    pub today: Vec<TodoItem>,
    pub later: Vec<TodoItem>,
}

impl PlanSections {
    pub fn items(&self, section: PlanSection) -> &[TodoItem] {
        match section {
            PlanSection::Missed => &self.missed,
            PlanSection::Today => &self.today,
            PlanSection::Later => &self.later,
        }
    }

    /// Finds which section currently holds `item`.
    pub fn section_of(&self, item: &TodoItem) -> Option<PlanSection> {
        [PlanSection::Missed, PlanSection::Today, PlanSection::Later]
            .into_iter()
            .find(|section| self.items(*section).iter().any(|candidate| candidate.id == item.id))
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            total_missed: self.missed.len(),
            total_today: self.today.len(),
            total_later: self.later.len(),
        }
    }
}

/// Section counts consumed by the badge and the "all done" banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_missed: usize,
    pub total_today: usize,
    pub total_later: usize,
}

impl PlanSummary {
    pub fn total(&self) -> usize {
        self.total_missed + self.total_today + self.total_later
    }

    /// Number shown on the app icon badge.
    pub fn badge_count(&self) -> usize {
        self.total_missed + self.total_today
    }

    pub fn is_done_for_now(&self) -> bool {
        self.badge_count() == 0
    }

    pub fn is_done_totally(&self) -> bool {
        self.total() == 0
    }
}

/// Splits open items into ordered sections. Done items are dropped.
pub fn bucketize(
    items: impl IntoIterator<Item = TodoItem>,
    now: NaiveDateTime,
    order: &PlanOrder<'_>,
) -> PlanSections {
    let mut sections = PlanSections::default();
    for item in items.into_iter().filter(|item| !item.done) {
        match section_for(item.date, now) {
            PlanSection::Missed => sections.missed.push(item),
            PlanSection::Today => sections.today.push(item),
            PlanSection::Later => sections.later.push(item),
        }
    }

    sections.missed.sort_by(|a, b| order.compare(a, b));
    sections.today.sort_by(|a, b| order.compare(a, b));
    sections.later.sort_by(|a, b| order.compare_later(a, b));
    sections
}

#[cfg(test)]
mod tests {
    use super::{bucketize, end_of_day, section_for, start_of_day, PlanSection};
    use crate::model::todo_item::TodoItem;
    use crate::plan::blocking::BlockingGraph;
    use crate::plan::ordering::{PlanOrder, ProjectPriorities};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|date| date.and_hms_opt(14, 30, 0))
            .expect("valid test date")
    }

    #[test]
    fn day_boundaries_are_inclusive_for_today() {
        let now = now();
        assert_eq!(section_for(Some(start_of_day(now)), now), PlanSection::Today);
        assert_eq!(section_for(Some(end_of_day(now)), now), PlanSection::Today);
        assert_eq!(
            section_for(Some(start_of_day(now) - Duration::seconds(1)), now),
            PlanSection::Missed
        );
        assert_eq!(
            section_for(Some(end_of_day(now) + Duration::seconds(1)), now),
            PlanSection::Later
        );
        assert_eq!(section_for(None, now), PlanSection::Later);
    }

    #[test]
    fn bucketize_partitions_open_items_and_drops_done() {
        let now = now();
        let missed = TodoItem::new("missed").scheduled(now - Duration::days(2));
        let today = TodoItem::new("today").scheduled(now);
        let later = TodoItem::new("later").scheduled(now + Duration::days(3));
        let undated = TodoItem::new("undated");
        let mut done = TodoItem::new("done").scheduled(now);
        done.done = true;

        let priorities = ProjectPriorities::default();
        let graph = BlockingGraph::new();
        let order = PlanOrder::new(&priorities, &graph);
        let sections = bucketize(
            vec![missed.clone(), today.clone(), later.clone(), undated.clone(), done],
            now,
            &order,
        );

        assert_eq!(sections.missed, vec![missed]);
        assert_eq!(sections.today, vec![today.clone()]);
        assert_eq!(sections.later, vec![undated, later]);
        assert_eq!(sections.section_of(&today), Some(PlanSection::Today));

        let summary = sections.summary();
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.badge_count(), 2);
        assert!(!summary.is_done_for_now());
    }
}
