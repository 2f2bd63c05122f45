//! Recurrence date arithmetic.
//!
//! # Responsibility
//! - Compute the next trigger date for one repeat rule.
//! - Advance an item's date until it is no longer in the past.
//! - Apply the "done" and "later" transitions of a plan item.
//!
//! # Invariants
//! - `increment(None, d) == d`.
//! - For repeating rules, `increment(s, d) > d` whenever it returns `Some`.
//! - After `increment_date`, a dated repeating item has `date >= now`
//!   unless calendar overflow stopped the loop.

use crate::model::repeat_state::RepeatState;
use crate::model::todo_item::TodoItem;
use chrono::{Days, Months, NaiveDateTime};

impl RepeatState {
    /// Returns `date` moved forward by one period of this rule.
    ///
    /// Month-based rules clamp to the last day of shorter months
    /// (Jan 31 + 1 month = Feb 28/29). Returns `None` on calendar overflow.
    pub fn increment(self, date: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::None => Some(date),
            Self::Daily => date.checked_add_days(Days::new(1)),
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::Biweekly => date.checked_add_days(Days::new(14)),
            Self::Triweekly => date.checked_add_days(Days::new(21)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Bimonthly => date.checked_add_months(Months::new(2)),
            Self::Quarterly => date.checked_add_months(Months::new(3)),
            Self::Halfyear => date.checked_add_months(Months::new(6)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        }
    }
}

/// Advances `item.date` period by period until it is not earlier than `now`.
///
/// At least one period is always applied, so a date that is already
/// current still moves to its next occurrence. Returns the number of periods applied. Items without a date or without
/// a repeat rule are left untouched.
pub fn increment_date(item: &mut TodoItem, now: NaiveDateTime) -> usize {
    let Some(mut date) = item.date else {
        return 0;
    };
    if !item.repeat_state.is_repeating() {
        return 0;
    }

    let mut steps = 0;
    loop {
        match item.repeat_state.increment(date) {
            Some(next) => {
                date = next;
                steps += 1;
            }
            None => break,
        }
        if date >= now {
            break;
        }
    }

    item.date = Some(date);
    steps
}

/// Marks `item` as handled for now.
///
/// One-off items are archived (`done = true`). Repeating items stay open
/// and move to their next occurrence.
pub fn complete(item: &mut TodoItem, now: NaiveDateTime) {
    if item.repeat_state.is_repeating() {
        increment_date(item, now);
    } else {
        item.done = true;
    }
}

/// Pushes `item` out of today.
///
/// One-off items lose their date. Repeating items skip to their next
/// occurrence.
pub fn postpone(item: &mut TodoItem, now: NaiveDateTime) {
    if item.repeat_state.is_repeating() {
        increment_date(item, now);
    } else {
        item.date = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{complete, increment_date, postpone};
    use crate::model::repeat_state::RepeatState;
    use crate::model::todo_item::TodoItem;
    use chrono::{Datelike, NaiveDate, NaiveDateTime};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid test date")
    }

    #[test]
    fn none_is_identity() {
        let date = at(2024, 3, 10, 9);
        assert_eq!(RepeatState::None.increment(date), Some(date));
    }

    #[test]
    fn every_repeating_rule_moves_forward() {
        let date = at(2024, 1, 31, 9);
        for state in RepeatState::display_order()
            .iter()
            .filter(|state| state.is_repeating())
        {
            let next = state.increment(date).expect("no overflow");
            assert!(next > date, "{state:?} did not move forward");
        }
    }

    #[test]
    fn periods_match_rule() {
        let date = at(2024, 1, 10, 9);
        assert_eq!(RepeatState::Daily.increment(date), Some(at(2024, 1, 11, 9)));
        assert_eq!(RepeatState::Weekly.increment(date), Some(at(2024, 1, 17, 9)));
        assert_eq!(RepeatState::Biweekly.increment(date), Some(at(2024, 1, 24, 9)));
        assert_eq!(RepeatState::Triweekly.increment(date), Some(at(2024, 1, 31, 9)));
        assert_eq!(RepeatState::Monthly.increment(date), Some(at(2024, 2, 10, 9)));
        assert_eq!(RepeatState::Bimonthly.increment(date), Some(at(2024, 3, 10, 9)));
        assert_eq!(RepeatState::Quarterly.increment(date), Some(at(2024, 4, 10, 9)));
        assert_eq!(RepeatState::Halfyear.increment(date), Some(at(2024, 7, 10, 9)));
        assert_eq!(RepeatState::Yearly.increment(date), Some(at(2025, 1, 10, 9)));
    }

    #[test]
    fn monthly_clamps_to_month_end() {
        let date = at(2024, 1, 31, 9);
        assert_eq!(RepeatState::Monthly.increment(date), Some(at(2024, 2, 29, 9)));
    }

    #[test]
    fn stale_monthly_item_catches_up_in_one_call() {
        let now = at(2024, 6, 15, 12);
        let mut item = TodoItem::new("rent")
            .scheduled(at(2016, 1, 7, 10))
            .repeating(RepeatState::Monthly);

        let steps = increment_date(&mut item, now);

        let date = item.date.expect("date kept");
        assert!(steps > 100);
        assert!(date >= now);
        assert_eq!((date.year(), date.month(), date.day()), (2024, 7, 7));
    }

    #[test]
    fn future_item_still_advances_once() {
        let now = at(2024, 6, 15, 12);
        let mut item = TodoItem::new("gym")
            .scheduled(at(2024, 6, 20, 7))
            .repeating(RepeatState::Weekly);

        assert_eq!(increment_date(&mut item, now), 1);
        assert_eq!(item.date, Some(at(2024, 6, 27, 7)));
    }

    #[test]
    fn undated_or_one_off_items_are_untouched() {
        let now = at(2024, 6, 15, 12);
        let mut undated = TodoItem::new("someday").repeating(RepeatState::Daily);
        assert_eq!(increment_date(&mut undated, now), 0);
        assert_eq!(undated.date, None);

        let past = at(2024, 6, 1, 12);
        let mut one_off = TodoItem::new("once").scheduled(past);
        assert_eq!(increment_date(&mut one_off, now), 0);
        assert_eq!(one_off.date, Some(past));
    }

    #[test]
    fn complete_archives_one_off_and_advances_repeating() {
        let now = at(2024, 6, 15, 12);
        let mut one_off = TodoItem::new("once").scheduled(at(2024, 6, 13, 9));
        complete(&mut one_off, now);
        assert!(one_off.done);
        assert_eq!(one_off.date, Some(at(2024, 6, 13, 9)));

        let mut daily = TodoItem::new("daily")
            .scheduled(at(2024, 6, 13, 9))
            .repeating(RepeatState::Daily);
        complete(&mut daily, now);
        assert!(!daily.done);
        assert_eq!(daily.date, Some(at(2024, 6, 16, 9)));
    }

    #[test]
    fn postpone_clears_one_off_date() {
        let now = at(2024, 6, 15, 12);
        let mut one_off = TodoItem::new("once").scheduled(at(2024, 6, 15, 9));
        postpone(&mut one_off, now);
        assert_eq!(one_off.date, None);
        assert!(!one_off.done);

        let mut weekly = TodoItem::new("weekly")
            .scheduled(at(2024, 6, 15, 9))
            .repeating(RepeatState::Weekly);
        postpone(&mut weekly, now);
        assert_eq!(weekly.date, Some(at(2024, 6, 22, 9)));
    }
}
