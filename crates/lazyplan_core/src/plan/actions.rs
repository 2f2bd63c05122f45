//! Row actions offered for a plan item.

use crate::model::todo_item::TodoItem;
use crate::plan::blocking::BlockingGraph;
use crate::plan::bucket::PlanSection;
use serde::{Deserialize, Serialize};

/// Swipe action on a plan row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanItemAction {
    Done,
    Delete,
    Later,
    Split,
}

/// Actions available for `item` shown in `section`.
///
/// `Done` requires the item to be unblocked. `Split` only exists for
/// repeating items in missed or today.
pub fn available_actions(
    item: &TodoItem,
    section: PlanSection,
    graph: &BlockingGraph,
) -> Vec<PlanItemAction> {
    let mut actions = Vec::with_capacity(4);
    if graph.is_actionable(item.id) {
        actions.push(PlanItemAction::Done);
    }
    actions.push(PlanItemAction::Delete);

    let repeating = item.repeat_state.is_repeating();
    match section {
        PlanSection::Missed => {
            if repeating {
                actions.push(PlanItemAction::Split);
            }
        }
        PlanSection::Today => {
            actions.push(PlanItemAction::Later);
            if repeating {
                actions.push(PlanItemAction::Split);
            }
        }
        PlanSection::Later => {}
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::{available_actions, PlanItemAction};
    use crate::model::repeat_state::RepeatState;
    use crate::model::todo_item::TodoItem;
    use crate::plan::blocking::{BlockingEdge, BlockingGraph};
    use crate::plan::bucket::PlanSection;

    #[test]
    fn blocked_items_cannot_be_done() {
        let blocked = TodoItem::new("blocked");
        let blocker = TodoItem::new("blocker");
        let graph = BlockingGraph::from_edges([BlockingEdge {
            blocked: blocked.id,
            blocker: blocker.id,
        }]);

        assert_eq!(
            available_actions(&blocked, PlanSection::Today, &graph),
            vec![PlanItemAction::Delete, PlanItemAction::Later]
        );
        assert_eq!(
            available_actions(&blocker, PlanSection::Later, &graph),
            vec![PlanItemAction::Done, PlanItemAction::Delete]
        );
    }

    #[test]
    fn split_only_for_repeating_items_outside_later() {
        let graph = BlockingGraph::new();
        let weekly = TodoItem::new("weekly").repeating(RepeatState::Weekly);

        assert_eq!(
            available_actions(&weekly, PlanSection::Missed, &graph),
            vec![PlanItemAction::Done, PlanItemAction::Delete, PlanItemAction::Split]
        );
        assert_eq!(
            available_actions(&weekly, PlanSection::Today, &graph),
            vec![
                PlanItemAction::Done,
                PlanItemAction::Delete,
                PlanItemAction::Later,
                PlanItemAction::Split
            ]
        );
        assert!(!available_actions(&weekly, PlanSection::Later, &graph)
            .contains(&PlanItemAction::Split));
        assert!(!available_actions(&TodoItem::new("once"), PlanSection::Missed, &graph)
            .contains(&PlanItemAction::Split));
    }
}
