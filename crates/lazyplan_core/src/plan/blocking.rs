//! Blocking dependency resolution.
//!
//! # Responsibility
//! - Hold the directed "blocked by" relation between todo items.
//! - Answer actionability, focus readiness and cycle questions.
//!
//! # Invariants
//! - Only `(blocked, blocker)` edges are stored; the reverse `blocking`
//!   index is derived from them and can never drift.
//! - Self edges are never inserted.
//!
//! # See also
//! - `service::item_detail_service` rejects edges that would form a cycle.

use crate::model::todo_item::{TodoItem, TodoItemId};
use std::collections::{BTreeSet, HashMap, HashSet};

/// One dependency edge: `blocked` cannot be done before `blocker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockingEdge {
    pub blocked: TodoItemId,
    pub blocker: TodoItemId,
}

/// Coarse dependency role of one item, used as a display tie-break.
///
/// Variant order is the sort order: free items first, waiting items last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlockingState {
    None,
    Blocking,
    Both,
    BlockedBy,
}

/// In-memory dependency graph with a derived reverse index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockingGraph {
    blocked_by: HashMap<TodoItemId, BTreeSet<TodoItemId>>,
    blocking: HashMap<TodoItemId, BTreeSet<TodoItemId>>,
}

impl BlockingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from persisted edges. Self edges are skipped.
    pub fn from_edges(edges: impl IntoIterator<Item = BlockingEdge>) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.insert(edge);
        }
        graph
    }

    /// Inserts one edge. Returns `false` for self edges and duplicates.
    pub fn insert(&mut self, edge: BlockingEdge) -> bool {
        if edge.blocked == edge.blocker {
            return false;
        }
        let added = self
            .blocked_by
            .entry(edge.blocked)
            .or_default()
            .insert(edge.blocker);
        self.blocking
            .entry(edge.blocker)
            .or_default()
            .insert(edge.blocked);
        added
    }

    /// Items that must be done before `item`.
    pub fn blocked_by(&self, item: TodoItemId) -> impl Iterator<Item = TodoItemId> + '_ {
        self.blocked_by.get(&item).into_iter().flatten().copied()
    }

    /// Items waiting on `item`.
    pub fn blocking(&self, item: TodoItemId) -> impl Iterator<Item = TodoItemId> + '_ {
        self.blocking.get(&item).into_iter().flatten().copied()
    }

    /// Whether `item` has no remaining blockers.
    pub fn is_actionable(&self, item: TodoItemId) -> bool {
        self.blocked_by
            .get(&item)
            .map_or(true, |blockers| blockers.is_empty())
    }

    pub fn blocking_state(&self, item: TodoItemId) -> BlockingState {
        let is_blocking = self
            .blocking
            .get(&item)
            .is_some_and(|blocked| !blocked.is_empty());
        let is_blocked = !self.is_actionable(item);
        match (is_blocking, is_blocked) {
            (false, false) => BlockingState::None,
            (true, false) => BlockingState::Blocking,
            (true, true) => BlockingState::Both,
            (false, true) => BlockingState::BlockedBy,
        }
    }

    /// Removes every edge where `blocker` is the blocker.
    ///
    /// This is the completion side effect: dependents of a finished item
    /// lose it as a blocker. Returns the items that were unblocked by it.
    pub fn clear_blocking(&mut self, blocker: TodoItemId) -> Vec<TodoItemId> {
        let released = self.blocking.remove(&blocker).unwrap_or_default();
        for blocked in &released {
            if let Some(blockers) = self.blocked_by.get_mut(blocked) {
                blockers.remove(&blocker);
                if blockers.is_empty() {
                    self.blocked_by.remove(blocked);
                }
            }
        }
        released.into_iter().collect()
    }

    /// Removes every edge where `blocked` is the blocked item.
    pub fn clear_blocked_by(&mut self, blocked: TodoItemId) {
        let blockers = self.blocked_by.remove(&blocked).unwrap_or_default();
        for blocker in blockers {
            if let Some(dependents) = self.blocking.get_mut(&blocker) {
                dependents.remove(&blocked);
                if dependents.is_empty() {
                    self.blocking.remove(&blocker);
                }
            }
        }
    }

    /// Removes an item and all its edges.
    pub fn remove_item(&mut self, item: TodoItemId) {
        self.clear_blocking(item);
        self.clear_blocked_by(item);
    }

    /// Whether adding `blocked -> blocker` would close a cycle.
    ///
    /// True when `blocker` already (transitively) waits on `blocked`.
    pub fn would_create_cycle(&self, blocked: TodoItemId, blocker: TodoItemId) -> bool {
        if blocked == blocker {
            return true;
        }
        let mut visited = HashSet::new();
        let mut stack = vec![blocker];
        while let Some(current) = stack.pop() {
            if current == blocked {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(self.blocked_by(current));
        }
        false
    }

    /// All edges in deterministic order.
    pub fn edges(&self) -> Vec<BlockingEdge> {
        let mut edges = self
            .blocked_by
            .iter()
            .flat_map(|(blocked, blockers)| {
                blockers.iter().map(|blocker| BlockingEdge {
                    blocked: *blocked,
                    blocker: *blocker,
                })
            })
            .collect::<Vec<_>>();
        edges.sort();
        edges
    }

    pub fn is_empty(&self) -> bool {
        self.blocked_by.is_empty()
    }
}

/// Blockers of today's items that are not themselves scheduled today.
///
/// Focus mode surfaces these so the user can pull them into today first.
/// Result is sorted by ID for stable output.
pub fn missing_focus_items(today_items: &[TodoItem], graph: &BlockingGraph) -> Vec<TodoItemId> {
    let today_ids = today_items.iter().map(|item| item.id).collect::<HashSet<_>>();
    let missing = today_items
        .iter()
        .flat_map(|item| graph.blocked_by(item.id))
        .filter(|blocker| !today_ids.contains(blocker))
        .collect::<BTreeSet<_>>();
    missing.into_iter().collect()
}

/// Whether focus mode can start: the first today item has no blockers.
pub fn is_doable(today_items: &[TodoItem], graph: &BlockingGraph) -> bool {
    today_items
        .first()
        .map_or(true, |item| graph.is_actionable(item.id))
}
