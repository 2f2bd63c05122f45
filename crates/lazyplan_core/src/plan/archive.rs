//! Archive grouping and search.
//!
//! Done items are grouped by the uppercase first character of their name.
//! Items without a usable name go to the `-` section.

use crate::model::todo_item::TodoItem;
use std::collections::BTreeMap;

/// Section key for items with an empty or absent name.
pub const UNKNOWN_SECTION: char = '-';

/// Done items keyed by section letter, iterated in ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSections {
    sections: BTreeMap<char, Vec<TodoItem>>,
}

impl ArchiveSections {
    /// Groups done items; open items are ignored.
    pub fn group(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let mut sections: BTreeMap<char, Vec<TodoItem>> = BTreeMap::new();
        for item in items.into_iter().filter(|item| item.done) {
            sections.entry(section_key(&item)).or_default().push(item);
        }
        for items in sections.values_mut() {
            items.sort_by(|a, b| {
                a.name
                    .as_deref()
                    .unwrap_or_default()
                    .cmp(b.name.as_deref().unwrap_or_default())
            });
        }
        Self { sections }
    }

    /// Keeps items whose name contains `term`, ignoring case.
    ///
    /// Sections left empty are dropped. A blank term returns a clone.
    pub fn search(&self, term: &str) -> Self {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        let sections = self
            .sections
            .iter()
            .filter_map(|(key, items)| {
                let matches = items
                    .iter()
                    .filter(|item| {
                        item.name
                            .as_deref()
                            .is_some_and(|name| name.to_lowercase().contains(&needle))
                    })
                    .cloned()
                    .collect::<Vec<_>>();
                (!matches.is_empty()).then_some((*key, matches))
            })
            .collect();
        Self { sections }
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.sections.keys().copied()
    }

    pub fn section(&self, key: char) -> Option<&[TodoItem]> {
        self.sections.get(&key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[TodoItem])> {
        self.sections
            .iter()
            .map(|(key, items)| (*key, items.as_slice()))
    }

    pub fn total_items(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// All grouped items in section order.
    pub fn into_items(self) -> Vec<TodoItem> {
        self.sections.into_values().flatten().collect()
    }
}

fn section_key(item: &TodoItem) -> char {
    item.display_name()
        .and_then(|name| name.chars().next())
        .and_then(|first| first.to_uppercase().next())
        .unwrap_or(UNKNOWN_SECTION)
}
