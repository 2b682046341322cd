use std::collections::BTreeSet;

use tracing::debug;

use crate::column::Column;

/// Expanded/collapsed flag per column id. Every column starts expanded,
/// including columns that show up in a later re-supplied list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    known: BTreeSet<String>,
    expanded: BTreeSet<String>,
}

impl ColumnVisibility {
    pub fn for_columns(columns: &[Column]) -> Self {
        let mut visibility = Self::default();
        visibility.sync(columns);
        visibility
    }

    /// Adopts a freshly supplied column list. Returns whether the set of
    /// tracked ids changed.
    pub fn sync(&mut self, columns: &[Column]) -> bool {
        let current = columns
            .iter()
            .map(|column| column.id.clone())
            .collect::<BTreeSet<_>>();
        if current == self.known {
            return false;
        }

        for id in current.difference(&self.known) {
            self.expanded.insert(id.clone());
        }
        self.expanded.retain(|id| current.contains(id));
        self.known = current;
        true
    }

    pub fn is_expanded(&self, column_id: &str) -> bool {
        self.expanded.contains(column_id)
    }

    /// Returns the new expanded state. Ids outside the current column list are
    /// ignored and report `false`.
    pub fn toggle(&mut self, column_id: &str) -> bool {
        if !self.known.contains(column_id) {
            debug!(column = %column_id, "toggle ignored: unknown column");
            return false;
        }

        let now_expanded = if self.expanded.remove(column_id) {
            false
        } else {
            self.expanded.insert(column_id.to_string());
            true
        };
        debug!(column = %column_id, expanded = now_expanded, "column visibility toggled");
        now_expanded
    }

    pub fn collapse(&mut self, column_id: &str) {
        if self.is_expanded(column_id) {
            self.toggle(column_id);
        }
    }

    pub fn expand(&mut self, column_id: &str) {
        if !self.is_expanded(column_id) {
            self.toggle(column_id);
        }
    }

    pub fn expanded_ids(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}
