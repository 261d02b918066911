//! Row hierarchy types
//!
//! The flattened row list is the single source of truth for both the label
//! column and the time grid: row `i` in one is row `i` in the other.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::RowHeights;
use crate::{GroupId, SubGroupId};

/// Indent level of group rows
pub const GROUP_INDENT: usize = 0;
/// Indent level of sub-group rows
pub const SUB_GROUP_INDENT: usize = 1;
/// Indent level of task rows
pub const TASK_INDENT: usize = 2;

/// One line of the timeline
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    #[serde(flatten)]
    pub kind: RowKind,
    pub height: u32,
    pub indent: usize,
}

/// What a row stands for. Items are referenced by index into the item list
/// the rows were built from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowKind {
    Group {
        group_id: GroupId,
        name: String,
        collapsed: bool,
        item_count: usize,
        color_index: usize,
        /// Every item of the group, kept even when collapsed so summary
        /// bars can still be drawn
        items: Vec<usize>,
    },
    #[serde(rename = "subgroup")]
    SubGroup {
        group_id: GroupId,
        /// `None` for the synthetic "ungrouped" bucket
        sub_group_id: Option<SubGroupId>,
        name: String,
        accent_color: Option<String>,
        item_count: usize,
    },
    Task { item: usize },
}

impl RowKind {
    pub fn indent(&self) -> usize {
        match self {
            RowKind::Group { .. } => GROUP_INDENT,
            RowKind::SubGroup { .. } => SUB_GROUP_INDENT,
            RowKind::Task { .. } => TASK_INDENT,
        }
    }
}

impl Row {
    /// Height and indent both follow from the row kind
    pub fn new(kind: RowKind, heights: &RowHeights) -> Self {
        Self {
            height: heights.for_kind(&kind),
            indent: kind.indent(),
            kind,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, RowKind::Group { .. })
    }

    pub fn is_task(&self) -> bool {
        matches!(self.kind, RowKind::Task { .. })
    }

    /// Index of the item behind a task row
    pub fn task_item(&self) -> Option<usize> {
        match self.kind {
            RowKind::Task { item } => Some(item),
            _ => None,
        }
    }
}

/// Set of collapsed group ids, owned by the controller and passed into the
/// hierarchy builder by reference
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseState {
    collapsed: BTreeSet<GroupId>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, group_id: &str) -> bool {
        self.collapsed.contains(group_id)
    }

    /// Returns `true` if the group was expanded before
    pub fn collapse(&mut self, group_id: impl Into<GroupId>) -> bool {
        self.collapsed.insert(group_id.into())
    }

    /// Returns `true` if the group was collapsed before
    pub fn expand(&mut self, group_id: &str) -> bool {
        self.collapsed.remove(group_id)
    }

    /// Flip one group; returns the new collapsed state
    pub fn toggle(&mut self, group_id: &str) -> bool {
        if self.expand(group_id) {
            false
        } else {
            self.collapse(group_id)
        }
    }

    pub fn clear(&mut self) {
        self.collapsed.clear();
    }

    pub fn len(&self) -> usize {
        self.collapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.collapsed.iter().map(String::as_str)
    }
}

impl<S: Into<GroupId>> FromIterator<S> for CollapseState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            collapsed: iter.into_iter().map(Into::into).collect(),
        }
    }
}
