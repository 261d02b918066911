//! Row hierarchy: group → sub-group → task
//!
//! Items are bucketed in first-seen order at both levels, so the same input
//! and collapse state always flatten to the same rows. A collapsed group
//! emits only its own row but keeps the indices of all its items for summary
//! bars.

use std::collections::HashMap;
use std::hash::Hash;

use gantry_core::{CollapseState, LayoutConfig, Row, RowKind, TimelineItem};

use crate::palette::color_for_group;

/// Label of the synthetic bucket for items without a sub-group
pub const UNGROUPED_LABEL: &str = "Ungrouped";

/// Partition `indices` by key, preserving first-seen order of keys and of
/// indices within each bucket.
fn bucket_by<K, F>(indices: impl IntoIterator<Item = usize>, mut key: F) -> Vec<(K, Vec<usize>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(usize) -> K,
{
    let mut buckets: Vec<(K, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();
    for index in indices {
        let k = key(index);
        match positions.get(&k) {
            Some(&position) => buckets[position].1.push(index),
            None => {
                positions.insert(k.clone(), buckets.len());
                buckets.push((k, vec![index]));
            }
        }
    }
    buckets
}

/// Distinct group ids in first-seen order
pub fn group_ids(items: &[TimelineItem]) -> Vec<&str> {
    bucket_by(0..items.len(), |i| items[i].group_id())
        .into_iter()
        .map(|(id, _)| id)
        .collect()
}

/// Flatten items into display rows honoring collapse state
pub fn build_rows(items: &[TimelineItem], collapsed: &CollapseState, config: &LayoutConfig) -> Vec<Row> {
    let heights = &config.row_heights;
    let mut rows = Vec::new();

    for (group_id, members) in bucket_by(0..items.len(), |i| items[i].group_id()) {
        let is_collapsed = collapsed.is_collapsed(group_id);
        let group = RowKind::Group {
            group_id: group_id.to_string(),
            name: group_name(items, &members, group_id),
            collapsed: is_collapsed,
            item_count: members.len(),
            color_index: color_for_group(group_id, config.palette_size),
            items: members.clone(),
        };
        rows.push(Row::new(group, heights));
        if is_collapsed {
            continue;
        }

        for (sub_group_id, tasks) in bucket_by(members, |i| items[i].sub_group_id()) {
            let sub_group = RowKind::SubGroup {
                group_id: group_id.to_string(),
                sub_group_id: sub_group_id.map(String::from),
                name: sub_group_name(items, &tasks, sub_group_id),
                accent_color: tasks
                    .iter()
                    .find_map(|&i| items[i].item.accent_color.clone()),
                item_count: tasks.len(),
            };
            rows.push(Row::new(sub_group, heights));
            rows.extend(
                tasks
                    .into_iter()
                    .map(|item| Row::new(RowKind::Task { item }, heights)),
            );
        }
    }

    rows
}

fn group_name(items: &[TimelineItem], members: &[usize], group_id: &str) -> String {
    members
        .iter()
        .map(|&i| items[i].item.group_name.trim())
        .find(|name| !name.is_empty())
        .unwrap_or(group_id)
        .to_string()
}

fn sub_group_name(items: &[TimelineItem], members: &[usize], sub_group_id: Option<&str>) -> String {
    members
        .iter()
        .filter_map(|&i| items[i].item.sub_group_name.as_deref())
        .map(str::trim)
        .find(|name| !name.is_empty())
        .or(sub_group_id)
        .unwrap_or(UNGROUPED_LABEL)
        .to_string()
}
