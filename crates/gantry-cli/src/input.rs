//! Loading item lists and layout configuration from disk

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gantry_core::{calendar, LayoutConfig, WorkItem};

/// Read a JSON array of work items
pub fn load_items(path: &Path) -> Result<Vec<WorkItem>> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let items: Vec<WorkItem> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid item list", path.display()))?;
    tracing::info!(count = items.len(), path = %path.display(), "loaded work items");
    Ok(items)
}

/// Read a TOML layout configuration, or fall back to defaults
pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: LayoutConfig =
        toml::from_str(&raw).with_context(|| format!("{} is not a valid layout config", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid layout config in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded layout config");
    Ok(config)
}

/// A date field the engine will ignore because it does not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateProblem {
    pub item_id: String,
    pub field: &'static str,
    pub value: String,
}

pub fn date_problems(items: &[WorkItem]) -> Vec<DateProblem> {
    items
        .iter()
        .flat_map(|item| {
            [("startDate", &item.start_date), ("endDate", &item.end_date)]
                .into_iter()
                .filter_map(move |(field, value)| {
                    let value = value.as_deref()?;
                    calendar::parse_item_date(value).err().map(|_| DateProblem {
                        item_id: item.id.clone(),
                        field,
                        value: value.to_string(),
                    })
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_unparseable_dates() {
        let items = vec![
            WorkItem::new("a", "g").dates("2024-06-01", "soon"),
            WorkItem::new("b", "g").start(""),
            WorkItem::new("c", "g").end("31.12.2024"),
        ];
        assert_eq!(
            date_problems(&items),
            vec![
                DateProblem {
                    item_id: "a".into(),
                    field: "endDate",
                    value: "soon".into(),
                },
                DateProblem {
                    item_id: "c".into(),
                    field: "endDate",
                    value: "31.12.2024".into(),
                },
            ]
        );
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), LayoutConfig::default());
    }
}
