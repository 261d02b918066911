//! CLI integration tests
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Timeline rendered, or check passed |
//! | 1 | Unreadable input, invalid config, or a strict check failure |

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const ITEMS: &str = r#"[
  {"id": "t1", "groupId": "relaunch", "groupName": "Website Relaunch",
   "subGroupId": "design", "subGroupName": "Design", "label": "Wireframes",
   "startDate": "2024-06-01", "endDate": "2024-06-05"},
  {"id": "t2", "groupId": "relaunch", "subGroupId": "design", "label": "Sign-off",
   "startDate": "2024-06-10", "endDate": "2024-06-10", "isOverdue": true},
  {"id": "t3", "groupId": "relaunch", "subGroupId": "design", "label": "Copywriting"},
  {"id": "t4", "groupId": "audit", "groupName": "Security Audit", "label": "Pen test",
   "startDate": "2024-07-01", "endDate": "someday"}
]"#;

fn gantry() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gantry"))
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn layout(items: &Path, args: &[&str]) -> Output {
    gantry()
        .arg("layout")
        .arg(items)
        .args(["--today", "2024-06-17"])
        .args(args)
        .output()
        .unwrap()
}

fn json_rows(output: &Output) -> Vec<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    value["rows"].as_array().unwrap().clone()
}

#[test]
fn text_layout_succeeds() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);

    let output = layout(&items, &[]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("▼ Website Relaunch"));
    assert!(stdout.contains("    Wireframes"));
    assert!(stdout.contains("▼ Security Audit"));
}

#[test]
fn json_layout_lists_every_row() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);

    let output = layout(&items, &["--format", "json", "--zoom", "day"]);
    assert_eq!(output.status.code(), Some(0));
    let rows = json_rows(&output);
    // two groups, two sub-groups, four tasks
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0]["kind"], "group");
    assert_eq!(rows[1]["kind"], "subgroup");
    assert!(rows[4]["bar"].is_null());
}

#[test]
fn collapse_flags_hide_tasks() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);

    let one = layout(&items, &["--format", "json", "--collapse", "relaunch"]);
    assert_eq!(json_rows(&one).len(), 4);

    let all = layout(&items, &["--format", "json", "--collapse-all"]);
    let rows = json_rows(&all);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["collapsed"] == true));
}

#[test]
fn unknown_collapse_id_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);

    let output = layout(&items, &["--format", "json", "--collapse", "nope"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(json_rows(&output).len(), 8);
}

#[test]
fn output_file_is_written() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);
    let out = dir.path().join("timeline.txt");

    let output = layout(&items, &["--output", out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(fs::read_to_string(&out).unwrap().contains("Pen test"));
}

#[test]
fn config_file_sets_unit_width() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);
    let config = write_file(&dir, "gantry.toml", "[unit_widths]\nweek = 50.0\n");

    let output = layout(&items, &["--format", "json", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["unit_width"], 50.0);
}

#[test]
fn invalid_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);
    let config = write_file(&dir, "gantry.toml", "[unit_widths]\nday = 0.0\n");

    let output = layout(&items, &["--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid layout config"));
}

#[test]
fn malformed_items_exit_1() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", "{\"id\": \"not a list\"}");

    let output = layout(&items, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not a valid item list"));
}

#[test]
fn missing_items_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let output = layout(&dir.path().join("missing.json"), &[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn empty_item_list_still_renders() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", "[]");

    let output = layout(&items, &["--format", "json"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(json_rows(&output).is_empty());
}

#[test]
fn check_reports_unreadable_dates() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);

    let output = gantry().arg("check").arg(&items).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Items:  4 (2 scheduled, 2 without a bar)"));
    assert!(stdout.contains("Groups: 2"));
    assert!(stdout.contains("item t4 has an unreadable endDate \"someday\""));

    let strict = gantry().arg("check").arg("--strict").arg(&items).output().unwrap();
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn default_config_round_trips() {
    let output = gantry().arg("config").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[unit_widths]"));
    assert!(stdout.contains("palette_size = 8"));
}

#[test]
fn empty_item_list_warns_on_stderr() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", "[]");

    let output = layout(&items, &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no work items to lay out"));
}

#[test]
fn cell_width_flag_controls_header_labels() {
    let dir = TempDir::new().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);

    let wide = layout(&items, &["--zoom", "week"]);
    assert!(String::from_utf8_lossy(&wide.stdout).contains("10/06"));

    let narrow = layout(&items, &["--zoom", "week", "--cell-width", "3"]);
    assert_eq!(narrow.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&narrow.stdout).contains("10…"));
}
