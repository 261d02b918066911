//! # gantry-layout
//!
//! Hierarchical timeline layout engine for Gantt views.
//!
//! This crate provides:
//! - Visible date window resolution (`window`)
//! - Day/week/month column generation and annotation (`units`, `columns`)
//! - Date span to pixel bar mapping (`bars`)
//! - Group → sub-group → task row flattening with collapse support (`hierarchy`)
//! - Stable per-group palette slots (`palette`)
//! - The stateful `TimelineController` tying them together
//!
//! Every stage except the controller is a pure function of its inputs.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gantry_core::{LayoutConfig, WorkItem, ZoomLevel};
//! use gantry_layout::TimelineController;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
//! let mut timeline = TimelineController::new(LayoutConfig::default(), today)
//!     .with_zoom(ZoomLevel::Day)
//!     .with_items(vec![
//!         WorkItem::new("t1", "g1").sub_group("a").dates("2024-06-01", "2024-06-05"),
//!         WorkItem::new("t2", "g1").sub_group("a"),
//!     ]);
//!
//! assert_eq!(timeline.rows().len(), 4);
//! timeline.toggle_collapse("g1");
//! assert_eq!(timeline.rows().len(), 1);
//! ```

pub mod bars;
pub mod columns;
pub mod controller;
pub mod hierarchy;
pub mod palette;
pub mod units;
pub mod window;

pub use bars::{map_bar, span_bar};
pub use columns::{annotate_columns, month_bands};
pub use controller::TimelineController;
pub use hierarchy::build_rows;
pub use palette::color_for_group;
pub use units::generate_units;
pub use window::{default_window, resolve_window};
