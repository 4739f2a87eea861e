//! Repository activity charts from CSV exports.
//!
//! Three jobs share this crate: the `trends` and `contributors` monthly
//! plotters, and the `weekly` plotter that resamples raw commit, PR and issue
//! timestamps into Sunday-ending weeks. `aggregate` and `states` derive the
//! monthly table and PR/issue state counts from per-item exports.

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod monthly;
pub mod render;
pub mod tui;
pub mod util;
pub mod weekly;
