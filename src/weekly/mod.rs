pub mod aggregate;
pub mod exec;
pub mod fetch;
pub mod output;

pub use aggregate::{build_weekly_table, combine, resample_weekly, EventSources};
pub use exec::{exec, WeeklyOptions};
pub use fetch::{load_event_sources, SourcePaths};
pub use output::{output_json, output_ndjson, output_table};
