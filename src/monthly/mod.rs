pub mod exec;
pub mod output;

pub use exec::{exec, Layout, MonthlyPaths};
pub use output::{output_json, output_ndjson};
