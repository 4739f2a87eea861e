pub mod aggregate;
pub mod exec;
pub mod output;

pub use aggregate::{count_states, days_since, last_commit, monthly_from_commits, newcomer_retention};
pub use exec::{exec_aggregate, exec_states, AggregateOptions, StatesOptions};
pub use output::{output_aggregate_json, output_aggregate_summary, output_states_json, output_states_table, write_monthly_csv};
