use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "actplot")]
#[command(about = "Chart and summarize repository activity from commit, contributor, PR and issue CSV exports")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to an actplot.toml configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Only plot data from this date on (RFC3339, YYYY-MM-DD, or natural language)")]
    pub since: Option<String>,

    #[arg(long, global = true, help = "Only plot data up to this date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub until: Option<String>,

    #[arg(long, global = true, help = "Image width in pixels")]
    pub width: Option<u32>,

    #[arg(long, global = true, help = "Image height in pixels")]
    pub height: Option<u32>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Total commits, unique contributors and average commits per contributor by month
    Trends {
        #[arg(long, help = "Monthly metrics CSV")]
        input: Option<PathBuf>,

        #[arg(long, help = "Image to write (.png or .svg)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Maximum number of month labels per panel")]
        max_labels: Option<usize>,

        #[arg(long, help = "Output the sorted table as JSON instead of plotting")]
        json: bool,

        #[arg(long, help = "Output the sorted table as NDJSON instead of plotting")]
        ndjson: bool,
    },
    /// Contributors, commits and mean commits per contributor in three panels
    Contributors {
        #[arg(long, help = "Monthly metrics CSV")]
        input: Option<PathBuf>,

        #[arg(long, help = "Image to write (.png or .svg)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Maximum number of month labels per panel")]
        max_labels: Option<usize>,

        #[arg(long, help = "Output the sorted table as JSON instead of plotting")]
        json: bool,

        #[arg(long, help = "Output the sorted table as NDJSON instead of plotting")]
        ndjson: bool,
    },
    /// Weekly commit, PR and issue counts from raw timestamp files
    Weekly {
        #[arg(long, help = "Commit timestamps CSV (no header)")]
        commits: Option<PathBuf>,

        #[arg(long, help = "Pull request timestamps CSV (no header)")]
        prs: Option<PathBuf>,

        #[arg(long, help = "Issue timestamps CSV (no header)")]
        issues: Option<PathBuf>,

        #[arg(long, help = "Write the chart to this image instead of opening the viewer")]
        output: Option<PathBuf>,

        #[arg(long, help = "Chart title")]
        title: Option<String>,

        #[arg(long, help = "Output weekly buckets as JSON")]
        json: bool,

        #[arg(long, help = "Output weekly buckets as NDJSON")]
        ndjson: bool,
    },
    /// Monthly commit metrics, newcomer retention and last-commit age from a per-commit export
    Aggregate {
        #[arg(long, help = "Per-commit CSV with author and date columns")]
        commits: Option<PathBuf>,

        #[arg(long, help = "Monthly metrics CSV to write (read by `trends`)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Output the monthly table and summary as JSON instead of writing")]
        json: bool,
    },
    /// Open, closed and merged counts from pull request and issue state exports
    States {
        #[arg(long, help = "Pull request CSV with a state column and optional merged_at")]
        prs: Option<PathBuf>,

        #[arg(long, help = "Issue CSV with a state column")]
        issues: Option<PathBuf>,

        #[arg(long, help = "Output counts as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init(self.common.verbose).context("Failed to install log subscriber")?;
        let config = crate::config::PlotConfig::load(self.common.config.as_deref())
            .context("Failed to load configuration")?;

        match self.command {
            Commands::Trends { input, output, max_labels, json, ndjson } => {
                let paths = crate::monthly::MonthlyPaths {
                    input: input.unwrap_or(config.trends.input),
                    output: output.unwrap_or(config.trends.output),
                };
                let size = (
                    self.common.width.unwrap_or(config.trends.width),
                    self.common.height.unwrap_or(config.trends.height),
                );
                crate::monthly::exec(
                    &self.common,
                    crate::monthly::Layout::Trends,
                    paths,
                    size,
                    max_labels.unwrap_or(config.trends.max_labels),
                    json,
                    ndjson,
                )
            }
            Commands::Contributors { input, output, max_labels, json, ndjson } => {
                let paths = crate::monthly::MonthlyPaths {
                    input: input.unwrap_or(config.contributors.input),
                    output: output.unwrap_or(config.contributors.output),
                };
                let size = (
                    self.common.width.unwrap_or(config.contributors.width),
                    self.common.height.unwrap_or(config.contributors.height),
                );
                crate::monthly::exec(
                    &self.common,
                    crate::monthly::Layout::Contributors,
                    paths,
                    size,
                    max_labels.unwrap_or(config.contributors.max_labels),
                    json,
                    ndjson,
                )
            }
            Commands::Weekly { commits, prs, issues, output, title, json, ndjson } => {
                let weekly = config.weekly;
                let sources = crate::weekly::SourcePaths {
                    commits: commits.unwrap_or(weekly.commits),
                    prs: prs.unwrap_or(weekly.prs),
                    issues: issues.unwrap_or(weekly.issues),
                };
                let opts = crate::weekly::WeeklyOptions {
                    output: output.or(weekly.output),
                    title: title.unwrap_or(weekly.title),
                    size: (
                        self.common.width.unwrap_or(weekly.width),
                        self.common.height.unwrap_or(weekly.height),
                    ),
                    json,
                    ndjson,
                };
                crate::weekly::exec(&self.common, sources, opts)
            }
            Commands::Aggregate { commits, output, json } => {
                let opts = crate::metrics::AggregateOptions {
                    commits: commits.unwrap_or(config.aggregate.commits),
                    output: output.unwrap_or(config.aggregate.output),
                    json,
                };
                crate::metrics::exec_aggregate(&self.common, opts)
            }
            Commands::States { prs, issues, json } => {
                crate::metrics::exec_states(crate::metrics::StatesOptions { prs, issues, json })
            }
        }
    }
}
