//! Optional `actplot.toml` configuration.
//!
//! ```toml
//! [trends]
//! input = "final-report/average_commits_per_contributor.csv"
//! output = "final-report/activity_trends.png"
//! max_labels = 24
//!
//! [contributors]
//! max_labels = 8
//!
//! [weekly]
//! commits = "data/commits_2024.csv"
//! title = "GitHub Activity in 2024 (weekly)"
//!
//! [aggregate]
//! commits = "data/commit_authors.csv"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file,
//! and the file over the built-in defaults.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "actplot.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub trends: TrendsConfig,
    pub contributors: ContributorsConfig,
    pub weekly: WeeklyConfig,
    pub aggregate: AggregateConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub max_labels: usize,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("final-report/average_commits_per_contributor.csv"),
            output: PathBuf::from("final-report/activity_trends.png"),
            width: 1500,
            height: 1200,
            max_labels: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContributorsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Upper bound on x-axis labels per panel; ticks stay on every month.
    pub max_labels: usize,
}

impl Default for ContributorsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("final-report/monthly_contributor_metrics.csv"),
            output: PathBuf::from("final-report/contributor_metrics.png"),
            width: 1500,
            height: 1500,
            max_labels: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeeklyConfig {
    pub commits: PathBuf,
    pub prs: PathBuf,
    pub issues: PathBuf,
    /// When set, the chart is written here instead of opening the viewer.
    pub output: Option<PathBuf>,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WeeklyConfig {
    fn default() -> Self {
        Self {
            commits: PathBuf::from("commits_2024.csv"),
            prs: PathBuf::from("prs_2024.csv"),
            issues: PathBuf::from("issues_2024.csv"),
            output: None,
            title: "GitHub Activity (weekly)".to_string(),
            width: 1500,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Per-commit export with author and date columns.
    pub commits: PathBuf,
    pub output: PathBuf,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            commits: PathBuf::from("commit_authors.csv"),
            output: PathBuf::from("final-report/average_commits_per_contributor.csv"),
        }
    }
}

impl PlotConfig {
    /// Loads `explicit` if given, else `actplot.toml` in the working
    /// directory when present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::from_file(fallback)
        } else {
            debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
