use super::aggregate::EventSources;
use crate::ingest::read_timestamps;
use crate::model::{EventKind, WeeklySource};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::warn;

/// Input file per event category.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub commits: PathBuf,
    pub prs: PathBuf,
    pub issues: PathBuf,
}

impl SourcePaths {
    pub fn path(&self, kind: EventKind) -> &PathBuf {
        match kind {
            EventKind::Commits => &self.commits,
            EventKind::PullRequests => &self.prs,
            EventKind::Issues => &self.issues,
        }
    }
}

pub fn load_event_sources(
    paths: &SourcePaths,
    show_progress: bool,
) -> anyhow::Result<(EventSources, Vec<WeeklySource>)> {
    let pb = if show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut sources = EventSources::default();
    let mut summary = Vec::with_capacity(EventKind::ALL.len());

    for kind in EventKind::ALL {
        let path = paths.path(kind);
        pb.set_message(format!("Reading {}...", path.display()));

        let column = read_timestamps(path)
            .with_context(|| format!("Failed to read {} from {}", kind.label(), path.display()))?;

        if column.dropped > 0 {
            warn!(
                "Dropped {} unparseable timestamp(s) from {}",
                column.dropped,
                path.display()
            );
        }

        summary.push(WeeklySource {
            kind,
            path: path.to_string_lossy().to_string(),
            events: column.timestamps.len(),
            dropped: column.dropped,
        });
        *sources.events_mut(kind) = column.timestamps;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok((sources, summary))
}
