use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::model::{WeeklyBucket, WeeklyTable};
use crate::tui::state::TuiState;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Filtered weeks that fit in `height` rows, scrolled to keep the selection
/// centered. Each entry carries its table index.
pub fn get_visible_weeks<'a>(
    table: &'a WeeklyTable,
    state: &TuiState,
    height: usize,
) -> Vec<(usize, &'a WeeklyBucket, bool)> {
    let view_height = height.max(1);
    let buckets = table.buckets();
    let filtered: Vec<usize> = state
        .filtered_indices
        .iter()
        .copied()
        .filter(|&i| i < buckets.len())
        .collect();

    if filtered.is_empty() {
        return Vec::new();
    }

    let selected_in_filtered = filtered
        .iter()
        .position(|&i| i == state.selected)
        .unwrap_or(0);

    let start = selected_in_filtered
        .saturating_sub(view_height / 2)
        .min(filtered.len().saturating_sub(view_height));
    let end = (start + view_height).min(filtered.len());

    filtered[start..end]
        .iter()
        .map(|&i| (i, &buckets[i], i == state.selected))
        .collect()
}
