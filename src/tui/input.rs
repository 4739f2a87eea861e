use super::TuiState;
use crate::model::WeeklyTable;
use crate::util::week_key;

/// Keeps the weeks whose `YYYY-MM-DD` label contains the query.
pub fn apply_search_filter(table: &WeeklyTable, state: &mut TuiState) {
    if state.search_query.is_empty() {
        state.filtered_indices = (0..table.len()).collect();
    } else {
        let query = state.search_query.to_lowercase();
        state.filtered_indices = table
            .buckets()
            .iter()
            .enumerate()
            .filter(|(_, bucket)| week_key(&bucket.week_ending).contains(&query))
            .map(|(i, _)| i)
            .collect();
    }

    ensure_selection_in_filtered(state);
}

pub fn ensure_selection_in_filtered(state: &mut TuiState) {
    if state.filtered_indices.is_empty() {
        return;
    }

    if !state.filtered_indices.contains(&state.selected) {
        state.selected = state.filtered_indices[0];
    }
}

/// Moves the selection `delta` steps through the filtered weeks.
pub fn step_selection(state: &mut TuiState, delta: isize) {
    if state.filtered_indices.is_empty() {
        return;
    }
    let current = state
        .filtered_indices
        .iter()
        .position(|&i| i == state.selected)
        .unwrap_or(0);
    let last = state.filtered_indices.len() - 1;
    let target = current.saturating_add_signed(delta).min(last);
    state.selected = state.filtered_indices[target];
}
