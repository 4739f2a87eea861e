use crossterm::event::KeyCode;

use super::input::{apply_search_filter, step_selection};
use super::state::{TuiState, ViewMode};
use crate::model::WeeklyTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub fn handle_key(code: KeyCode, state: &mut TuiState, table: &WeeklyTable) -> Action {
    if state.search_mode {
        handle_search_input(code, state, table);
        return Action::Continue;
    }

    let tabs = ViewMode::TITLES.len();
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = !state.show_help,
        KeyCode::Esc if state.show_help => state.show_help = false,
        KeyCode::Char('/') => {
            state.search_mode = true;
            state.search_query.clear();
        }
        KeyCode::Tab => state.tab_index = (state.tab_index + 1) % tabs,
        KeyCode::BackTab => state.tab_index = (state.tab_index + tabs - 1) % tabs,
        KeyCode::Left | KeyCode::Up | KeyCode::Char('j') => step_selection(state, -1),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('k') => step_selection(state, 1),
        KeyCode::PageUp => step_selection(state, -10),
        KeyCode::PageDown => step_selection(state, 10),
        KeyCode::Home => step_selection(state, isize::MIN),
        KeyCode::End => step_selection(state, isize::MAX),
        _ => {}
    }
    state.view_mode = ViewMode::from_tab(state.tab_index);
    Action::Continue
}

/// Week filter keystrokes; the filter is re-applied on every change.
fn handle_search_input(code: KeyCode, state: &mut TuiState, table: &WeeklyTable) {
    match code {
        KeyCode::Esc => {
            state.search_mode = false;
            state.search_query.clear();
            state.filtered_indices = (0..table.len()).collect();
        }
        KeyCode::Enter => {
            state.search_mode = false;
            apply_search_filter(table, state);
        }
        KeyCode::Backspace => {
            state.search_query.pop();
            apply_search_filter(table, state);
        }
        KeyCode::Char(c) => {
            state.search_query.push(c);
            apply_search_filter(table, state);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeeklyBucket;
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn table() -> WeeklyTable {
        let first = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        WeeklyTable::new(
            (0..30)
                .map(|i| WeeklyBucket::empty(first + Duration::weeks(i)))
                .collect(),
        )
    }

    #[test]
    fn navigation_keys_move_and_switch_views() {
        let table = table();
        let mut state = TuiState::new(table.len());

        handle_key(KeyCode::Right, &mut state, &table);
        handle_key(KeyCode::PageDown, &mut state, &table);
        assert_eq!(state.selected, 11);
        handle_key(KeyCode::End, &mut state, &table);
        assert_eq!(state.selected, 29);
        handle_key(KeyCode::Home, &mut state, &table);
        assert_eq!(state.selected, 0);

        handle_key(KeyCode::Tab, &mut state, &table);
        assert_eq!(state.view_mode, ViewMode::Table);
        handle_key(KeyCode::BackTab, &mut state, &table);
        assert_eq!(state.view_mode, ViewMode::Chart);

        assert_eq!(handle_key(KeyCode::Char('q'), &mut state, &table), Action::Quit);
    }

    #[test]
    fn typing_in_search_mode_filters_instead_of_navigating() {
        let table = table();
        let mut state = TuiState::new(table.len());

        handle_key(KeyCode::Char('/'), &mut state, &table);
        for c in "2024-03".chars() {
            handle_key(KeyCode::Char(c), &mut state, &table);
        }
        assert!(state.search_mode);
        assert_eq!(state.filtered_indices, vec![8, 9, 10, 11, 12]);

        // 'q' is part of the query while searching.
        assert_eq!(handle_key(KeyCode::Char('q'), &mut state, &table), Action::Continue);
        assert!(state.filtered_indices.is_empty());

        handle_key(KeyCode::Esc, &mut state, &table);
        assert!(!state.search_mode);
        assert_eq!(state.filtered_indices.len(), 30);
    }
}
