use std::io;

use crossterm::event::{poll, read, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Terminal;

use super::events::{handle_key, Action};
use super::state::{TuiState, ViewMode};
use super::views::{draw_chart_view, draw_help_overlay, draw_table_view};
use crate::model::WeeklyTable;

/// Runs the weekly activity viewer until the user quits.
pub fn run(table: &WeeklyTable, title: &str) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, table, title);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    table: &WeeklyTable,
    title: &str,
) -> io::Result<()> {
    let mut state = TuiState::new(table.len());
    terminal.clear()?;

    loop {
        terminal.draw(|f| {
            let size = f.size();

            if state.show_help {
                draw_help_overlay(f, size);
                return;
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(size);

            let tabs = Tabs::new(ViewMode::TITLES.to_vec())
                .block(Block::default().borders(Borders::ALL).title("View Mode"))
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .select(state.tab_index);
            f.render_widget(tabs, chunks[0]);

            match state.view_mode {
                ViewMode::Chart => draw_chart_view(f, chunks[1], table, &state, title),
                ViewMode::Table => draw_table_view(f, chunks[1], table, &state),
            }
        })?;

        if poll(std::time::Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(key_event.code, &mut state, table) == Action::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}
