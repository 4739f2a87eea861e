use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing navigation, views, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(60, 70, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "actplot weekly - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  ←/→ or j/k  Move selected week"),
        Line::from("  Home/End    Jump to first/last week"),
        Line::from("  PgUp/PgDn   Move by 10 weeks"),
        Line::from(""),
        section("Views:"),
        Line::from("  Tab         Next view (Chart/Table)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from(""),
        section("Search & Filter:"),
        Line::from("  /           Filter weeks by date (e.g. 2024-03)"),
        Line::from("  Esc         Cancel filter / close help"),
        Line::from(""),
        section("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
