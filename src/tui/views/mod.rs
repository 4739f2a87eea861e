use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

use crate::model::EventKind;

mod chart;
mod help;
mod table;

pub use chart::draw_chart_view;
pub use help::draw_help_overlay;
pub use table::draw_table_view;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

pub(crate) fn kind_color(kind: EventKind) -> Color {
    match kind {
        EventKind::Commits => Color::Blue,
        EventKind::PullRequests => Color::Green,
        EventKind::Issues => Color::Red,
    }
}
