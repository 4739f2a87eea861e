use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::super::{
    draw::{intensity_bar, intensity_color},
    layout::get_visible_weeks,
    state::TuiState,
};
use super::{header_cell, kind_color};
use crate::model::{EventKind, WeeklyBucket, WeeklyTable};
use crate::util::week_key;

/// Render the weekly table with a side panel for the selected week.
pub fn draw_table_view(f: &mut Frame, area: Rect, table: &WeeklyTable, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    // Borders and header take three rows.
    let visible = get_visible_weeks(table, state, chunks[0].height.saturating_sub(3) as usize);
    let maxima = EventKind::ALL.map(|kind| table.series(kind).into_iter().max().unwrap_or(0));

    let rows: Vec<Row> = visible
        .iter()
        .map(|(_, bucket, is_selected)| {
            let week_label = if *is_selected {
                format!("{} ◄", week_key(&bucket.week_ending))
            } else {
                week_key(&bucket.week_ending)
            };
            let week_style = if *is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut cells = vec![Cell::from(week_label).style(week_style)];
            for (kind, max) in EventKind::ALL.iter().zip(maxima) {
                let count = bucket.count(*kind);
                cells.push(
                    Cell::from(format!("{:>4} {}", count, intensity_bar(count, max)))
                        .style(intensity_color(count, max)),
                );
            }
            Row::new(cells)
        })
        .collect();

    let title = if state.search_mode {
        format!("Weekly Activity | Search: {} | Press Esc to cancel", state.search_query)
    } else if !state.search_query.is_empty() {
        format!(
            "Weekly Activity | Filtered: '{}' ({} weeks)",
            state.search_query,
            state.filtered_indices.len()
        )
    } else {
        "Weekly Activity | Press 'h' for help, '/' to search".to_string()
    };

    let widget = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(Row::new([
        header_cell("Week ending", Color::Yellow),
        header_cell("Commits", kind_color(EventKind::Commits)),
        header_cell("PRs", kind_color(EventKind::PullRequests)),
        header_cell("Issues", kind_color(EventKind::Issues)),
    ]))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );

    f.render_widget(widget, chunks[0]);
    draw_side_panel(f, chunks[1], table, state);
}

fn draw_side_panel(f: &mut Frame, area: Rect, table: &WeeklyTable, state: &TuiState) {
    let buckets = table.buckets();
    let Some(bucket) = buckets.get(state.selected) else {
        let empty = Paragraph::new("No week selected")
            .block(Block::default().title("Week").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };
    let previous = state
        .selected
        .checked_sub(1)
        .and_then(|i| buckets.get(i));

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Week ending {}", week_key(&bucket.week_ending)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for kind in EventKind::ALL {
        lines.push(count_line(kind, bucket, previous));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!("Total: {}", bucket.total())));

    let totals: Vec<u64> = EventKind::ALL
        .iter()
        .map(|&kind| table.series(kind).iter().sum())
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("All {} weeks", table.len()),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    for (kind, total) in EventKind::ALL.iter().zip(totals) {
        lines.push(Line::from(format!("  {}: {}", kind.label(), total)));
    }

    let panel = Paragraph::new(lines).block(Block::default().title("Week").borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn count_line(kind: EventKind, bucket: &WeeklyBucket, previous: Option<&WeeklyBucket>) -> Line<'static> {
    let count = bucket.count(kind);
    let mut spans = vec![Span::styled(
        format!("{:<8} {:>5}", kind.label(), count),
        Style::default().fg(kind_color(kind)),
    )];
    if let Some(prev) = previous {
        let delta = count as i64 - prev.count(kind) as i64;
        let style = match delta.signum() {
            1 => Style::default().fg(Color::Green),
            -1 => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::DarkGray),
        };
        spans.push(Span::styled(format!(" ({:+})", delta), style));
    }
    Line::from(spans)
}
