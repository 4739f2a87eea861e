use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use super::kind_color;
use crate::model::{EventKind, WeeklyTable};
use crate::tui::state::TuiState;
use crate::util::week_key;

/// Line chart of the three weekly series with a cursor on the selected week.
pub fn draw_chart_view(f: &mut Frame, area: Rect, table: &WeeklyTable, state: &TuiState, title: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    if table.is_empty() {
        f.render_widget(Paragraph::new("No data to display").block(block), area);
        return;
    }

    let buckets = table.buckets();
    let points: Vec<Vec<(f64, f64)>> = EventKind::ALL
        .iter()
        .map(|&kind| {
            buckets
                .iter()
                .enumerate()
                .map(|(i, b)| (i as f64, b.count(kind) as f64))
                .collect()
        })
        .collect();

    let y_max = (table.max_count() as f64 * 1.1).max(1.0);
    let x_max = buckets.len().saturating_sub(1).max(1) as f64;
    let cursor = [(state.selected as f64, 0.0), (state.selected as f64, y_max)];

    let mut datasets: Vec<Dataset> = EventKind::ALL
        .iter()
        .zip(points.iter())
        .map(|(&kind, data)| {
            Dataset::default()
                .name(kind.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(kind_color(kind)))
                .data(data)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&cursor),
    );

    let first = week_key(&buckets[0].week_ending);
    let middle = week_key(&buckets[buckets.len() / 2].week_ending);
    let last = week_key(&buckets[buckets.len() - 1].week_ending);
    let axis_style = Style::default().fg(Color::Gray);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Time")
                .style(axis_style)
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(middle), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .title("Number of Events")
                .style(axis_style)
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );
    f.render_widget(chart, chunks[0]);

    f.render_widget(selection_summary(table, state), chunks[1]);
}

fn selection_summary<'a>(table: &WeeklyTable, state: &TuiState) -> Paragraph<'a> {
    let line = if state.search_mode {
        Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(state.search_query.clone()),
        ])
    } else {
        match table.buckets().get(state.selected) {
            Some(bucket) => {
                let mut spans = vec![Span::styled(
                    format!("Week ending {}", week_key(&bucket.week_ending)),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                for kind in EventKind::ALL {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        format!("{}: {}", kind.label(), bucket.count(kind)),
                        Style::default().fg(kind_color(kind)),
                    ));
                }
                Line::from(spans)
            }
            None => Line::from("No week selected"),
        }
    };

    Paragraph::new(line).block(Block::default().borders(Borders::ALL))
}
