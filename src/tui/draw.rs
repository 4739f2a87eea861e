use ratatui::style::{Color, Modifier, Style};

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Fixed-width (5) bar showing `count` relative to `max`.
pub fn intensity_bar(count: u64, max: u64) -> String {
    const WIDTH: usize = 5;
    if max == 0 {
        return "░".repeat(WIDTH);
    }

    let ratio = count as f64 / max as f64;
    let filled = ((ratio * WIDTH as f64).round() as usize).min(WIDTH);
    let intensity_idx = ((ratio * (LEVELS.len() - 1) as f64).round() as usize)
        .min(LEVELS.len() - 1);

    LEVELS[intensity_idx].repeat(filled) + &"░".repeat(WIDTH - filled)
}

pub fn intensity_color(count: u64, max: u64) -> Style {
    if max == 0 {
        return Style::default().fg(Color::White);
    }

    let ratio = count as f64 / max as f64;
    if ratio > 0.8 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if ratio > 0.6 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if ratio > 0.4 {
        Style::default().fg(Color::Green)
    } else if ratio > 0.2 {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Blue)
    }
}
