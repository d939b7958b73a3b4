//! Dashboard page section
//!
//! Renders the four metric fields

use super::super::state::ShellState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the metric cards in a 2x2 grid.
pub fn render_dashboard_page(f: &mut Frame, area: ratatui::layout::Rect, state: &ShellState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let view = &state.dashboard;
    render_card(f, top[0], "Total Classes", &view.total_classes, Color::LightBlue);
    render_card(f, top[1], "Total Students", &view.total_students, Color::LightGreen);
    render_card(f, bottom[0], "Fees Collected", &view.fees_collected, Color::LightYellow);
    render_card(f, bottom[1], "Fees Due", &view.fees_due, Color::LightRed);
}

fn render_card(f: &mut Frame, area: ratatui::layout::Rect, title: &str, value: &str, color: Color) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(Line::from(value.to_string()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(block);
    f.render_widget(paragraph, area);
}
