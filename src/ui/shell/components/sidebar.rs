//! Sidebar navigation component

use super::super::state::ShellState;
use crate::ui::navigation::NAV_ENTRIES;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Render the navigation entries. The active entry is marked; the cursor is
/// highlighted separately so it can move without switching pages.
pub fn render_sidebar(f: &mut Frame, area: ratatui::layout::Rect, state: &ShellState) {
    let lines: Vec<Line> = NAV_ENTRIES
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let active = state.is_visible(entry.page);
            let marker = if active { "▶ " } else { "  " };

            let mut style = if active {
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if index == state.selected() {
                style = style.add_modifier(Modifier::REVERSED);
            }

            Line::from(vec![
                Span::styled(format!("{} ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{}{}", marker, entry.label), style),
            ])
        })
        .collect();

    let block = Block::default()
        .title("MENU")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
