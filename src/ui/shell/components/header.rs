//! Shell header component
//!
//! Renders the page title and connection details

use super::super::state::ShellState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the header: active page title on the left, session on the right.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &ShellState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let title = Paragraph::new(state.title().to_uppercase())
        .alignment(Alignment::Left)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let session = Paragraph::new(Line::from(vec![
        Span::styled(state.user_email.clone(), Style::default().fg(Color::White)),
        Span::styled(" @ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            state.environment.base_url(),
            Style::default().fg(Color::LightYellow),
        ),
    ]))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(session, header_chunks[1]);
}
