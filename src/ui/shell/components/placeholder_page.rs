//! Section shown for pages without a data loader

use crate::ui::navigation::Page;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

pub fn render_placeholder_page(f: &mut Frame, area: ratatui::layout::Rect, page: Page) {
    let block = Block::default()
        .title(page.entry().label)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new("Nothing to load for this section.")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}
