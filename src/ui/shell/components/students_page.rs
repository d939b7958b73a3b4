//! Students page section
//!
//! Renders the students table. Cells are built from plain spans only, so
//! record text is never interpreted.

use super::super::state::ShellState;
use super::super::utils::status_color;

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

pub fn render_students_page(f: &mut Frame, area: ratatui::layout::Rect, state: &ShellState) {
    let header = Row::new(
        ["Roll No", "Name", "Class", "Phone", "Status", "Actions"]
            .into_iter()
            .map(|title| Cell::from(Span::raw(title))),
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .students
        .rows()
        .iter()
        .map(|student| {
            let badge = Span::styled(
                student.status.clone(),
                Style::default()
                    .fg(status_color(student.status_tone()))
                    .add_modifier(Modifier::BOLD),
            );
            // Edit/Delete are displayed only; they have no key binding.
            let actions = Span::styled("[Edit] [Delete]", Style::default().fg(Color::DarkGray));
            Row::new(vec![
                Cell::from(Span::raw(student.roll_number.clone())),
                Cell::from(Span::raw(student.name.clone())),
                Cell::from(Span::raw(student.class_id.clone())),
                Cell::from(Span::raw(student.phone.clone())),
                Cell::from(badge),
                Cell::from(actions),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Fill(2),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(15),
    ];

    let title = format!("Students ({})", state.students.len());
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(table, area);
}
