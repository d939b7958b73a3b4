//! Shell main renderer

use super::components::{
    dashboard_page, footer, header, logs, placeholder_page, sidebar, students_page,
};
use super::state::ShellState;
use crate::ui::navigation::Page;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_shell(f: &mut Frame, state: &ShellState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Fill(1)])
        .split(main_chunks[1]);

    sidebar::render_sidebar(f, content_chunks[0], state);

    // Only the active page section is drawn.
    match state.active_page() {
        Page::Dashboard => dashboard_page::render_dashboard_page(f, content_chunks[1], state),
        Page::Students => students_page::render_students_page(f, content_chunks[1], state),
        page => placeholder_page::render_placeholder_page(f, content_chunks[1], page),
    }

    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{DashboardMetrics, StudentRecord};
    use crate::environment::Environment;
    use crate::loaders::Completion;
    use crate::ui::app::UIConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(state: &ShellState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_shell(f, state)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn shell() -> ShellState {
        ShellState::new(
            Environment::Local,
            "admin@school.com".to_string(),
            &UIConfig::new(false, "dashboard"),
        )
    }

    #[test]
    fn dashboard_page_shows_formatted_metrics() {
        let mut state = shell();
        let request = state.activate(Page::Dashboard).unwrap();
        state.apply_completion(Completion::Dashboard {
            seq: request.seq,
            result: Ok(DashboardMetrics {
                total_classes: 5,
                total_students: 120,
                fees_collected: 50000.0,
                fees_due: 3,
            }),
        });

        let screen = draw(&state);
        assert!(screen.contains("DASHBOARD"));
        assert!(screen.contains("Total Students"));
        assert!(screen.contains("120"));
        assert!(screen.contains("50,000"));
        assert!(!screen.contains("Roll No"));
    }

    #[test]
    fn markup_in_student_names_renders_literally() {
        let mut state = shell();
        let request = state.activate(Page::Students).unwrap();
        state.apply_completion(Completion::Students {
            seq: request.seq,
            result: Ok(vec![StudentRecord {
                roll_number: "R1".to_string(),
                name: "<script>x</script>".to_string(),
                class_id: "C1".to_string(),
                phone: None,
                status: "active".to_string(),
            }]),
        });

        let screen = draw(&state);
        assert!(screen.contains("Roll No"));
        assert!(screen.contains("<script>x</script>"));
        assert!(screen.contains("[Edit] [Delete]"));
        assert!(!screen.contains("Total Students"));
    }

    #[test]
    fn static_pages_render_placeholder() {
        let mut state = shell();
        state.activate(Page::Reports);

        let screen = draw(&state);
        assert!(screen.contains("REPORTS"));
        assert!(screen.contains("Nothing to load for this section."));
    }
}
