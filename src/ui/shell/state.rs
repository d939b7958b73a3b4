//! Dashboard shell state
//!
//! The single source of truth for which page is visible. Page sections are
//! rendered from this state; nothing is read back from the screen.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event;
use crate::loaders::{DashboardView, LoaderSequences, StudentsTable};
use crate::ui::app::UIConfig;
use crate::ui::navigation::{NAV_ENTRIES, Page};

use std::collections::VecDeque;

#[derive(Debug)]
pub struct ShellState {
    /// The backend the shell is connected to.
    pub environment: Environment,
    /// Email of the signed-in user, shown in the header.
    pub user_email: String,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Display fields of the dashboard page.
    pub dashboard: DashboardView,
    /// Body of the students table.
    pub students: StudentsTable,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<Event>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Animation tick counter
    pub tick: usize,

    active_page: Page,
    /// Sidebar cursor; may differ from the active page until Enter is pressed.
    selected: usize,
    title: String,
    pub(super) sequences: LoaderSequences,
}

impl ShellState {
    pub fn new(environment: Environment, user_email: String, ui_config: &UIConfig) -> Self {
        Self::with_sequences(environment, user_email, ui_config, LoaderSequences::default())
    }

    /// A shell that continues numbering requests from an earlier session.
    pub fn with_sequences(
        environment: Environment,
        user_email: String,
        ui_config: &UIConfig,
        sequences: LoaderSequences,
    ) -> Self {
        let page = Page::Dashboard;
        Self {
            environment,
            user_email,
            with_background_color: ui_config.with_background_color,
            dashboard: DashboardView::default(),
            students: StudentsTable::default(),
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            active_page: page,
            selected: page.index(),
            title: page.entry().label.to_string(),
            sequences,
        }
    }

    /// Hand the request counters back when the shell is closed.
    pub fn into_sequences(self) -> LoaderSequences {
        self.sequences
    }

    pub fn active_page(&self) -> Page {
        self.active_page
    }

    /// True for exactly one page at any time.
    pub fn is_visible(&self, page: Page) -> bool {
        self.active_page == page
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % NAV_ENTRIES.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + NAV_ENTRIES.len() - 1) % NAV_ENTRIES.len();
    }

    pub(super) fn set_active(&mut self, page: Page) {
        self.active_page = page;
        self.selected = page.index();
        self.title = page.entry().label.to_string();
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: Event) {
        self.pending_events.push_back(event);
    }
}
