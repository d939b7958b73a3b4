//! Shell state update logic
//!
//! Navigation, loader bookkeeping and completion handling. All of it runs on
//! the UI loop, so each method is atomic with respect to rendering.

use super::state::ShellState;

use crate::error_classifier::LogLevel;
use crate::events::{Event, EventType, Source};
use crate::loaders::{Completion, DashboardView, LoadRequest, LoaderKind};
use crate::ui::navigation::{NAV_ENTRIES, Page};

impl ShellState {
    /// Update the shell state with a new tick and queued events.
    pub fn update(&mut self) {
        self.tick += 1;
        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }
    }

    /// Make `page` the only visible page and issue its loader, if it has one.
    pub fn activate(&mut self, page: Page) -> Option<LoadRequest> {
        self.set_active(page);
        self.add_to_activity_log(Event::navigation(format!("Opened {}", page.id())));
        page.loader().map(|kind| self.issue(kind))
    }

    /// Activate a page by identifier. An unknown identifier is a configuration
    /// error: it is logged and nothing changes.
    pub fn activate_id(&mut self, id: &str) -> Option<LoadRequest> {
        match Page::from_id(id) {
            Some(page) => self.activate(page),
            None => {
                self.add_to_activity_log(Event::new(
                    Source::Navigation,
                    format!("No page section for '{}'", id),
                    EventType::Error,
                    LogLevel::Warn,
                ));
                None
            }
        }
    }

    /// Activate the entry under the sidebar cursor.
    pub fn activate_selected(&mut self) -> Option<LoadRequest> {
        let page = NAV_ENTRIES[self.selected()].page;
        self.activate(page)
    }

    /// Activate the entry at a sidebar position; out-of-range positions are ignored.
    pub fn activate_index(&mut self, index: usize) -> Option<LoadRequest> {
        let page = NAV_ENTRIES.get(index)?.page;
        self.activate(page)
    }

    /// Requests issued when the shell is first shown: the dashboard metrics
    /// load, plus whatever the initial page needs. An unknown `initial` id is
    /// logged and the shell stays on the dashboard.
    pub fn startup(&mut self, initial: &str) -> Vec<LoadRequest> {
        let mut requests = Vec::new();
        if Page::from_id(initial).and_then(Page::loader) != Some(LoaderKind::Dashboard) {
            requests.push(self.issue(LoaderKind::Dashboard));
        }
        requests.extend(self.activate_id(initial));
        requests
    }

    /// Reserve a new sequence number for `kind`, superseding any request in flight.
    pub fn issue(&mut self, kind: LoaderKind) -> LoadRequest {
        let seq = self.sequences.for_kind_mut(kind).next();
        LoadRequest { kind, seq }
    }

    /// Apply a loader result. Returns whether the visible state changed.
    ///
    /// Stale completions are dropped so the most recently requested load wins.
    /// Failures leave the previous render untouched; they were already logged
    /// by the loader.
    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        let sequence = self.sequences.for_kind(completion.kind());
        if !sequence.is_latest(completion.seq()) {
            let latest = sequence.latest();
            self.add_to_activity_log(Event::new(
                Source::Navigation,
                format!(
                    "Discarded stale {} response #{} (latest #{})",
                    completion.kind(),
                    completion.seq(),
                    latest
                ),
                EventType::Refresh,
                LogLevel::Debug,
            ));
            return false;
        }

        match completion {
            Completion::Dashboard {
                result: Ok(metrics),
                ..
            } => {
                self.dashboard = DashboardView::from_metrics(&metrics);
                true
            }
            Completion::Students {
                result: Ok(records),
                ..
            } => {
                self.students.replace(&records);
                true
            }
            Completion::Dashboard { result: Err(_), .. }
            | Completion::Students { result: Err(_), .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::error::ApiError;
    use crate::api::types::{DashboardMetrics, StudentRecord};
    use crate::environment::Environment;
    use crate::loaders::{Completion, DashboardView, LoadRequest, LoaderKind};
    use crate::ui::app::UIConfig;
    use crate::ui::navigation::{NAV_ENTRIES, Page};
    use crate::ui::shell::ShellState;

    fn shell() -> ShellState {
        ShellState::new(
            Environment::Local,
            "admin@school.com".to_string(),
            &UIConfig::new(false, "dashboard"),
        )
    }

    fn metrics() -> DashboardMetrics {
        DashboardMetrics {
            total_classes: 5,
            total_students: 120,
            fees_collected: 50000.0,
            fees_due: 3,
        }
    }

    fn asha() -> StudentRecord {
        StudentRecord {
            roll_number: "R1".to_string(),
            name: "Asha".to_string(),
            class_id: "C1".to_string(),
            phone: None,
            status: "active".to_string(),
        }
    }

    fn server_error() -> ApiError {
        ApiError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    #[test]
    fn exactly_one_page_is_visible_after_each_activation() {
        let mut state = shell();
        for entry in NAV_ENTRIES {
            state.activate(entry.page);
            let visible: Vec<Page> = NAV_ENTRIES
                .iter()
                .map(|e| e.page)
                .filter(|p| state.is_visible(*p))
                .collect();
            assert_eq!(visible, vec![entry.page]);
            assert_eq!(state.title(), entry.label);
            assert_eq!(NAV_ENTRIES[state.selected()].page, entry.page);
        }
    }

    #[test]
    fn activation_issues_loader_only_for_data_pages() {
        let mut state = shell();
        assert_eq!(
            state.activate(Page::Students).map(|r| r.kind),
            Some(LoaderKind::Students)
        );
        assert_eq!(
            state.activate(Page::Dashboard).map(|r| r.kind),
            Some(LoaderKind::Dashboard)
        );
        assert_eq!(state.activate(Page::Fees), None);
    }

    #[test]
    fn unknown_page_id_is_a_logged_no_op() {
        let mut state = shell();
        state.activate(Page::Students);
        let logs_before = state.activity_logs.len();

        assert_eq!(state.activate_id("library"), None);
        assert_eq!(state.active_page(), Page::Students);
        assert_eq!(state.title(), "Students");
        assert_eq!(state.activity_logs.len(), logs_before + 1);
    }

    #[test]
    fn startup_loads_dashboard_once() {
        let mut state = shell();
        let requests = state.startup("dashboard");
        assert_eq!(
            requests,
            vec![LoadRequest {
                kind: LoaderKind::Dashboard,
                seq: 1
            }]
        );

        let mut state = shell();
        let kinds: Vec<LoaderKind> = state
            .startup("students")
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(kinds, vec![LoaderKind::Dashboard, LoaderKind::Students]);
        assert_eq!(state.active_page(), Page::Students);
    }

    #[test]
    fn startup_with_unknown_page_stays_on_dashboard() {
        let mut state = shell();
        let kinds: Vec<LoaderKind> = state
            .startup("library")
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(kinds, vec![LoaderKind::Dashboard]);
        assert_eq!(state.active_page(), Page::Dashboard);
        assert!(
            state
                .activity_logs
                .iter()
                .any(|e| e.msg.contains("No page section for 'library'"))
        );
    }

    #[test]
    fn dashboard_success_replaces_all_fields() {
        let mut state = shell();
        let request = state.activate(Page::Dashboard).unwrap();
        assert!(state.apply_completion(Completion::Dashboard {
            seq: request.seq,
            result: Ok(metrics()),
        }));

        assert_eq!(state.dashboard.total_classes, "5");
        assert_eq!(state.dashboard.total_students, "120");
        assert_eq!(state.dashboard.fees_collected, "₹50,000");
        assert_eq!(state.dashboard.fees_due, "3");
    }

    #[test]
    fn dashboard_failure_leaves_fields_untouched() {
        let mut state = shell();
        let first = state.activate(Page::Dashboard).unwrap();
        state.apply_completion(Completion::Dashboard {
            seq: first.seq,
            result: Ok(metrics()),
        });
        let before = state.dashboard.clone();

        let second = state.activate(Page::Dashboard).unwrap();
        assert!(!state.apply_completion(Completion::Dashboard {
            seq: second.seq,
            result: Err(server_error()),
        }));
        assert_eq!(state.dashboard, before);

        let mut fresh = shell();
        let request = fresh.activate(Page::Dashboard).unwrap();
        fresh.apply_completion(Completion::Dashboard {
            seq: request.seq,
            result: Err(server_error()),
        });
        assert_eq!(fresh.dashboard, DashboardView::default());
    }

    #[test]
    fn students_render_is_a_full_replace() {
        let mut state = shell();
        let first = state.activate(Page::Students).unwrap();
        state.apply_completion(Completion::Students {
            seq: first.seq,
            result: Ok(vec![asha()]),
        });
        assert_eq!(state.students.len(), 1);
        let row = &state.students.rows()[0];
        assert_eq!(
            (
                row.roll_number.as_str(),
                row.name.as_str(),
                row.class_id.as_str(),
                row.phone.as_str(),
                row.status.as_str()
            ),
            ("R1", "Asha", "C1", "-", "active")
        );

        let second = state.activate(Page::Students).unwrap();
        state.apply_completion(Completion::Students {
            seq: second.seq,
            result: Ok(Vec::new()),
        });
        assert!(state.students.is_empty());
    }

    #[test]
    fn students_failure_keeps_previous_rows() {
        let mut state = shell();
        let first = state.activate(Page::Students).unwrap();
        state.apply_completion(Completion::Students {
            seq: first.seq,
            result: Ok(vec![asha(), asha()]),
        });

        let second = state.activate(Page::Students).unwrap();
        state.apply_completion(Completion::Students {
            seq: second.seq,
            result: Err(server_error()),
        });
        assert_eq!(state.students.len(), 2);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = shell();
        let older = state.activate(Page::Students).unwrap();
        let newer = state.activate(Page::Students).unwrap();

        // The newer request resolves first, then the older one arrives late.
        assert!(state.apply_completion(Completion::Students {
            seq: newer.seq,
            result: Ok(vec![asha()]),
        }));
        assert!(!state.apply_completion(Completion::Students {
            seq: older.seq,
            result: Ok(Vec::new()),
        }));
        assert_eq!(state.students.len(), 1);
    }

    #[test]
    fn sequences_are_tracked_per_loader() {
        let mut state = shell();
        let dashboard = state.activate(Page::Dashboard).unwrap();
        state.activate(Page::Students);

        assert!(state.apply_completion(Completion::Dashboard {
            seq: dashboard.seq,
            result: Ok(metrics()),
        }));
    }

    #[test]
    fn identical_responses_are_idempotent() {
        let mut state = shell();
        let first = state.activate(Page::Students).unwrap();
        state.apply_completion(Completion::Students {
            seq: first.seq,
            result: Ok(vec![asha()]),
        });
        let after_first = state.students.clone();

        let second = state.activate(Page::Students).unwrap();
        state.apply_completion(Completion::Students {
            seq: second.seq,
            result: Ok(vec![asha()]),
        });
        assert_eq!(state.students, after_first);

        let d1 = state.activate(Page::Dashboard).unwrap();
        state.apply_completion(Completion::Dashboard {
            seq: d1.seq,
            result: Ok(metrics()),
        });
        let dashboard_first = state.dashboard.clone();
        let d2 = state.activate(Page::Dashboard).unwrap();
        state.apply_completion(Completion::Dashboard {
            seq: d2.seq,
            result: Ok(metrics()),
        });
        assert_eq!(state.dashboard, dashboard_first);
    }

    #[test]
    fn cursor_wraps_and_activates_selected_entry() {
        let mut state = shell();
        state.select_previous();
        assert_eq!(NAV_ENTRIES[state.selected()].page, Page::Settings);
        state.select_next();
        state.select_next();
        assert_eq!(
            state.activate_selected().map(|r| r.kind),
            Some(LoaderKind::Students)
        );
        assert_eq!(state.activate_index(99), None);
        assert_eq!(state.active_page(), Page::Students);
    }

    #[test]
    fn update_moves_pending_events_into_log() {
        let mut state = shell();
        state.add_event(crate::events::Event::navigation("queued".to_string()));
        state.update();
        assert!(state.pending_events.is_empty());
        assert_eq!(
            state.activity_logs.back().map(|e| e.msg.as_str()),
            Some("queued")
        );
    }
}
