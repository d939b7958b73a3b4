//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic. The UI loop is
//! the only owner of view state: background requests report back through
//! channels and their results are applied here, between frames.

use crate::api::SchoolApi;
use crate::config::Config;
use crate::consts::cli_consts::{COMPLETION_QUEUE_SIZE, MAX_ACTIVITY_LOGS};
use crate::environment::Environment;
use crate::events::{Event, EventSender, EventType, Source};
use crate::error_classifier::LogLevel;
use crate::loaders::{Completion, LoadRequest, LoaderSequences, spawn_loader};
use crate::ui::login::{LoginForm, LoginOutcome, Route, render_login, submit_login};
use crate::ui::navigation::NAV_ENTRIES;
use crate::ui::shell::{ShellState, render_shell};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// Identifier of the page shown first after signing in, as given on
    /// the command line. Unknown ids are logged by the shell.
    pub initial_page: String,
}

impl UIConfig {
    pub fn new(with_background_color: bool, initial_page: &str) -> Self {
        Self {
            with_background_color,
            initial_page: initial_page.to_string(),
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Credential form shown until the backend accepts a login.
    Login(Box<LoginForm>),
    /// Dashboard shell with sidebar navigation, reached via the `/dashboard` route.
    Shell(Box<ShellState>),
}

/// Application state
pub struct App {
    api: Arc<dyn SchoolApi>,
    environment: Environment,
    current_screen: Screen,

    event_sender: EventSender,
    event_receiver: mpsc::Receiver<Event>,
    completion_sender: mpsc::Sender<Completion>,
    completion_receiver: mpsc::Receiver<Completion>,
    login_sender: mpsc::Sender<LoginOutcome>,
    login_receiver: mpsc::Receiver<LoginOutcome>,

    ui_config: UIConfig,
    config: Config,
    /// Where login defaults are saved; `None` keeps them in memory only.
    config_path: Option<PathBuf>,
    /// Email and role of the submission in flight.
    pending_login: Option<(String, String)>,
    /// Events received on the login screen, shown once the shell opens.
    backlog: Vec<Event>,
    /// Request counters, parked here while no shell is open.
    sequences: LoaderSequences,
}

impl App {
    /// Creates a new instance of the application, starting on the login screen.
    pub fn new(
        api: Arc<dyn SchoolApi>,
        environment: Environment,
        event_sender: EventSender,
        event_receiver: mpsc::Receiver<Event>,
        config: Config,
        config_path: Option<PathBuf>,
        ui_config: UIConfig,
    ) -> Self {
        let (completion_sender, completion_receiver) = mpsc::channel(COMPLETION_QUEUE_SIZE);
        let (login_sender, login_receiver) = mpsc::channel(1);
        let form = LoginForm::new(&config.last_email, &config.last_role);
        Self {
            api,
            environment,
            current_screen: Screen::Login(Box::new(form)),
            event_sender,
            event_receiver,
            completion_sender,
            completion_receiver,
            login_sender,
            login_receiver,
            ui_config,
            config,
            config_path,
            pending_login: None,
            backlog: Vec::new(),
            sequences: LoaderSequences::default(),
        }
    }

    pub fn current_screen(&self) -> &Screen {
        &self.current_screen
    }

    /// Handles one key press. Returns `true` when the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return true;
        }

        match &mut self.current_screen {
            Screen::Login(form) => {
                match key.code {
                    KeyCode::Enter => self.submit_login(),
                    KeyCode::Tab | KeyCode::Down => form.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
                    KeyCode::Left => form.cycle_role(false),
                    KeyCode::Right => form.cycle_role(true),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Char(c) => form.input_char(c),
                    _ => {}
                }
                false
            }
            Screen::Shell(state) => {
                let request = match key.code {
                    KeyCode::Char('q') => return true,
                    KeyCode::Char('l') => {
                        self.logout();
                        return false;
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        state.select_previous();
                        None
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        state.select_next();
                        None
                    }
                    KeyCode::Enter => state.activate_selected(),
                    KeyCode::Tab => {
                        let next = (state.active_page().index() + 1) % NAV_ENTRIES.len();
                        state.activate_index(next)
                    }
                    KeyCode::BackTab => {
                        let len = NAV_ENTRIES.len();
                        let previous = (state.active_page().index() + len - 1) % len;
                        state.activate_index(previous)
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        state.activate_index(c as usize - '1' as usize)
                    }
                    _ => None,
                };
                self.dispatch(request);
                false
            }
        }
    }

    /// Drain everything background tasks have reported since the last frame.
    pub fn process_messages(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match &mut self.current_screen {
                Screen::Shell(state) => state.add_event(event),
                Screen::Login(_) => {
                    if self.backlog.len() >= MAX_ACTIVITY_LOGS {
                        self.backlog.remove(0);
                    }
                    self.backlog.push(event);
                }
            }
        }

        while let Ok(completion) = self.completion_receiver.try_recv() {
            // Completions for a shell that has since been left are dropped.
            if let Screen::Shell(state) = &mut self.current_screen {
                state.apply_completion(completion);
            }
        }

        while let Ok(outcome) = self.login_receiver.try_recv() {
            let route = match &mut self.current_screen {
                Screen::Login(form) => form.apply_outcome(outcome),
                Screen::Shell(_) => None,
            };
            if route == Some(Route::Dashboard) {
                self.enter_shell();
            }
        }
    }

    fn submit_login(&mut self) {
        let Screen::Login(form) = &mut self.current_screen else {
            return;
        };
        let Some(credentials) = form.submit() else {
            return;
        };
        self.pending_login = Some((credentials.email.clone(), credentials.role.clone()));

        let api = Arc::clone(&self.api);
        let events = self.event_sender.clone();
        let outcomes = self.login_sender.clone();
        tokio::spawn(async move {
            let outcome = submit_login(api.as_ref(), credentials, &events).await;
            let _ = outcomes.send(outcome).await;
        });
    }

    /// Switch to the dashboard shell and run its startup loads.
    fn enter_shell(&mut self) {
        let (email, role) = self.pending_login.take().unwrap_or_default();
        self.remember_login(&email, &role);

        let mut state = ShellState::with_sequences(
            self.environment.clone(),
            email,
            &self.ui_config,
            std::mem::take(&mut self.sequences),
        );
        for event in self.backlog.drain(..) {
            state.add_event(event);
        }
        let requests = state.startup(&self.ui_config.initial_page);
        self.current_screen = Screen::Shell(Box::new(state));
        for request in requests {
            self.dispatch(Some(request));
        }
    }

    fn remember_login(&mut self, email: &str, role: &str) {
        self.config.last_email = email.to_string();
        self.config.last_role = role.to_string();
        self.config.environment = self.environment.config_value();
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save(path) {
                self.event_sender.try_send_event(Event::new(
                    Source::LoginSubmitter,
                    format!("Could not save login defaults: {}", e),
                    EventType::Error,
                    LogLevel::Warn,
                ));
            }
        }
    }

    fn dispatch(&self, request: Option<LoadRequest>) {
        if let Some(LoadRequest { kind, seq }) = request {
            spawn_loader(
                kind,
                seq,
                Arc::clone(&self.api),
                self.event_sender.clone(),
                self.completion_sender.clone(),
            );
        }
    }

    /// End the session and return to the login form.
    fn logout(&mut self) {
        let api = Arc::clone(&self.api);
        let events = self.event_sender.clone();
        tokio::spawn(async move {
            if let Err(e) = api.logout().await {
                events
                    .send(
                        Source::LoginSubmitter,
                        format!("Logout request failed: {}", e),
                        EventType::Error,
                        LogLevel::Warn,
                    )
                    .await;
            }
        });
        self.event_sender.try_send_event(Event::new(
            Source::LoginSubmitter,
            format!("Signed out, back to {}", Route::Login.path()),
            EventType::StateChange,
            LogLevel::Info,
        ));
        let form = LoginForm::new(&self.config.last_email, &self.config.last_role);
        let previous = std::mem::replace(&mut self.current_screen, Screen::Login(Box::new(form)));
        if let Screen::Shell(state) = previous {
            // Replies still in flight carry numbers the next shell must not accept.
            self.sequences = state.into_sequences();
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        app.process_messages();

        if let Screen::Shell(state) = &mut app.current_screen {
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let TermEvent::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if app.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Login(form) => render_login(f, form),
        Screen::Shell(state) => render_shell(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSchoolApi;
    use crate::api::error::ApiError;
    use crate::api::types::{Credentials, DashboardMetrics, LoginResponse, StudentRecord};
    use crate::ui::navigation::Page;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(api: MockSchoolApi, initial_page: &str) -> App {
        let (tx, rx) = mpsc::channel(64);
        App::new(
            Arc::new(api),
            Environment::Local,
            EventSender::new(tx),
            rx,
            Config::new(
                "admin@school.com".to_string(),
                "school_admin".to_string(),
                String::new(),
            ),
            None,
            UIConfig::new(false, initial_page),
        )
    }

    /// Let spawned tasks run, then apply what they reported.
    async fn settle(app: &mut App) {
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            app.process_messages();
        }
    }

    fn metrics() -> DashboardMetrics {
        DashboardMetrics {
            total_classes: 5,
            total_students: 120,
            fees_collected: 50000.0,
            fees_due: 3,
        }
    }

    fn accepting_api() -> MockSchoolApi {
        let mut api = MockSchoolApi::new();
        api.expect_login().returning(|_: &Credentials| {
            Ok(LoginResponse {
                success: true,
                message: None,
            })
        });
        api
    }

    #[tokio::test]
    async fn successful_login_opens_dashboard_and_loads_metrics() {
        let mut api = accepting_api();
        api.expect_dashboard_metrics()
            .times(1)
            .returning(|| Ok(metrics()));
        let mut app = app_with(api, "dashboard");

        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        let Screen::Shell(state) = app.current_screen() else {
            panic!("expected the dashboard shell after login");
        };
        assert_eq!(state.active_page(), Page::Dashboard);
        assert_eq!(state.user_email, "admin@school.com");
        assert_eq!(state.dashboard.fees_collected, "₹50,000");
        assert!(
            state
                .pending_events
                .iter()
                .chain(state.activity_logs.iter())
                .any(|e| e.msg.contains("Signed in as admin@school.com"))
        );
    }

    #[tokio::test]
    async fn rejected_login_stays_on_form_with_message() {
        let mut api = MockSchoolApi::new();
        api.expect_login().returning(|_: &Credentials| {
            Ok(LoginResponse {
                success: false,
                message: Some("Invalid credentials".to_string()),
            })
        });
        api.expect_dashboard_metrics().never();
        let mut app = app_with(api, "dashboard");

        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        let Screen::Login(form) = app.current_screen() else {
            panic!("a rejected login must not navigate");
        };
        assert_eq!(form.error(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn number_keys_switch_pages_and_load_students() {
        let mut api = accepting_api();
        api.expect_dashboard_metrics().returning(|| Ok(metrics()));
        api.expect_students().times(1).returning(|| {
            Ok(vec![StudentRecord {
                roll_number: "R1".to_string(),
                name: "Asha".to_string(),
                class_id: "C1".to_string(),
                phone: None,
                status: "active".to_string(),
            }])
        });
        let mut app = app_with(api, "dashboard");
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        app.handle_key(key(KeyCode::Char('2')));
        settle(&mut app).await;
        app.handle_key(key(KeyCode::Char('5')));
        settle(&mut app).await;

        let Screen::Shell(state) = app.current_screen() else {
            panic!("expected the dashboard shell");
        };
        assert_eq!(state.active_page(), Page::Fees);
        assert_eq!(state.title(), "Fees");
        assert_eq!(state.students.len(), 1);
    }

    #[tokio::test]
    async fn logout_returns_to_prefilled_login_form() {
        let mut api = accepting_api();
        api.expect_dashboard_metrics().returning(|| Ok(metrics()));
        api.expect_logout().times(1).returning(|| Ok(()));
        let mut app = app_with(api, "dashboard");
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        assert!(!app.handle_key(key(KeyCode::Char('l'))));
        settle(&mut app).await;

        let Screen::Login(form) = app.current_screen() else {
            panic!("expected the login form after logout");
        };
        assert_eq!(form.email(), "admin@school.com");
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn late_reply_from_previous_session_is_not_rendered() {
        let mut api = accepting_api();
        api.expect_dashboard_metrics().returning(|| {
            Err(ApiError::Http {
                status: 500,
                message: "unavailable".to_string(),
            })
        });
        api.expect_logout().returning(|| Ok(()));
        let mut app = app_with(api, "dashboard");

        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;
        app.handle_key(key(KeyCode::Char('l')));
        settle(&mut app).await;
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        // Reply to the first session's dashboard request #1 arriving late.
        app.completion_sender
            .send(Completion::Dashboard {
                seq: 1,
                result: Ok(DashboardMetrics {
                    total_classes: 1,
                    total_students: 999,
                    fees_collected: 1.0,
                    fees_due: 1,
                }),
            })
            .await
            .unwrap();
        app.process_messages();

        let Screen::Shell(state) = app.current_screen() else {
            panic!("expected the dashboard shell after signing in again");
        };
        assert_eq!(state.dashboard.total_students, "0");
    }

    #[tokio::test]
    async fn escape_quits_from_any_screen() {
        let mut app = app_with(MockSchoolApi::new(), "dashboard");
        assert!(app.handle_key(key(KeyCode::Esc)));
        // 'q' is text on the login form
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
    }
}
