//! Login screen module
//!
//! Form state, the submit handler and rendering.

use crate::api::SchoolApi;
use crate::api::error::ApiError;
use crate::api::types::{Credentials, LoginResponse};
use crate::consts::cli_consts::{ROLES, messages, routes};
use crate::error_classifier::LogLevel;
use crate::events::{EventSender, EventType, Source};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// Client-side destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => routes::LOGIN,
            Route::Dashboard => routes::DASHBOARD,
        }
    }
}

/// What a login submission resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Navigate(Route),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
    Role,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    email: String,
    password: String,
    role_index: usize,
    focus: LoginField,
    error: Option<String>,
    submitting: bool,
}

impl LoginForm {
    /// A form prefilled with the last used email and role.
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            email: email.to_string(),
            password: String::new(),
            role_index: ROLES.iter().position(|r| *r == role).unwrap_or(0),
            focus: if email.is_empty() {
                LoginField::Email
            } else {
                LoginField::Password
            },
            error: None,
            submitting: false,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> &'static str {
        ROLES[self.role_index]
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    /// Message shown under the form, once a submission has failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Role,
            LoginField::Role => LoginField::Email,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Role,
            LoginField::Password => LoginField::Email,
            LoginField::Role => LoginField::Password,
        };
    }

    pub fn cycle_role(&mut self, forward: bool) {
        self.role_index = if forward {
            (self.role_index + 1) % ROLES.len()
        } else {
            (self.role_index + ROLES.len() - 1) % ROLES.len()
        };
    }

    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
            LoginField::Role => match c {
                ' ' | 'l' => self.cycle_role(true),
                'h' => self.cycle_role(false),
                _ => {}
            },
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Email => {
                self.email.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
            LoginField::Role => {}
        }
    }

    /// Read the inputs for one submission. Returns `None` while a previous
    /// submission is still in flight. A shown error stays visible until the
    /// new outcome arrives.
    pub fn submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role().to_string(),
        })
    }

    /// Record the outcome of a submission. Returns the route to navigate to on success.
    pub fn apply_outcome(&mut self, outcome: LoginOutcome) -> Option<Route> {
        self.submitting = false;
        match outcome {
            LoginOutcome::Navigate(route) => Some(route),
            LoginOutcome::Failed(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

/// Post credentials once and decide where to go.
///
/// The credentials are consumed and dropped when this returns.
pub async fn submit_login(
    api: &dyn SchoolApi,
    credentials: Credentials,
    events: &EventSender,
) -> LoginOutcome {
    let result = api.login(&credentials).await;
    let email = credentials.email;

    let outcome = match result {
        Ok(LoginResponse { success: true, .. }) => LoginOutcome::Navigate(Route::Dashboard),
        Ok(reply) => LoginOutcome::Failed(
            non_empty(reply.message).unwrap_or_else(|| messages::LOGIN_FAILED.to_string()),
        ),
        // A rejected status may still carry the JSON reply with a message;
        // any other body counts as a failed exchange.
        Err(ApiError::Http { message: body, .. }) => {
            match serde_json::from_str::<LoginResponse>(&body) {
                Ok(reply) => LoginOutcome::Failed(
                    non_empty(reply.message)
                        .unwrap_or_else(|| messages::LOGIN_FAILED.to_string()),
                ),
                Err(_) => {
                    events
                        .send(
                            Source::LoginSubmitter,
                            "Login request failed: HTTP error with unreadable body".to_string(),
                            EventType::Error,
                            LogLevel::Warn,
                        )
                        .await;
                    LoginOutcome::Failed(messages::NETWORK_ERROR.to_string())
                }
            }
        }
        Err(e) => {
            events
                .send(
                    Source::LoginSubmitter,
                    format!("Login request failed: {}", e),
                    EventType::Error,
                    LogLevel::Warn,
                )
                .await;
            LoginOutcome::Failed(messages::NETWORK_ERROR.to_string())
        }
    };

    match &outcome {
        LoginOutcome::Navigate(route) => {
            events
                .send(
                    Source::LoginSubmitter,
                    format!("Signed in as {}, redirecting to {}", email, route.path()),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
        }
        LoginOutcome::Failed(message) => {
            events
                .send(
                    Source::LoginSubmitter,
                    format!("Login rejected for {}: {}", email, message),
                    EventType::Error,
                    LogLevel::Info,
                )
                .await;
        }
    }
    outcome
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Renders the login form in the middle of the screen.
pub fn render_login(f: &mut Frame, form: &LoginForm) {
    let area = centered(f.area(), 60, 16);

    let block = Block::default()
        .title("School Admin - Login")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .split(inner);

    let masked = "*".repeat(form.password.chars().count());
    render_field(f, chunks[0], "Email", form.email(), form.focus() == LoginField::Email);
    render_field(f, chunks[1], "Password", &masked, form.focus() == LoginField::Password);
    render_field(
        f,
        chunks[2],
        "Role (←/→)",
        &format!("‹ {} ›", form.role()),
        form.focus() == LoginField::Role,
    );

    let status = if form.is_submitting() {
        Line::from(Span::styled("Signing in...", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled(
            "[Enter] Sign in | [Tab] Next field | [Esc] Quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[3]);

    if let Some(error) = form.error() {
        let paragraph = Paragraph::new(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(paragraph, chunks[4]);
    }
}

fn render_field(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border = if focused { Color::LightGreen } else { Color::DarkGray };
    let paragraph = Paragraph::new(value.to_string()).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(paragraph, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
