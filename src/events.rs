//! Event System
//!
//! Types and implementations for client events and the activity log

use crate::error_classifier::LogLevel;
use crate::logging::should_log;
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// Page switching in the dashboard shell.
    Navigation,
    /// Fetches aggregate metrics for the dashboard page.
    DashboardLoader,
    /// Fetches the student list for the students page.
    StudentsLoader,
    /// Posts credentials from the login form.
    LoginSubmitter,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn navigation(msg: String) -> Self {
        Self::new(
            Source::Navigation,
            msg,
            EventType::StateChange,
            LogLevel::Debug,
        )
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

/// Clonable handle used by background tasks to report into the activity log.
///
/// Every event is mirrored to the `log` facade so diagnostics survive even
/// when nothing drains the channel.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send_event(&self, event: Event) {
        let level: log::Level = event.log_level.into();
        log::log!(level, "{}: {}", event.source, event.msg);
        let _ = self.sender.send(event).await;
    }

    /// Non-blocking variant for the UI loop, which must never wait on its own queue.
    pub fn try_send_event(&self, event: Event) {
        let level: log::Level = event.log_level.into();
        log::log!(level, "{}: {}", event.source, event.msg);
        let _ = self.sender.try_send(event);
    }

    pub async fn send(
        &self,
        source: Source,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::new(source, message, event_type, log_level))
            .await;
    }
}
