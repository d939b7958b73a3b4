//! Shell utility functions
//!
//! Contains helper functions used across shell components

use crate::events::Source;
use crate::loaders::students::StatusTone;
use ratatui::prelude::Color;

/// Get a ratatui color for an event source
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Navigation => Color::Gray,
        Source::DashboardLoader => Color::Cyan,
        Source::StudentsLoader => Color::LightBlue,
        Source::LoginSubmitter => Color::Yellow,
    }
}

/// Badge color for a student status
pub fn status_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Positive => Color::Green,
        StatusTone::Negative => Color::Red,
        StatusTone::Neutral => Color::Gray,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return msg
            .split_once("Reqwest error")
            .map(|(prefix, _)| format!("{}request timed out", prefix))
            .unwrap_or_else(|| msg.to_string());
    }
    if msg.contains("Reqwest error") {
        return msg
            .split_once("Reqwest error")
            .map(|(prefix, _)| format!("{}backend unreachable", prefix))
            .unwrap_or_else(|| msg.to_string());
    }
    msg.to_string()
}
