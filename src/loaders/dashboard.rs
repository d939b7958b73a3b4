//! Dashboard metrics loader and its display fields.

use super::Completion;
use crate::api::SchoolApi;
use crate::api::types::DashboardMetrics;
use crate::consts::cli_consts::display::CURRENCY_SYMBOL;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{EventSender, EventType, Source};

/// The four display fields of the dashboard page, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub total_classes: String,
    pub total_students: String,
    pub fees_collected: String,
    pub fees_due: String,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            total_classes: "0".to_string(),
            total_students: "0".to_string(),
            fees_collected: format_currency(0.0),
            fees_due: "0".to_string(),
        }
    }
}

impl DashboardView {
    /// Build all four fields from one response.
    pub fn from_metrics(metrics: &DashboardMetrics) -> Self {
        Self {
            total_classes: metrics.total_classes.to_string(),
            total_students: metrics.total_students.to_string(),
            fees_collected: format_currency(metrics.fees_collected),
            fees_due: metrics.fees_due.to_string(),
        }
    }
}

/// Format an amount as rupees with Indian digit grouping, e.g. `₹12,34,567.5`.
///
/// At most two fraction digits are kept and trailing zeros are dropped.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}{}", CURRENCY_SYMBOL, amount);
    }

    let paise = (amount.abs() * 100.0).round() as u64;
    let whole = paise / 100;
    let fraction = paise % 100;

    let mut out = String::new();
    if amount < 0.0 && paise != 0 {
        out.push('-');
    }
    out.push_str(CURRENCY_SYMBOL);
    out.push_str(&group_indian(whole));
    if fraction != 0 {
        let digits = format!("{:02}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Group digits as thousands, then pairs: 1234567 -> "12,34,567".
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Issue one metrics request. Failures are logged here and passed on
/// untouched; the caller decides whether to render.
pub(super) async fn fetch(api: &dyn SchoolApi, seq: u64, events: &EventSender) -> Completion {
    events
        .send(
            Source::DashboardLoader,
            format!("Requesting dashboard metrics (#{})", seq),
            EventType::Refresh,
            LogLevel::Debug,
        )
        .await;

    let result = api.dashboard_metrics().await;
    match &result {
        Ok(metrics) => {
            events
                .send(
                    Source::DashboardLoader,
                    format!(
                        "Dashboard loaded: {} classes, {} students",
                        metrics.total_classes, metrics.total_students
                    ),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
        }
        Err(e) => {
            let level = ErrorClassifier::new().classify_load_error(e);
            events
                .send(
                    Source::DashboardLoader,
                    format!("Failed to load dashboard: {}", e),
                    EventType::Error,
                    level,
                )
                .await;
        }
    }

    Completion::Dashboard { seq, result }
}
