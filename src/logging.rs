//! Log threshold for this client.
//!
//! Read once from `SCHOOL_ADMIN_LOG`, falling back to `RUST_LOG`. Both accept
//! the usual comma separated directives (`debug`, `school_admin=trace`,
//! `reqwest=warn`); only bare levels and directives aimed at this crate
//! matter here.

use crate::error_classifier::LogLevel;
use std::env;
use std::sync::OnceLock;

const CRATE_TARGET: &str = "school_admin";
const LOG_ENV_VARS: [&str; 2] = ["SCHOOL_ADMIN_LOG", "RUST_LOG"];

/// Threshold for events and the `log` facade, resolved on first use.
pub fn threshold() -> LogLevel {
    static THRESHOLD: OnceLock<LogLevel> = OnceLock::new();
    *THRESHOLD.get_or_init(|| {
        LOG_ENV_VARS
            .iter()
            .find_map(|var| env::var(var).ok())
            .map(|filter| parse_filter(&filter))
            .unwrap_or(LogLevel::Info)
    })
}

/// Resolve a filter string to this crate's level. A directive targeting
/// `school_admin` (or one of its modules) beats a bare level; directives for
/// other crates are ignored. Unparseable input yields `Info`.
pub fn parse_filter(filter: &str) -> LogLevel {
    let mut bare = None;
    let mut scoped = None;
    for directive in filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        match directive.split_once('=') {
            Some((target, level)) if targets_this_crate(target.trim()) => {
                scoped = parse_level(level).or(scoped);
            }
            Some(_) => {}
            None => bare = parse_level(directive).or(bare),
        }
    }
    scoped.or(bare).unwrap_or(LogLevel::Info)
}

fn targets_this_crate(target: &str) -> bool {
    target == CRATE_TARGET
        || target
            .strip_prefix(CRATE_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

fn parse_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        // `off` still lets errors through to the activity log
        "error" | "off" => Some(LogLevel::Error),
        _ => None,
    }
}

pub fn should_log(event_level: LogLevel) -> bool {
    event_level >= threshold()
}
