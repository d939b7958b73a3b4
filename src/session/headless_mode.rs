//! Headless mode execution
//!
//! One-shot commands for scripts: log in, optionally run a single loader,
//! print the events and the rendered rows to stdout, then exit.

use super::{SessionData, messages::print_session_starting};
use crate::api::error::ApiError;
use crate::api::types::Credentials;
use crate::events::Event;
use crate::loaders::{
    Completion, DashboardView, LoaderKind, RequestSequence, StudentsTable, run_loader,
};
use crate::ui::{LoginOutcome, submit_login};
use crate::{print_cmd_success, print_cmd_warn};
use std::error::Error;
use tokio::sync::mpsc;

/// Log in once and report the outcome.
///
/// # Returns
/// * `Ok(())` - The server accepted the credentials
/// * `Err` - The login failed; the error carries the message shown to the user
pub async fn run_headless_login(
    mut session: SessionData,
    credentials: Credentials,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.api.base_url());
    login(&mut session, credentials).await
}

/// Log in, run `kind` once and print what the page would show.
pub async fn run_headless_loader(
    mut session: SessionData,
    credentials: Credentials,
    kind: LoaderKind,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.api.base_url());
    login(&mut session, credentials).await?;

    let seq = RequestSequence::default().next();
    let completion = run_loader(kind, seq, session.api.as_ref(), &session.event_sender).await;
    print_pending_events(&mut session.event_receiver);

    let base_url = session.api.base_url();
    let lines = match completion {
        Completion::Dashboard { result, .. } => {
            let metrics = result.map_err(|e| load_failure(e, &base_url))?;
            format_dashboard(&DashboardView::from_metrics(&metrics))
        }
        Completion::Students { result, .. } => {
            let records = result.map_err(|e| load_failure(e, &base_url))?;
            let mut table = StudentsTable::default();
            table.replace(&records);
            format_students(&table)
        }
    };
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

async fn login(session: &mut SessionData, credentials: Credentials) -> Result<(), Box<dyn Error>> {
    let email = credentials.email.clone();
    let role = credentials.role.clone();
    let outcome = submit_login(session.api.as_ref(), credentials, &session.event_sender).await;
    print_pending_events(&mut session.event_receiver);

    match outcome {
        LoginOutcome::Navigate(route) => {
            print_cmd_success!("Logged in", "{} as {}, continuing to {}", email, role, route.path());
            session.config.last_email = email;
            session.config.last_role = role;
            session.config.environment = session.environment.config_value();
            if let Err(e) = session.config.save(&session.config_path) {
                print_cmd_warn!("Config", "could not save login defaults: {}", e);
            }
            Ok(())
        }
        LoginOutcome::Failed(message) => Err(message.into()),
    }
}

fn load_failure(error: ApiError, base_url: &str) -> Box<dyn Error> {
    if error.is_transport() {
        format!("No usable reply from {}: {}", base_url, error).into()
    } else {
        error.into()
    }
}

fn print_pending_events(receiver: &mut mpsc::Receiver<Event>) {
    while let Ok(event) = receiver.try_recv() {
        if event.should_display() {
            println!("{}", event);
        }
    }
}

fn format_dashboard(view: &DashboardView) -> Vec<String> {
    vec![
        format!("Total Classes:  {}", view.total_classes),
        format!("Total Students: {}", view.total_students),
        format!("Fees Collected: {}", view.fees_collected),
        format!("Fees Due:       {}", view.fees_due),
    ]
}

fn format_students(table: &StudentsTable) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<10} {:<24} {:<8} {:<14} {}",
        "Roll No", "Name", "Class", "Phone", "Status"
    )];
    lines.extend(table.rows().iter().map(|row| {
        format!(
            "{:<10} {:<24} {:<8} {:<14} {}",
            row.roll_number, row.name, row.class_id, row.phone, row.status
        )
    }));
    lines
}
