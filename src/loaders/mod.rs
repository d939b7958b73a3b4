//! Page data loaders
//!
//! Each loader issues exactly one request per invocation and reports the
//! result back to the UI loop as a [`Completion`]. Failures are logged at the
//! task boundary and never retried. Results are tagged with the sequence
//! number the UI issued so stale replies can be dropped.

pub mod dashboard;
pub mod students;

use crate::api::SchoolApi;
use crate::api::error::ApiError;
use crate::api::types::{DashboardMetrics, StudentRecord};
use crate::events::EventSender;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use dashboard::DashboardView;
pub use students::{StudentRow, StudentsTable};

/// Which loader a page triggers on activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum LoaderKind {
    Dashboard,
    Students,
}

/// Monotonically increasing request counter for one loader.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    /// Issue the next sequence number; it becomes the only one accepted.
    pub fn next(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// The most recently issued number, or 0 if none.
    pub fn latest(&self) -> u64 {
        self.issued
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq != 0 && seq == self.issued
    }
}

/// One counter per loader. Outlives any single shell so numbers are never
/// reused after logging out and back in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoaderSequences {
    dashboard: RequestSequence,
    students: RequestSequence,
}

impl LoaderSequences {
    pub fn for_kind(&self, kind: LoaderKind) -> &RequestSequence {
        match kind {
            LoaderKind::Dashboard => &self.dashboard,
            LoaderKind::Students => &self.students,
        }
    }

    pub fn for_kind_mut(&mut self, kind: LoaderKind) -> &mut RequestSequence {
        match kind {
            LoaderKind::Dashboard => &mut self.dashboard,
            LoaderKind::Students => &mut self.students,
        }
    }
}

/// A loader invocation the UI has committed to, tagged with its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub kind: LoaderKind,
    pub seq: u64,
}

/// Result of one loader invocation.
#[derive(Debug)]
pub enum Completion {
    Dashboard {
        seq: u64,
        result: Result<DashboardMetrics, ApiError>,
    },
    Students {
        seq: u64,
        result: Result<Vec<StudentRecord>, ApiError>,
    },
}

impl Completion {
    pub fn kind(&self) -> LoaderKind {
        match self {
            Completion::Dashboard { .. } => LoaderKind::Dashboard,
            Completion::Students { .. } => LoaderKind::Students,
        }
    }

    pub fn seq(&self) -> u64 {
        match self {
            Completion::Dashboard { seq, .. } | Completion::Students { seq, .. } => *seq,
        }
    }
}

/// Run a loader to completion on the current task.
pub async fn run_loader(
    kind: LoaderKind,
    seq: u64,
    api: &dyn SchoolApi,
    events: &EventSender,
) -> Completion {
    match kind {
        LoaderKind::Dashboard => dashboard::fetch(api, seq, events).await,
        LoaderKind::Students => students::fetch(api, seq, events).await,
    }
}

/// Run a loader on a background task and deliver its completion to the UI loop.
pub fn spawn_loader(
    kind: LoaderKind,
    seq: u64,
    api: Arc<dyn SchoolApi>,
    events: EventSender,
    completions: mpsc::Sender<Completion>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let completion = run_loader(kind, seq, api.as_ref(), &events).await;
        // The receiver is gone only when the UI loop has exited.
        let _ = completions.send(completion).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSchoolApi;

    #[test]
    fn sequence_accepts_only_latest() {
        let mut sequence = RequestSequence::default();
        assert!(!sequence.is_latest(0));

        let first = sequence.next();
        let second = sequence.next();
        assert!(second > first);
        assert!(!sequence.is_latest(first));
        assert!(sequence.is_latest(second));
        assert_eq!(sequence.latest(), second);
    }

    #[tokio::test]
    async fn spawned_loader_delivers_tagged_completion() {
        let mut api = MockSchoolApi::new();
        api.expect_students().times(1).returning(|| Ok(Vec::new()));

        let (event_tx, _event_rx) = mpsc::channel(8);
        let (tx, mut rx) = mpsc::channel(1);
        spawn_loader(
            LoaderKind::Students,
            7,
            Arc::new(api),
            EventSender::new(event_tx),
            tx,
        )
        .await
        .unwrap();

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.kind(), LoaderKind::Students);
        assert_eq!(completion.seq(), 7);
    }
}
