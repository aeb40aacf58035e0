use serde::Serialize;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExportStatus {
    Idle,
    InProgress,
    Succeeded,
}

#[derive(Debug)]
struct Inner {
    status: ExportStatus,
    succeeded_at: Option<Instant>,
    last_file: Option<PathBuf>,
}

/// Tri-state export status. `Succeeded` reads back as `Idle` once the
/// cool-down has passed.
#[derive(Debug)]
pub struct ExportTracker {
    cooldown: Duration,
    inner: Mutex<Inner>,
}

impl ExportTracker {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            inner: Mutex::new(Inner {
                status: ExportStatus::Idle,
                succeeded_at: None,
                last_file: None,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn status(&self) -> ExportStatus {
        self.status_at(Instant::now())
    }

    pub fn status_at(&self, now: Instant) -> ExportStatus {
        let mut inner = self.lock();
        if let (ExportStatus::Succeeded, Some(at)) = (inner.status, inner.succeeded_at) {
            if now.saturating_duration_since(at) >= self.cooldown {
                inner.status = ExportStatus::Idle;
                inner.succeeded_at = None;
            }
        }
        inner.status
    }

    /// Claim the exporter. `false` while another export is running.
    pub fn try_begin(&self) -> bool {
        let mut inner = self.lock();
        if inner.status == ExportStatus::InProgress {
            return false;
        }
        inner.status = ExportStatus::InProgress;
        inner.succeeded_at = None;
        true
    }

    pub fn succeed(&self, file: PathBuf) {
        self.succeed_at(file, Instant::now());
    }

    pub fn succeed_at(&self, file: PathBuf, now: Instant) {
        let mut inner = self.lock();
        inner.status = ExportStatus::Succeeded;
        inner.succeeded_at = Some(now);
        inner.last_file = Some(file);
    }

    /// Failed export: back to idle, no error state.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.status = ExportStatus::Idle;
        inner.succeeded_at = None;
    }

    pub fn last_file(&self) -> Option<PathBuf> {
        self.lock().last_file.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_in_progress_succeeded_idle() {
        let tracker = ExportTracker::new(Duration::from_secs(3));
        let start = Instant::now();
        assert_eq!(tracker.status_at(start), ExportStatus::Idle);

        assert!(tracker.try_begin());
        assert_eq!(tracker.status_at(start), ExportStatus::InProgress);
        assert!(!tracker.try_begin(), "second export must be refused");

        tracker.succeed_at(PathBuf::from("exports/a.pdf"), start);
        assert_eq!(tracker.status_at(start + Duration::from_secs(2)), ExportStatus::Succeeded);
        assert_eq!(tracker.status_at(start + Duration::from_secs(3)), ExportStatus::Idle);
        assert_eq!(tracker.last_file(), Some(PathBuf::from("exports/a.pdf")));
    }

    #[test]
    fn failure_resets_to_idle() {
        let tracker = ExportTracker::new(Duration::from_secs(3));
        assert!(tracker.try_begin());
        tracker.reset();
        assert_eq!(tracker.status(), ExportStatus::Idle);
        assert!(tracker.last_file().is_none());
        assert!(tracker.try_begin());
    }

    #[test]
    fn can_start_again_during_cooldown() {
        let tracker = ExportTracker::new(Duration::from_secs(3));
        assert!(tracker.try_begin());
        tracker.succeed(PathBuf::from("a.pdf"));
        assert!(tracker.try_begin());
        assert_eq!(tracker.status(), ExportStatus::InProgress);
    }
}
